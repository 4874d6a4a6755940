//! Embedded configuration data.
//!
//! The expected-threat grid ships as a versioned JSON export under
//! `data/exports/` and is compiled into the binary with `include_str!`, so the
//! engine needs no file I/O at runtime. The parsed grid is built once on first
//! access.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::pitch::ThreatGrid;

/// Expected-threat grid JSON (~2KB), 8 rows x 12 cols, row-major.
pub const XT_GRID_JSON: &str = include_str!("../../../../data/exports/xt_grid.v1.json");

/// On-disk schema of a threat grid export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridExport {
    pub schema_version: String,
    pub rows: u8,
    pub cols: u8,
    pub values: Vec<Vec<f64>>,
}

static EMBEDDED_GRID: Lazy<ThreatGrid> = Lazy::new(|| {
    let export: GridExport =
        serde_json::from_str(XT_GRID_JSON).expect("embedded xt grid is valid JSON");
    let grid = ThreatGrid::from_export(&export).expect("embedded xt grid has 8x12 usable cells");
    log::info!(
        "[XtGrid] loaded embedded grid {}: 96 cells, max {:.3}",
        export.schema_version,
        grid.max_value()
    );
    grid
});

/// The threat grid compiled into this build.
pub fn embedded_grid() -> &'static ThreatGrid {
    &EMBEDDED_GRID
}
