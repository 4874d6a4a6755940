//! Grid Builder Library
//!
//! CSV (analyst threat export) → validated xT grid JSON
//!
//! Analysts maintain the expected-threat grid as a plain 8x12 CSV; this crate
//! turns it into the versioned JSON export `pk_core` embeds, and re-validates
//! existing exports.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use pk_core::data::GridExport;
use pk_core::pitch::{ThreatGrid, GRID_COLS, GRID_ROWS, ZONE_COUNT};

/// Summary of a built or verified export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMetadata {
    /// Schema version (e.g. "v1")
    pub schema_version: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    pub min_value: f64,
    pub max_value: f64,
    pub mean_value: f64,
}

fn summarize(export: &GridExport) -> GridMetadata {
    let cells: Vec<f64> = export.values.iter().flatten().copied().collect();
    let min_value = cells.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = cells.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean_value = cells.iter().sum::<f64>() / cells.len() as f64;
    GridMetadata {
        schema_version: export.schema_version.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
        min_value,
        max_value,
        mean_value,
    }
}

/// Read an 8x12 CSV of threat values (no header row, row `a` first).
pub fn read_grid_csv(input: &Path, schema_version: &str) -> Result<GridExport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(input)
        .with_context(|| format!("Failed to open CSV file: {}", input.display()))?;

    let mut values: Vec<Vec<f64>> = Vec::new();
    for (row_idx, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Failed to read CSV row {}", row_idx + 1))?;
        let parsed: Vec<f64> = row
            .iter()
            .map(|cell| {
                cell.parse::<f64>()
                    .with_context(|| format!("Row {}: bad threat value {:?}", row_idx + 1, cell))
            })
            .collect::<Result<_>>()?;
        values.push(parsed);
    }

    if values.len() != GRID_ROWS as usize {
        bail!("Expected {} rows, found {}", GRID_ROWS, values.len());
    }
    if let Some(bad) = values.iter().position(|row| row.len() != GRID_COLS as usize) {
        bail!("Row {}: expected {} columns, found {}", bad + 1, GRID_COLS, values[bad].len());
    }

    Ok(GridExport {
        schema_version: schema_version.to_string(),
        rows: GRID_ROWS,
        cols: GRID_COLS,
        values,
    })
}

/// Build the JSON export from a CSV input, validating the cells through the
/// same path the engine uses at load time.
pub fn build_grid(input_csv: &Path, output_json: &Path, schema_version: &str) -> Result<GridMetadata> {
    let export = read_grid_csv(input_csv, schema_version)?;

    // The engine is the authority on what a usable grid is
    ThreatGrid::from_export(&export).context("CSV contains unusable threat cells")?;

    if let Some(parent) = output_json.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize grid export")?;
    fs::write(output_json, json)
        .with_context(|| format!("Failed to write output file: {}", output_json.display()))?;

    log::info!("[GridBuilder] wrote {} ({} cells)", output_json.display(), ZONE_COUNT);
    Ok(summarize(&export))
}

/// Re-validate an existing JSON export.
pub fn verify_grid(input_json: &Path) -> Result<GridMetadata> {
    let json = fs::read_to_string(input_json)
        .with_context(|| format!("Failed to read export: {}", input_json.display()))?;
    let export: GridExport =
        serde_json::from_str(&json).context("Export is not valid grid JSON")?;
    ThreatGrid::from_export(&export).context("Export contains unusable threat cells")?;
    Ok(summarize(&export))
}
