use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::zone::{PitchZone, GRID_COLS, GRID_ROWS, ZONE_COUNT};
use crate::data::GridExport;

/// Threshold on attacking-side threat above which a regain counts as an
/// attacking-zone regain. Inherited from the data this tool was calibrated
/// against; override with [`ThreatGrid::with_attack_threshold`] if a different
/// split is wanted.
pub const DEFAULT_ATTACK_THRESHOLD: f64 = 0.02;

/// Rejected grid exports: wrong shape or non-finite cells.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridDataError {
    #[error("grid shape mismatch: expected {GRID_ROWS}x{GRID_COLS}, found {rows}x{cols}")]
    ShapeMismatch { rows: usize, cols: usize },

    #[error("cell {label} is not a usable threat value: {value}")]
    BadCell { label: String, value: f64 },
}

/// Per-cell expected-threat lookup over the 8x12 tagging grid.
///
/// The grid is static configuration: loaded once (see [`ThreatGrid::embedded`])
/// and never mutated afterwards. `threat_of` is total over the 96 valid zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatGrid {
    values: Vec<f64>, // row-major, len = 96
    attack_threshold: f64,
}

impl ThreatGrid {
    /// Validate and adopt a grid export.
    pub fn from_export(export: &GridExport) -> Result<Self, GridDataError> {
        let rows = export.values.len();
        let cols = export.values.first().map_or(0, Vec::len);
        if rows != GRID_ROWS as usize || export.values.iter().any(|r| r.len() != cols) || cols != GRID_COLS as usize
        {
            return Err(GridDataError::ShapeMismatch { rows, cols });
        }

        let mut values = Vec::with_capacity(ZONE_COUNT);
        for (row_idx, row) in export.values.iter().enumerate() {
            for (col_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    let label = PitchZone::new(row_idx as u8, col_idx as u8)
                        .map(PitchZone::label)
                        .unwrap_or_default();
                    return Err(GridDataError::BadCell { label, value });
                }
                values.push(value);
            }
        }

        Ok(Self { values, attack_threshold: DEFAULT_ATTACK_THRESHOLD })
    }

    /// The grid compiled into the binary. Parsed on first access.
    pub fn embedded() -> &'static ThreatGrid {
        crate::data::embedded_grid()
    }

    /// Replace the regain attack/defense threshold.
    pub fn with_attack_threshold(mut self, threshold: f64) -> Self {
        self.attack_threshold = threshold;
        self
    }

    /// Expected threat of a zone. Total over all 96 valid zones.
    #[inline]
    pub fn threat_of(&self, zone: PitchZone) -> f64 {
        self.values[zone.index()]
    }

    /// Whether a threat value falls on the attacking side of the regain split.
    #[inline]
    pub fn is_attack_threat(&self, threat: f64) -> bool {
        threat >= self.attack_threshold
    }

    pub fn attack_threshold(&self) -> f64 {
        self.attack_threshold
    }

    /// Largest cell value, used for load-time reporting.
    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0_f64, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_export(value: f64) -> GridExport {
        GridExport {
            schema_version: "v1".to_string(),
            rows: GRID_ROWS,
            cols: GRID_COLS,
            values: vec![vec![value; GRID_COLS as usize]; GRID_ROWS as usize],
        }
    }

    #[test]
    fn test_embedded_grid_covers_every_zone() {
        let grid = ThreatGrid::embedded();
        for zone in PitchZone::all() {
            let threat = grid.threat_of(zone);
            assert!(threat.is_finite() && threat >= 0.0, "bad threat at {}", zone.label());
        }
    }

    #[test]
    fn test_embedded_grid_rises_toward_the_goal() {
        let grid = ThreatGrid::embedded();
        let own_box = PitchZone::from_label("d1").unwrap();
        let opponent_box = PitchZone::from_label("d12").unwrap();
        assert!(grid.threat_of(opponent_box) > grid.threat_of(own_box));
    }

    #[test]
    fn test_mirrored_threats_are_independent() {
        // Only the geometric transform is symmetric; a1 and h12 carry their
        // own table values.
        let grid = ThreatGrid::embedded();
        let a1 = PitchZone::from_label("a1").unwrap();
        assert_ne!(grid.threat_of(a1), grid.threat_of(a1.mirror()));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let mut export = flat_export(0.01);
        export.values.pop();
        assert!(matches!(
            ThreatGrid::from_export(&export),
            Err(GridDataError::ShapeMismatch { rows: 7, cols: 12 })
        ));
    }

    #[test]
    fn test_non_finite_cell_is_rejected() {
        let mut export = flat_export(0.01);
        export.values[2][5] = f64::NAN;
        assert!(matches!(ThreatGrid::from_export(&export), Err(GridDataError::BadCell { .. })));
    }

    #[test]
    fn test_attack_threshold_override() {
        let grid = ThreatGrid::from_export(&flat_export(0.05)).unwrap().with_attack_threshold(0.1);
        assert!(!grid.is_attack_threat(0.05));
        assert!(grid.is_attack_threat(0.1));
    }
}
