//! Pitch geometry and valuation.
//!
//! The pitch is an 8x12 grid of cells: rows `a..h` across the width, columns
//! `1..12` along the direction of play. Each cell carries a precomputed
//! expected-threat (xT) value supplied by [`ThreatGrid`].

pub mod threat;
pub mod zone;

pub use threat::{GridDataError, ThreatGrid, DEFAULT_ATTACK_THRESHOLD};
pub use zone::{PitchZone, GRID_COLS, GRID_ROWS, ZONE_COUNT};
