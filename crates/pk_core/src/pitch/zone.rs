use serde::{Deserialize, Serialize};

use crate::error::ZoneRangeError;

/// Rows across the pitch width, labelled `a..h`.
pub const GRID_ROWS: u8 = 8;
/// Columns along the direction of play, labelled `1..12`.
pub const GRID_COLS: u8 = 12;
/// Total cell count of the tagging grid.
pub const ZONE_COUNT: usize = (GRID_ROWS as usize) * (GRID_COLS as usize);

/// A single cell of the 8x12 tagging grid.
///
/// Zones are immutable value types; the only transform defined on them is
/// [`mirror`](Self::mirror), the point symmetry used to read attacking-side
/// threat for defensively tagged events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchZone {
    row: u8,
    col: u8,
}

impl PitchZone {
    /// Build a zone from 0-based indices, rejecting anything outside the grid.
    pub fn new(row: u8, col: u8) -> Result<Self, ZoneRangeError> {
        if row < GRID_ROWS && col < GRID_COLS {
            Ok(Self { row, col })
        } else {
            Err(ZoneRangeError { row: row as u32, col: col as u32 })
        }
    }

    /// 0-based row index (0 = row `a`).
    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    /// 0-based column index (0 = column `1`).
    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major cell index (0..95).
    #[inline]
    pub fn index(self) -> usize {
        (self.row as usize) * (GRID_COLS as usize) + (self.col as usize)
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx < ZONE_COUNT {
            Some(Self { row: (idx / GRID_COLS as usize) as u8, col: (idx % GRID_COLS as usize) as u8 })
        } else {
            None
        }
    }

    /// The point-symmetric counterpart of this zone.
    ///
    /// Involutive: `z.mirror().mirror() == z`.
    #[inline]
    pub fn mirror(self) -> Self {
        Self { row: GRID_ROWS - 1 - self.row, col: GRID_COLS - 1 - self.col }
    }

    /// Letter-number label, e.g. row 0 / col 0 -> `"a1"`.
    pub fn label(self) -> String {
        format!("{}{}", (b'a' + self.row) as char, self.col + 1)
    }

    /// Parse a letter-number label. Out-of-range input yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        let row_char = chars.next()?.to_ascii_lowercase();
        if !row_char.is_ascii_lowercase() {
            return None;
        }
        let row = (row_char as u8).checked_sub(b'a')?;
        let col_number: u8 = chars.as_str().parse().ok()?;
        let col = col_number.checked_sub(1)?;
        Self::new(row, col).ok()
    }

    /// Iterate all 96 zones in row-major order.
    pub fn all() -> impl Iterator<Item = PitchZone> {
        (0..ZONE_COUNT).map(|idx| Self::from_index(idx).unwrap())
    }
}
