use thiserror::Error;

/// Recoverable selection/build failures, surfaced to the user for correction.
///
/// The builder returns these instead of panicking; the UI layer decides
/// whether to show a message or silently keep the modal open.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no sender selected")]
    MissingSender,

    #[error("pass has no receiver selected")]
    MissingReceiver,

    #[error("no bypassed defender selected")]
    EmptyDefenseSelection,

    #[error("no player selected for the possession change")]
    MissingBallPlayer,

    #[error("possession change requires exactly one selected player")]
    AmbiguousBallPlayer,

    #[error("zone pick incomplete")]
    MissingZoneTransition,

    #[error("unknown player id: {0}")]
    UnknownPlayer(String),
}

impl ValidationError {
    /// All validation failures are user-correctable.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// A row/col pair outside the 8x12 grid. Indicates a caller bug rather than
/// bad user data: every zone handed out by this crate is in range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("zone out of range: row {row}, col {col}")]
pub struct ZoneRangeError {
    pub row: u32,
    pub col: u32,
}
