use serde::{Deserialize, Serialize};

use super::players::ActionType;
use crate::error::ValidationError;
use crate::pitch::PitchZone;

/// A completed two-click pick on the pitch. `start == end` denotes a dribble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneTransition {
    pub start: PitchZone,
    pub end: PitchZone,
}

impl ZoneTransition {
    pub fn new(start: PitchZone, end: PitchZone) -> Self {
        Self { start, end }
    }

    /// Single-zone actions are dribbles rather than passes.
    #[inline]
    pub fn is_dribble(&self) -> bool {
        self.start == self.end
    }
}

/// Progress of the two-click zone machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickState {
    #[default]
    Empty,
    FirstSet(PitchZone),
    BothSet(PitchZone, PitchZone),
}

/// The three-state zone-picking machine driving [`ZoneTransition`] creation.
///
/// `Empty -> FirstSet -> BothSet`; a click with both zones already set starts
/// a new cycle from the clicked zone, discarding the prior pair. Each click
/// also forces the action type of the surrounding modal: re-clicking the first
/// zone turns the action into a dribble, everything else into a pass.
#[derive(Debug, Clone, Default)]
pub struct ZonePick {
    state: PickState,
}

impl ZonePick {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PickState {
        self.state
    }

    /// Apply a pitch click and return the action type it forces.
    pub fn click(&mut self, zone: PitchZone) -> ActionType {
        match self.state {
            PickState::Empty => {
                self.state = PickState::FirstSet(zone);
                ActionType::Pass
            }
            PickState::FirstSet(start) if start == zone => {
                self.state = PickState::BothSet(start, start);
                ActionType::Dribble
            }
            PickState::FirstSet(start) => {
                self.state = PickState::BothSet(start, zone);
                ActionType::Pass
            }
            PickState::BothSet(..) => {
                self.state = PickState::FirstSet(zone);
                ActionType::Pass
            }
        }
    }

    /// The completed transition, if both zones are set.
    pub fn transition(&self) -> Option<ZoneTransition> {
        match self.state {
            PickState::BothSet(start, end) => Some(ZoneTransition::new(start, end)),
            _ => None,
        }
    }

    /// The completed transition, or the validation error to show when the
    /// analyst tries to save an unfinished pick.
    pub fn require_transition(&self) -> Result<ZoneTransition, ValidationError> {
        self.transition().ok_or(ValidationError::MissingZoneTransition)
    }

    /// Back to `Empty`. Called when the action is saved or the modal closed.
    pub fn reset(&mut self) {
        self.state = PickState::Empty;
    }
}
