//! Shot events and the expected-goals pipeline.
//!
//! A shot's stored xG is derived from the analyst's base estimate by a fixed
//! modifier pipeline ([`xg::final_xg`]); reopening a stored shot for editing
//! runs the exact inverse ([`xg::base_from_final`]). Rebounds form a
//! singly-linked chain walked cycle-safely in [`chain`].

pub mod chain;
pub mod xg;

use serde::{Deserialize, Serialize};

use crate::{MatchId, PlayerId, ShotId};

pub use chain::{ChainIntegrityWarning, ChainWalk, TruncationReason, MAX_CHAIN_DEPTH};
pub use xg::{base_from_final, final_xg, ShotParams, XgOutcome};

/// Body part used for the attempt. Non-foot attempts are penalized in the
/// pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Foot,
    Head,
    Other,
}

impl BodyPart {
    /// Headers and miscellaneous body parts share the same penalty.
    #[inline]
    pub fn is_non_foot(self) -> bool {
        !matches!(self, BodyPart::Foot)
    }
}

/// How a direct free kick was resolved: shot at goal, or a rehearsed
/// combination before the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeKickStyle {
    Direct,
    Combination,
}

/// Set-piece context of a shot, when it did not arise from open play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetPiece {
    Corner,
    ThrowIn,
    Penalty,
    FreeKick { style: FreeKickStyle },
}

impl SetPiece {
    /// Only a free kick struck directly gets the conversion bonus.
    #[inline]
    pub fn is_direct_free_kick(self) -> bool {
        matches!(self, SetPiece::FreeKick { style: FreeKickStyle::Direct })
    }
}

/// A stored shot. Created on save, mutated only by full replace on edit,
/// deleted by id.
///
/// `previous_shot_id` links a rebound to the attempt it followed; the stored
/// `xg_percent` is the pipeline output, not the analyst's base estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    /// Empty until the store mints an id on append.
    #[serde(default)]
    pub id: ShotId,
    pub match_id: MatchId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shooter_id: Option<PlayerId>,
    pub minute: u8,
    pub is_second_half: bool,
    /// Pitch coordinates in percent of pitch length/width, 0..100.
    pub x: f64,
    pub y: f64,
    pub body_part: BodyPart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_piece: Option<SetPiece>,
    /// Defenders on the goal line at the moment of the shot.
    pub line_defenders: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_shot_id: Option<ShotId>,
    pub is_goal: bool,
    /// Final expected-goals percent as stored, already run through the
    /// modifier pipeline.
    pub xg_percent: i32,
}

impl ShotEvent {
    /// The pipeline modifiers of this stored shot, for re-running or
    /// inverting its xG.
    pub fn params(&self) -> ShotParams {
        ShotParams {
            base_xg_percent: 0,
            body_part: self.body_part,
            set_piece: self.set_piece,
            line_defenders: self.line_defenders,
            previous_shot_id: self.previous_shot_id.clone(),
        }
    }

    /// Stored percent as a probability in 0..1 for downstream consumers.
    #[inline]
    pub fn xg_probability(&self) -> f64 {
        self.xg_percent as f64 / 100.0
    }
}
