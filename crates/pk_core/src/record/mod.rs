//! Persisted action records.
//!
//! Three record variants share a spine ([`RecordCore`]) and differ in their
//! category-specific payload. The category tag is carried explicitly on every
//! record from creation; it is never inferred from which optional fields
//! happen to be present.

pub mod builder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pitch::PitchZone;
use crate::selection::ZoneTransition;
use crate::{MatchId, PlayerId, RecordId};

pub use builder::{ActionRecordBuilder, LosesDetails, PackingDetails, RegainDetails, TagContext};

/// Event category, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Packing,
    Regain,
    Loses,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 3] =
        [ActionCategory::Packing, ActionCategory::Regain, ActionCategory::Loses];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Packing => "packing",
            ActionCategory::Regain => "regain",
            ActionCategory::Loses => "loses",
        }
    }
}

/// Logical store collection. Attack and defense packing are persisted apart,
/// so a category does not always map to a single collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Packing,
    Unpacking,
    Regain,
    Loses,
}

impl Collection {
    pub const ALL: [Collection; 4] =
        [Collection::Packing, Collection::Unpacking, Collection::Regain, Collection::Loses];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Packing => "packing",
            Collection::Unpacking => "unpacking",
            Collection::Regain => "regain",
            Collection::Loses => "loses",
        }
    }
}

/// Which side of a packing action was tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    Attack,
    Defense,
}

/// Build-up phase markers for the start and end zones of a packing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhaseFlags {
    pub p0: bool,
    pub p1: bool,
    pub p2: bool,
    pub p3: bool,
}

/// Opponent contacts during the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactCount {
    One,
    Two,
    ThreePlus,
}

/// Fields shared by all record variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordCore {
    /// Empty until the store mints an id on append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub match_id: MatchId,
    pub minute: u8,
    pub is_second_half: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<PlayerId>,
    pub zone: ZoneTransition,
    pub schema_version: u8,
    /// Stamped by the store on append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A valued ball-progression action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingRecord {
    #[serde(flatten)]
    pub core: RecordCore,
    pub mode: PackingMode,
    /// Opponents bypassed. In Defense mode this always equals the number of
    /// tagged defenders.
    pub packing_points: u32,
    pub xt_start: f64,
    pub xt_end: f64,
    pub phase_start: PhaseFlags,
    pub phase_end: PhaseFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<ContactCount>,
    pub is_shot: bool,
    pub is_goal: bool,
    pub is_penalty_area_entry: bool,
    /// Defense mode only: the bypassed defenders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defense_player_ids: Vec<PlayerId>,
}

/// A regained possession, tagged where the defending team won the ball.
///
/// `attack_zone` is always the mirrored counterpart of `defense_zone`; the
/// attacking-side threat is read from the opposite cell, never from the
/// clicked one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegainRecord {
    #[serde(flatten)]
    pub core: RecordCore,
    pub attack_zone: PitchZone,
    pub defense_zone: PitchZone,
    pub attack_xt: f64,
    pub defense_xt: f64,
    /// Whether the mirrored threat clears the attack/defense split.
    pub is_attack: bool,
    pub behind_ball_count: u32,
    pub left_field_count: u32,
}

/// A lost possession; same mirrored zone pair as [`RegainRecord`], no
/// attack/defense derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LosesRecord {
    #[serde(flatten)]
    pub core: RecordCore,
    pub attack_zone: PitchZone,
    pub defense_zone: PitchZone,
    pub attack_xt: f64,
    pub defense_xt: f64,
    /// Possession was chased back inside the tagging window.
    pub quick_reaction: bool,
    /// The ball left play after the loss.
    pub out_of_play: bool,
}

/// One persisted tagging event. The serialized form carries the category as
/// an explicit `category` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ActionRecord {
    Packing(PackingRecord),
    Regain(RegainRecord),
    Loses(LosesRecord),
}

impl ActionRecord {
    pub fn category(&self) -> ActionCategory {
        match self {
            ActionRecord::Packing(_) => ActionCategory::Packing,
            ActionRecord::Regain(_) => ActionCategory::Regain,
            ActionRecord::Loses(_) => ActionCategory::Loses,
        }
    }

    /// The store collection this record belongs to. Defense packing lands in
    /// its own collection.
    pub fn collection(&self) -> Collection {
        match self {
            ActionRecord::Packing(packing) => match packing.mode {
                PackingMode::Attack => Collection::Packing,
                PackingMode::Defense => Collection::Unpacking,
            },
            ActionRecord::Regain(_) => Collection::Regain,
            ActionRecord::Loses(_) => Collection::Loses,
        }
    }

    pub fn core(&self) -> &RecordCore {
        match self {
            ActionRecord::Packing(record) => &record.core,
            ActionRecord::Regain(record) => &record.core,
            ActionRecord::Loses(record) => &record.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut RecordCore {
        match self {
            ActionRecord::Packing(record) => &mut record.core,
            ActionRecord::Regain(record) => &mut record.core,
            ActionRecord::Loses(record) => &mut record.core,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.core().id.as_deref()
    }

    pub fn match_id(&self) -> &str {
        &self.core().match_id
    }
}
