//! # pk_core - Pitch Valuation & Shot-Chain Engine
//!
//! This library is the computation core of a football match-tagging tool:
//! it turns raw analyst picks (pitch zones, player clicks, shot coordinates,
//! rebound chains, action modifiers) into the quantitative fields persisted
//! with each event.
//!
//! ## Features
//! - 8x12 expected-threat (xT) grid with point-symmetric zone mirroring
//! - Cyclic sender/receiver/zone selection state machines
//! - Reversible expected-goals (xG) pipeline with cycle-safe rebound chains
//! - Category-gated record assembly (packing / regain / loses)
//!
//! All computations are pure and synchronous; persistence and rosters are
//! behind the traits in [`store`].

pub mod data;
pub mod error;
pub mod pitch;
pub mod record;
pub mod selection;
pub mod shot;
pub mod store;

// Re-export the main engine surface
pub use error::{ValidationError, ZoneRangeError};
pub use pitch::{PitchZone, ThreatGrid, DEFAULT_ATTACK_THRESHOLD};
pub use record::{
    ActionCategory, ActionRecord, ActionRecordBuilder, Collection, ContactCount, LosesRecord,
    PackingMode, PackingRecord, PhaseFlags, RecordCore, RegainRecord, TagContext,
};
pub use selection::{
    ActionType, PickState, PlayerSelection, SelectionMode, ZonePick, ZoneTransition,
};
pub use shot::{
    base_from_final, final_xg, BodyPart, ChainIntegrityWarning, ChainWalk, FreeKickStyle, SetPiece,
    ShotEvent, ShotParams, TruncationReason, XgOutcome, MAX_CHAIN_DEPTH,
};
pub use store::{
    EventStore, MemoryStore, Player, RosterProvider, ShotLookup, ShotStore, StoreError,
};

/// Player identity as issued by the roster provider.
pub type PlayerId = String;
/// Match identity as issued by the persistence layer.
pub type MatchId = String;
/// Stored record identity, minted by the store on append.
pub type RecordId = String;
/// Stored shot identity, minted by the store on append.
pub type ShotId = String;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
