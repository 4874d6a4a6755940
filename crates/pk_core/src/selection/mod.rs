//! Selection state machines shared by pass/dribble/defense recording.
//!
//! Two independent machines drive a tagging modal:
//! - [`PlayerSelection`]: cyclic sender/receiver picking (Attack) or a
//!   toggle-set of bypassed defenders (Defense).
//! - [`ZonePick`]: the two-click pitch machine that produces a
//!   [`ZoneTransition`].
//!
//! Both are plain in-memory state with no I/O; the modal resets them when an
//! action is saved or cancelled.

pub mod players;
pub mod zones;

pub use players::{ActionType, PlayerSelection, SelectionMode};
pub use zones::{PickState, ZonePick, ZoneTransition};
