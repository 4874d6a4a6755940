//! Boundary contracts to the collaborators outside the engine.
//!
//! The engine never talks to a database or network directly: record
//! persistence, rosters and ancestor lookup all go through the traits here.
//! [`MemoryStore`] is the in-memory reference implementation used by tests;
//! a remote store would implement the same traits.

pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{ActionRecord, Collection};
use crate::shot::ShotEvent;
use crate::{PlayerId, RecordId, ShotId};

pub use memory::MemoryStore;

/// Store-side failures. Appends cannot fail in memory; replace/delete report
/// missing targets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no {collection} record with id {id}")]
    RecordNotFound { collection: &'static str, id: RecordId },

    #[error("no shot with id {id}")]
    ShotNotFound { id: ShotId },
}

impl StoreError {
    /// Missing targets usually mean a concurrent delete; safe to surface and
    /// retry from a fresh listing.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// Persistence service for action records, keyed by match and collection.
///
/// The engine treats this as an opaque, eventually-consistent store: it
/// appends, replaces, deletes and lists, and never retries on its own.
pub trait EventStore {
    /// Store a new record, minting and returning its id.
    fn append_record(&mut self, record: ActionRecord) -> Result<RecordId, StoreError>;

    /// Replace a stored record wholesale. Edits are full replaces, never
    /// field-level patches.
    fn replace_record(&mut self, id: &str, record: ActionRecord) -> Result<(), StoreError>;

    fn delete_record(
        &mut self,
        match_id: &str,
        collection: Collection,
        id: &str,
    ) -> Result<(), StoreError>;

    fn list_records(&self, match_id: &str, collection: Collection) -> Vec<ActionRecord>;
}

/// Persistence service for shots, one logical collection per match.
pub trait ShotStore {
    fn append_shot(&mut self, shot: ShotEvent) -> Result<ShotId, StoreError>;

    fn replace_shot(&mut self, shot: ShotEvent) -> Result<(), StoreError>;

    fn delete_shot(&mut self, match_id: &str, id: &str) -> Result<(), StoreError>;

    fn shots_for_match(&self, match_id: &str) -> Vec<ShotEvent>;
}

/// Ancestor lookup for the shot-chain walk, scoped to one match's shot list.
pub trait ShotLookup {
    fn shot_by_id(&self, id: &str) -> Option<ShotEvent>;
}

/// A squad member as supplied by the roster collaborator. The engine does not
/// own player data; it only checks that selected ids exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
}

impl Player {
    pub fn new(id: &str, name: &str, position: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string(), position: position.to_string() }
    }
}

/// Roster collaborator.
pub trait RosterProvider {
    fn players_for_match(&self, match_id: &str) -> Vec<Player>;

    fn has_player(&self, match_id: &str, player_id: &str) -> bool {
        self.players_for_match(match_id).iter().any(|player| player.id == player_id)
    }
}

/// Scopes a [`ShotStore`] to one match, which is the shape the chain walk
/// expects: `shot_by_id` only ever resolves within the current match's shots.
#[derive(Debug, Clone, Copy)]
pub struct MatchShots<'a, S: ?Sized> {
    store: &'a S,
    match_id: &'a str,
}

impl<'a, S: ShotStore + ?Sized> MatchShots<'a, S> {
    pub fn new(store: &'a S, match_id: &'a str) -> Self {
        Self { store, match_id }
    }
}

impl<S: ShotStore + ?Sized> ShotLookup for MatchShots<'_, S> {
    fn shot_by_id(&self, id: &str) -> Option<ShotEvent> {
        self.store.shots_for_match(self.match_id).into_iter().find(|shot| shot.id == id)
    }
}
