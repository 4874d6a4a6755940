use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{EventStore, Player, RosterProvider, ShotLookup, ShotStore, StoreError};
use crate::record::{ActionRecord, Collection};
use crate::shot::ShotEvent;
use crate::{MatchId, RecordId, ShotId};

/// In-memory store: the reference implementation of the persistence
/// boundary.
///
/// Records live in disjoint per-(match, collection) lists, shots in one list
/// per match, mirroring the logical collections a remote store would use.
/// Ids are minted on append; replaces keep the original id and creation
/// stamp.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<(MatchId, Collection), Vec<ActionRecord>>,
    shots: HashMap<MatchId, Vec<ShotEvent>>,
    rosters: HashMap<MatchId, Vec<Player>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the roster for a match.
    pub fn set_roster(&mut self, match_id: &str, players: Vec<Player>) {
        self.rosters.insert(match_id.to_string(), players);
    }

    /// A [`ShotLookup`] scoped to one match, for the chain walk.
    pub fn shot_lookup<'a>(&'a self, match_id: &'a str) -> super::MatchShots<'a, Self> {
        super::MatchShots::new(self, match_id)
    }

    fn mint_id() -> String {
        Uuid::new_v4().to_string()
    }
}

impl EventStore for MemoryStore {
    fn append_record(&mut self, mut record: ActionRecord) -> Result<RecordId, StoreError> {
        let id = Self::mint_id();
        let collection = record.collection();
        let core = record.core_mut();
        core.id = Some(id.clone());
        core.created_at = Some(Utc::now());

        let key = (core.match_id.clone(), collection);
        self.records.entry(key).or_default().push(record);
        log::debug!("[Store] appended {} record {}", collection.as_str(), id);
        Ok(id)
    }

    fn replace_record(&mut self, id: &str, mut record: ActionRecord) -> Result<(), StoreError> {
        let collection = record.collection();
        let key = (record.match_id().to_string(), collection);
        let slot = self
            .records
            .get_mut(&key)
            .and_then(|list| list.iter_mut().find(|stored| stored.id() == Some(id)))
            .ok_or_else(|| StoreError::RecordNotFound {
                collection: collection.as_str(),
                id: id.to_string(),
            })?;

        // Full replace; identity and creation stamp survive the edit.
        record.core_mut().id = Some(id.to_string());
        record.core_mut().created_at = slot.core().created_at;
        *slot = record;
        log::debug!("[Store] replaced {} record {}", collection.as_str(), id);
        Ok(())
    }

    fn delete_record(
        &mut self,
        match_id: &str,
        collection: Collection,
        id: &str,
    ) -> Result<(), StoreError> {
        let key = (match_id.to_string(), collection);
        let list = self.records.get_mut(&key).ok_or_else(|| StoreError::RecordNotFound {
            collection: collection.as_str(),
            id: id.to_string(),
        })?;
        let before = list.len();
        list.retain(|record| record.id() != Some(id));
        if list.len() == before {
            return Err(StoreError::RecordNotFound {
                collection: collection.as_str(),
                id: id.to_string(),
            });
        }
        log::debug!("[Store] deleted {} record {}", collection.as_str(), id);
        Ok(())
    }

    fn list_records(&self, match_id: &str, collection: Collection) -> Vec<ActionRecord> {
        self.records
            .get(&(match_id.to_string(), collection))
            .cloned()
            .unwrap_or_default()
    }
}

impl ShotStore for MemoryStore {
    fn append_shot(&mut self, mut shot: ShotEvent) -> Result<ShotId, StoreError> {
        let id = Self::mint_id();
        shot.id = id.clone();
        self.shots.entry(shot.match_id.clone()).or_default().push(shot);
        log::debug!("[Store] appended shot {}", id);
        Ok(id)
    }

    fn replace_shot(&mut self, shot: ShotEvent) -> Result<(), StoreError> {
        let slot = self
            .shots
            .get_mut(&shot.match_id)
            .and_then(|list| list.iter_mut().find(|stored| stored.id == shot.id))
            .ok_or_else(|| StoreError::ShotNotFound { id: shot.id.clone() })?;
        log::debug!("[Store] replaced shot {}", shot.id);
        *slot = shot;
        Ok(())
    }

    fn delete_shot(&mut self, match_id: &str, id: &str) -> Result<(), StoreError> {
        let list = self
            .shots
            .get_mut(match_id)
            .ok_or_else(|| StoreError::ShotNotFound { id: id.to_string() })?;
        let before = list.len();
        list.retain(|shot| shot.id != id);
        if list.len() == before {
            return Err(StoreError::ShotNotFound { id: id.to_string() });
        }
        log::debug!("[Store] deleted shot {}", id);
        Ok(())
    }

    fn shots_for_match(&self, match_id: &str) -> Vec<ShotEvent> {
        self.shots.get(match_id).cloned().unwrap_or_default()
    }
}

impl ShotLookup for MemoryStore {
    /// Unscoped lookup across all matches; prefer
    /// [`shot_lookup`](MemoryStore::shot_lookup) in engine paths.
    fn shot_by_id(&self, id: &str) -> Option<ShotEvent> {
        self.shots.values().flatten().find(|shot| shot.id == id).cloned()
    }
}

impl RosterProvider for MemoryStore {
    fn players_for_match(&self, match_id: &str) -> Vec<Player> {
        self.rosters.get(match_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchZone;
    use crate::record::{LosesRecord, RecordCore, RegainRecord};
    use crate::selection::ZoneTransition;
    use crate::shot::BodyPart;

    fn core(match_id: &str) -> RecordCore {
        let zone = PitchZone::from_label("c3").unwrap();
        RecordCore {
            id: None,
            match_id: match_id.to_string(),
            minute: 20,
            is_second_half: false,
            sender_id: Some("p7".to_string()),
            receiver_id: None,
            zone: ZoneTransition::new(zone, zone),
            schema_version: crate::SCHEMA_VERSION,
            created_at: None,
        }
    }

    fn regain(match_id: &str) -> ActionRecord {
        let defense_zone = PitchZone::from_label("c3").unwrap();
        ActionRecord::Regain(RegainRecord {
            core: core(match_id),
            attack_zone: defense_zone.mirror(),
            defense_zone,
            attack_xt: 0.05,
            defense_xt: 0.01,
            is_attack: true,
            behind_ball_count: 0,
            left_field_count: 0,
        })
    }

    fn loses(match_id: &str) -> ActionRecord {
        let defense_zone = PitchZone::from_label("d5").unwrap();
        ActionRecord::Loses(LosesRecord {
            core: core(match_id),
            attack_zone: defense_zone.mirror(),
            defense_zone,
            attack_xt: 0.03,
            defense_xt: 0.02,
            quick_reaction: false,
            out_of_play: false,
        })
    }

    fn shot(match_id: &str, prev: Option<&str>) -> ShotEvent {
        ShotEvent {
            id: String::new(),
            match_id: match_id.to_string(),
            shooter_id: None,
            minute: 30,
            is_second_half: false,
            x: 85.0,
            y: 40.0,
            body_part: BodyPart::Foot,
            set_piece: None,
            line_defenders: 0,
            previous_shot_id: prev.map(str::to_string),
            is_goal: false,
            xg_percent: 20,
        }
    }

    #[test]
    fn test_append_mints_id_and_stamps_creation() {
        let mut store = MemoryStore::new();
        let id = store.append_record(regain("m1")).unwrap();
        let listed = store.list_records("m1", Collection::Regain);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), Some(id.as_str()));
        assert!(listed[0].core().created_at.is_some());
    }

    #[test]
    fn test_collections_are_disjoint() {
        let mut store = MemoryStore::new();
        store.append_record(regain("m1")).unwrap();
        store.append_record(loses("m1")).unwrap();

        assert_eq!(store.list_records("m1", Collection::Regain).len(), 1);
        assert_eq!(store.list_records("m1", Collection::Loses).len(), 1);
        assert!(store.list_records("m1", Collection::Packing).is_empty());
        assert!(store.list_records("m2", Collection::Regain).is_empty());
    }

    #[test]
    fn test_replace_keeps_id_and_created_at() {
        let mut store = MemoryStore::new();
        let id = store.append_record(regain("m1")).unwrap();
        let created_at = store.list_records("m1", Collection::Regain)[0].core().created_at;

        let mut edited = regain("m1");
        if let ActionRecord::Regain(ref mut inner) = edited {
            inner.behind_ball_count = 6;
        }
        store.replace_record(&id, edited).unwrap();

        let listed = store.list_records("m1", Collection::Regain);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), Some(id.as_str()));
        assert_eq!(listed[0].core().created_at, created_at);
        let ActionRecord::Regain(ref inner) = listed[0] else { panic!("expected regain") };
        assert_eq!(inner.behind_ball_count, 6);
    }

    #[test]
    fn test_replace_unknown_id_fails() {
        let mut store = MemoryStore::new();
        let err = store.replace_record("missing", regain("m1")).unwrap_err();
        assert!(matches!(err, StoreError::RecordNotFound { collection: "regain", .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_delete_removes_only_the_target() {
        let mut store = MemoryStore::new();
        let first = store.append_record(regain("m1")).unwrap();
        let second = store.append_record(regain("m1")).unwrap();

        store.delete_record("m1", Collection::Regain, &first).unwrap();
        let listed = store.list_records("m1", Collection::Regain);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), Some(second.as_str()));

        assert!(store.delete_record("m1", Collection::Regain, &first).is_err());
    }

    #[test]
    fn test_shot_lookup_is_match_scoped() {
        let mut store = MemoryStore::new();
        let id_m1 = store.append_shot(shot("m1", None)).unwrap();
        let id_m2 = store.append_shot(shot("m2", None)).unwrap();

        let lookup = store.shot_lookup("m1");
        assert!(lookup.shot_by_id(&id_m1).is_some());
        assert!(lookup.shot_by_id(&id_m2).is_none(), "other matches are invisible");
    }

    #[test]
    fn test_shot_replace_and_delete() {
        let mut store = MemoryStore::new();
        let id = store.append_shot(shot("m1", None)).unwrap();

        let mut edited = shot("m1", None);
        edited.id = id.clone();
        edited.xg_percent = 45;
        store.replace_shot(edited).unwrap();
        assert_eq!(store.shot_lookup("m1").shot_by_id(&id).unwrap().xg_percent, 45);

        store.delete_shot("m1", &id).unwrap();
        assert!(store.shots_for_match("m1").is_empty());
        assert!(matches!(store.delete_shot("m1", &id), Err(StoreError::ShotNotFound { .. })));
    }

    #[test]
    fn test_roster_provider_membership() {
        let mut store = MemoryStore::new();
        store.set_roster("m1", vec![Player::new("p1", "Keeper", "GK")]);
        assert!(store.has_player("m1", "p1"));
        assert!(!store.has_player("m1", "p2"));
        assert!(!store.has_player("m2", "p1"));
    }
}
