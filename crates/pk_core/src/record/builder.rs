use super::{
    ActionRecord, ContactCount, LosesRecord, PackingMode, PackingRecord, PhaseFlags, RecordCore,
    RegainRecord,
};
use crate::error::ValidationError;
use crate::pitch::{PitchZone, ThreatGrid};
use crate::selection::{PlayerSelection, SelectionMode, ZoneTransition};
use crate::store::RosterProvider;
use crate::MatchId;

/// Match-level context every record is tagged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagContext {
    pub match_id: MatchId,
    pub minute: u8,
    pub is_second_half: bool,
}

/// Analyst-entered extras for a packing record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackingDetails {
    pub phase_start: PhaseFlags,
    pub phase_end: PhaseFlags,
    pub contacts: Option<ContactCount>,
    pub is_shot: bool,
    pub is_goal: bool,
    pub is_penalty_area_entry: bool,
}

/// Analyst-entered extras for a regain record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegainDetails {
    pub behind_ball_count: u32,
    pub left_field_count: u32,
}

/// Analyst-entered extras for a loses record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LosesDetails {
    pub quick_reaction: bool,
    pub out_of_play: bool,
}

/// Assembles category-specific records from selection state and a completed
/// zone pick.
///
/// Validation happens before any record is built; failures come back as
/// [`ValidationError`] values naming the missing field, and the caller
/// decides whether to surface them or retry.
pub struct ActionRecordBuilder<'a> {
    grid: &'a ThreatGrid,
    roster: Option<&'a dyn RosterProvider>,
}

impl<'a> ActionRecordBuilder<'a> {
    pub fn new(grid: &'a ThreatGrid) -> Self {
        Self { grid, roster: None }
    }

    /// Validate selected player ids against a roster before building.
    pub fn with_roster(mut self, roster: &'a dyn RosterProvider) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Build a packing record (Attack or Defense mode per the selection).
    pub fn build_packing(
        &self,
        ctx: &TagContext,
        selection: &PlayerSelection,
        transition: ZoneTransition,
        details: &PackingDetails,
    ) -> Result<ActionRecord, ValidationError> {
        let mode = match selection.mode() {
            SelectionMode::Attack => PackingMode::Attack,
            SelectionMode::Defense => PackingMode::Defense,
        };

        let (sender_id, receiver_id, defense_player_ids, packing_points) = match mode {
            PackingMode::Attack => {
                let sender = selection.sender().ok_or(ValidationError::MissingSender)?;
                let receiver = if transition.is_dribble() {
                    None
                } else {
                    Some(selection.receiver().ok_or(ValidationError::MissingReceiver)?)
                };
                self.check_player(&ctx.match_id, sender)?;
                if let Some(receiver) = receiver {
                    self.check_player(&ctx.match_id, receiver)?;
                }
                (
                    Some(sender.to_string()),
                    receiver.map(str::to_string),
                    Vec::new(),
                    selection.packing_points(),
                )
            }
            PackingMode::Defense => {
                if selection.defenders().is_empty() {
                    return Err(ValidationError::EmptyDefenseSelection);
                }
                for defender in selection.defenders() {
                    self.check_player(&ctx.match_id, defender)?;
                }
                let defenders: Vec<_> = selection.defenders().iter().cloned().collect();
                let points = defenders.len() as u32;
                (None, None, defenders, points)
            }
        };

        Ok(ActionRecord::Packing(PackingRecord {
            core: self.core(ctx, sender_id, receiver_id, transition),
            mode,
            packing_points,
            xt_start: self.grid.threat_of(transition.start),
            xt_end: self.grid.threat_of(transition.end),
            phase_start: details.phase_start,
            phase_end: details.phase_end,
            contacts: details.contacts,
            // A goal is always a shot, whatever the toggles said
            is_shot: details.is_shot || details.is_goal,
            is_goal: details.is_goal,
            is_penalty_area_entry: details.is_penalty_area_entry,
            defense_player_ids,
        }))
    }

    /// Build a regain record. The clicked zone is the defending side; the
    /// attacking-side threat is read from its mirror.
    pub fn build_regain(
        &self,
        ctx: &TagContext,
        selection: &PlayerSelection,
        transition: ZoneTransition,
        details: &RegainDetails,
    ) -> Result<ActionRecord, ValidationError> {
        let player = self.single_player(ctx, selection)?;
        let (defense_zone, attack_zone) = Self::mirrored_pair(transition);
        let attack_xt = self.grid.threat_of(attack_zone);

        Ok(ActionRecord::Regain(RegainRecord {
            core: self.core(ctx, Some(player), None, transition),
            attack_zone,
            defense_zone,
            attack_xt,
            defense_xt: self.grid.threat_of(defense_zone),
            is_attack: self.grid.is_attack_threat(attack_xt),
            behind_ball_count: details.behind_ball_count,
            left_field_count: details.left_field_count,
        }))
    }

    /// Build a loses record; same mirrored zone pair as a regain, no
    /// attack/defense derivation.
    pub fn build_loses(
        &self,
        ctx: &TagContext,
        selection: &PlayerSelection,
        transition: ZoneTransition,
        details: &LosesDetails,
    ) -> Result<ActionRecord, ValidationError> {
        let player = self.single_player(ctx, selection)?;
        let (defense_zone, attack_zone) = Self::mirrored_pair(transition);

        Ok(ActionRecord::Loses(LosesRecord {
            core: self.core(ctx, Some(player), None, transition),
            attack_zone,
            defense_zone,
            attack_xt: self.grid.threat_of(attack_zone),
            defense_xt: self.grid.threat_of(defense_zone),
            quick_reaction: details.quick_reaction,
            out_of_play: details.out_of_play,
        }))
    }

    fn core(
        &self,
        ctx: &TagContext,
        sender_id: Option<String>,
        receiver_id: Option<String>,
        transition: ZoneTransition,
    ) -> RecordCore {
        RecordCore {
            id: None,
            match_id: ctx.match_id.clone(),
            minute: ctx.minute,
            is_second_half: ctx.is_second_half,
            sender_id,
            receiver_id,
            zone: transition,
            schema_version: crate::SCHEMA_VERSION,
            created_at: None,
        }
    }

    /// Regain/Loses are tagged on exactly one player: the ball receiver or
    /// ball loser.
    fn single_player(
        &self,
        ctx: &TagContext,
        selection: &PlayerSelection,
    ) -> Result<String, ValidationError> {
        let player = selection.sender().ok_or(ValidationError::MissingBallPlayer)?;
        if selection.receiver().is_some() {
            return Err(ValidationError::AmbiguousBallPlayer);
        }
        self.check_player(&ctx.match_id, player)?;
        Ok(player.to_string())
    }

    fn mirrored_pair(transition: ZoneTransition) -> (PitchZone, PitchZone) {
        let defense_zone = transition.end;
        (defense_zone, defense_zone.mirror())
    }

    fn check_player(&self, match_id: &str, player_id: &str) -> Result<(), ValidationError> {
        match self.roster {
            Some(roster) if !roster.has_player(match_id, player_id) => {
                Err(ValidationError::UnknownPlayer(player_id.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::ZonePick;
    use crate::store::{MemoryStore, Player};

    fn ctx() -> TagContext {
        TagContext { match_id: "m1".to_string(), minute: 61, is_second_half: true }
    }

    fn pass_transition() -> ZoneTransition {
        let mut picks = ZonePick::new();
        picks.click(PitchZone::from_label("c3").unwrap());
        picks.click(PitchZone::from_label("e8").unwrap());
        picks.transition().unwrap()
    }

    fn dribble_transition(label: &str) -> ZoneTransition {
        let zone = PitchZone::from_label(label).unwrap();
        ZoneTransition::new(zone, zone)
    }

    #[test]
    fn test_attack_pass_requires_sender_and_receiver() {
        let grid = ThreatGrid::embedded();
        let builder = ActionRecordBuilder::new(grid);
        let mut selection = PlayerSelection::new(SelectionMode::Attack);

        let err = builder
            .build_packing(&ctx(), &selection, pass_transition(), &PackingDetails::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingSender);

        selection.click_player("p10");
        let err = builder
            .build_packing(&ctx(), &selection, pass_transition(), &PackingDetails::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingReceiver);

        selection.click_player("p9");
        let record = builder
            .build_packing(&ctx(), &selection, pass_transition(), &PackingDetails::default())
            .unwrap();
        assert_eq!(record.core().sender_id.as_deref(), Some("p10"));
        assert_eq!(record.core().receiver_id.as_deref(), Some("p9"));
    }

    #[test]
    fn test_dribble_needs_no_receiver() {
        let grid = ThreatGrid::embedded();
        let builder = ActionRecordBuilder::new(grid);
        let mut selection = PlayerSelection::new(SelectionMode::Attack);
        selection.click_player("p10");

        let record = builder
            .build_packing(&ctx(), &selection, dribble_transition("d6"), &PackingDetails::default())
            .unwrap();
        assert_eq!(record.core().receiver_id, None);
    }

    #[test]
    fn test_defense_packing_requires_defenders_and_counts_them() {
        let grid = ThreatGrid::embedded();
        let builder = ActionRecordBuilder::new(grid);
        let mut selection = PlayerSelection::new(SelectionMode::Defense);

        let err = builder
            .build_packing(&ctx(), &selection, pass_transition(), &PackingDetails::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyDefenseSelection);

        selection.click_player("d2");
        selection.click_player("d5");
        let record = builder
            .build_packing(&ctx(), &selection, pass_transition(), &PackingDetails::default())
            .unwrap();
        let ActionRecord::Packing(ref packing) = record else { panic!("expected packing") };
        assert_eq!(packing.mode, PackingMode::Defense);
        assert_eq!(packing.packing_points, 2);
        assert_eq!(packing.defense_player_ids.len(), 2);
        assert_eq!(record.core().sender_id, None);
    }

    #[test]
    fn test_goal_implies_shot() {
        let grid = ThreatGrid::embedded();
        let builder = ActionRecordBuilder::new(grid);
        let mut selection = PlayerSelection::new(SelectionMode::Attack);
        selection.click_player("p10");

        let details = PackingDetails { is_goal: true, is_shot: false, ..Default::default() };
        let record = builder
            .build_packing(&ctx(), &selection, dribble_transition("e11"), &details)
            .unwrap();
        let ActionRecord::Packing(ref packing) = record else { panic!("expected packing") };
        assert!(packing.is_shot, "a goal is always a shot");
        assert!(packing.is_goal);
    }

    #[test]
    fn test_regain_requires_exactly_one_player() {
        let grid = ThreatGrid::embedded();
        let builder = ActionRecordBuilder::new(grid);
        let mut selection = PlayerSelection::new(SelectionMode::Attack);

        let err = builder
            .build_regain(&ctx(), &selection, dribble_transition("b2"), &RegainDetails::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingBallPlayer);

        selection.click_player("p7");
        selection.click_player("p9");
        let err = builder
            .build_regain(&ctx(), &selection, dribble_transition("b2"), &RegainDetails::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::AmbiguousBallPlayer);
    }

    #[test]
    fn test_regain_attack_flag_follows_threshold() {
        let grid = ThreatGrid::embedded();
        let builder = ActionRecordBuilder::new(grid);
        let mut selection = PlayerSelection::new(SelectionMode::Attack);
        selection.click_player("p7");

        // Clicked deep in the defending corner: mirror lands near the
        // opponent goal, well above the threshold.
        let record = builder
            .build_regain(&ctx(), &selection, dribble_transition("a2"), &RegainDetails::default())
            .unwrap();
        let ActionRecord::Regain(ref regain) = record else { panic!("expected regain") };
        assert!(regain.is_attack);

        // Clicked near the opponent goal: mirror lands by our own corner
        // flag, far below it.
        let record = builder
            .build_regain(&ctx(), &selection, dribble_transition("h11"), &RegainDetails::default())
            .unwrap();
        let ActionRecord::Regain(ref regain) = record else { panic!("expected regain") };
        assert!(!regain.is_attack);
    }

    #[test]
    fn test_loses_mirrors_zone_without_attack_derivation() {
        let grid = ThreatGrid::embedded();
        let builder = ActionRecordBuilder::new(grid);
        let mut selection = PlayerSelection::new(SelectionMode::Attack);
        selection.click_player("p7");

        let clicked = PitchZone::from_label("c4").unwrap();
        let record = builder
            .build_loses(
                &ctx(),
                &selection,
                dribble_transition("c4"),
                &LosesDetails { quick_reaction: true, out_of_play: false },
            )
            .unwrap();
        let ActionRecord::Loses(ref loses) = record else { panic!("expected loses") };
        assert_eq!(loses.defense_zone, clicked);
        assert_eq!(loses.attack_zone, clicked.mirror());
        assert_eq!(loses.attack_xt, grid.threat_of(clicked.mirror()));
        assert!(loses.quick_reaction);
    }

    #[test]
    fn test_roster_validation_rejects_unknown_ids() {
        let mut store = MemoryStore::new();
        store.set_roster("m1", vec![Player::new("p10", "Playmaker", "AM")]);

        let grid = ThreatGrid::embedded();
        let builder = ActionRecordBuilder::new(grid).with_roster(&store);
        let mut selection = PlayerSelection::new(SelectionMode::Attack);
        selection.click_player("ghost");

        let err = builder
            .build_regain(&ctx(), &selection, dribble_transition("b2"), &RegainDetails::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownPlayer("ghost".to_string()));
    }
}
