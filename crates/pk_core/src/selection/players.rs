use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// How the ball travelled between the two picked zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Pass,
    Dribble,
}

/// Which side of the packing action is being tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Attack,
    Defense,
}

/// Cyclic player-picking state for a tagging modal.
///
/// Attack mode tracks an optional sender and receiver; clicking a player
/// cycles through select/deselect per the rules in [`click_player`]
/// (Self::click_player). Defense mode tracks a set of bypassed defenders
/// toggled by membership, with the packing point counter pinned to the set
/// size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSelection {
    mode: SelectionMode,
    action_type: ActionType,
    sender: Option<PlayerId>,
    receiver: Option<PlayerId>,
    defenders: BTreeSet<PlayerId>,
    packing_points: u32,
}

impl PlayerSelection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            action_type: ActionType::Pass,
            sender: None,
            receiver: None,
            defenders: BTreeSet::new(),
            packing_points: 0,
        }
    }

    #[inline]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[inline]
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    pub fn defenders(&self) -> &BTreeSet<PlayerId> {
        &self.defenders
    }

    #[inline]
    pub fn packing_points(&self) -> u32 {
        self.packing_points
    }

    /// Switch tagging side. Player picks do not carry over between modes.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.sender = None;
        self.receiver = None;
        self.defenders.clear();
        self.sync_defense_points();
    }

    /// Switch between pass and dribble. Dribbles have no receiver, so the
    /// receiver slot is cleared immediately and stays unsettable.
    pub fn set_action_type(&mut self, action_type: ActionType) {
        self.action_type = action_type;
        if action_type == ActionType::Dribble {
            self.receiver = None;
        }
    }

    /// Handle a player click according to the current mode.
    ///
    /// Attack mode cycles, in priority order:
    /// 1. clicking the current sender clears the sender,
    /// 2. clicking the current receiver clears the receiver,
    /// 3. with no sender, the click selects the sender,
    /// 4. with a sender and no receiver, the click selects the receiver
    ///    (passes only),
    /// 5. with both set, the click starts over: new sender, no receiver.
    ///
    /// Defense mode toggles set membership instead.
    pub fn click_player(&mut self, player: &str) {
        match self.mode {
            SelectionMode::Attack => self.click_attack(player),
            SelectionMode::Defense => self.toggle_defender(player),
        }
    }

    fn click_attack(&mut self, player: &str) {
        if self.sender.as_deref() == Some(player) {
            self.sender = None;
        } else if self.receiver.as_deref() == Some(player) {
            self.receiver = None;
        } else if self.sender.is_none() {
            self.sender = Some(player.to_string());
        } else if self.receiver.is_none() && self.action_type == ActionType::Pass {
            self.receiver = Some(player.to_string());
        } else {
            self.sender = Some(player.to_string());
            self.receiver = None;
        }
    }

    /// Toggle a defender in or out of the bypassed set.
    pub fn toggle_defender(&mut self, player: &str) {
        if !self.defenders.remove(player) {
            self.defenders.insert(player.to_string());
        }
        self.sync_defense_points();
    }

    /// Set the packing point counter.
    ///
    /// In Attack mode the counter is free-form (the analyst counts bypassed
    /// opponents by hand). In Defense mode the counter must equal the
    /// defender-set size, so any drift introduced here is corrected at once.
    pub fn set_packing_points(&mut self, points: u32) {
        self.packing_points = points;
        if self.mode == SelectionMode::Defense {
            self.sync_defense_points();
        }
    }

    fn sync_defense_points(&mut self) {
        if self.mode != SelectionMode::Defense {
            return;
        }
        let expected = self.defenders.len() as u32;
        if self.packing_points != expected {
            log::debug!(
                "[Selection] defense point counter {} != {} defenders, correcting",
                self.packing_points,
                expected
            );
            self.packing_points = expected;
        }
    }

    /// Clear all picks, keeping mode and action type. Called on save/cancel.
    pub fn reset(&mut self) {
        self.sender = None;
        self.receiver = None;
        self.defenders.clear();
        self.packing_points = 0;
    }
}
