use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::store::ShotLookup;
use crate::ShotId;

/// Hard cap on ancestors collected from a rebound chain. Malformed data
/// degrades to truncation instead of an unbounded walk.
pub const MAX_CHAIN_DEPTH: usize = 100;

/// Why a chain walk stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationReason {
    /// An id was revisited; the stored chain loops back on itself.
    Cycle,
    /// The walk reached [`MAX_CHAIN_DEPTH`] ancestors.
    DepthCap,
}

/// Data-quality note attached to a truncated chain walk. Not an error: the
/// engine proceeds with the ancestors collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainIntegrityWarning {
    /// The shot id at which the walk stopped.
    pub at_shot: ShotId,
    pub reason: TruncationReason,
    /// Ancestors collected before stopping.
    pub depth: usize,
}

/// Result of walking a rebound chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainWalk {
    /// Stored final xG percent of each ancestor, nearest first.
    pub ancestor_xg: Vec<i32>,
    /// Probability that every ancestor missed: `prod(1 - xg/100)`, in (0, 1].
    pub remaining: f64,
    pub warning: Option<ChainIntegrityWarning>,
}

impl ChainWalk {
    fn empty() -> Self {
        Self { ancestor_xg: Vec::new(), remaining: 1.0, warning: None }
    }
}

/// Walk `start, start.previous, ...` collecting each ancestor's stored final
/// xG.
///
/// The walk stops on a missing id (dangling reference or simply the chain
/// head), on a revisited id, or at [`MAX_CHAIN_DEPTH`] ancestors. Cycles and
/// the depth cap are reported as a [`ChainIntegrityWarning`] and logged for
/// data-quality review; the walk itself never fails.
pub fn walk_rebound_chain(start: Option<&str>, shots: &dyn ShotLookup) -> ChainWalk {
    let mut walk = ChainWalk::empty();
    let mut seen: HashSet<ShotId> = HashSet::new();
    let mut next = start.map(str::to_string);

    while let Some(id) = next {
        if !seen.insert(id.clone()) {
            log::warn!("[ShotChain] cycle at shot {}, truncating after {} ancestors", id, walk.ancestor_xg.len());
            walk.warning = Some(ChainIntegrityWarning {
                at_shot: id,
                reason: TruncationReason::Cycle,
                depth: walk.ancestor_xg.len(),
            });
            break;
        }
        if walk.ancestor_xg.len() >= MAX_CHAIN_DEPTH {
            log::warn!("[ShotChain] depth cap hit at shot {}, truncating", id);
            walk.warning = Some(ChainIntegrityWarning {
                at_shot: id,
                reason: TruncationReason::DepthCap,
                depth: walk.ancestor_xg.len(),
            });
            break;
        }
        match shots.shot_by_id(&id) {
            Some(shot) => {
                walk.ancestor_xg.push(shot.xg_percent);
                next = shot.previous_shot_id;
            }
            None => {
                log::debug!("[ShotChain] shot {} not found, chain ends", id);
                break;
            }
        }
    }

    walk.remaining =
        walk.ancestor_xg.iter().fold(1.0_f64, |acc, &xg| acc * (1.0 - xg as f64 / 100.0));
    walk
}
