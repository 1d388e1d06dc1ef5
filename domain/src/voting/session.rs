//! The in-progress vote
//!
//! At most one vote exists at a time. Ballots are keyed by delegate and
//! overwritten freely; eligibility is reported by the roll-call resolver but
//! never enforced here.

use crate::core::ids::{AmendmentId, DelegateId, MotionId, ResolutionId};
use crate::majority::{VoteChoice, VoteTally};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The item a vote is being held on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum VoteTarget {
    Motion(MotionId),
    Resolution(ResolutionId),
    Amendment(AmendmentId),
}

impl VoteTarget {
    pub fn kind_str(&self) -> &'static str {
        match self {
            VoteTarget::Motion(_) => "motion",
            VoteTarget::Resolution(_) => "resolution",
            VoteTarget::Amendment(_) => "amendment",
        }
    }

    pub fn id_str(&self) -> &str {
        match self {
            VoteTarget::Motion(id) => id.as_str(),
            VoteTarget::Resolution(id) => id.as_str(),
            VoteTarget::Amendment(id) => id.as_str(),
        }
    }

    pub fn is_motion(&self, id: &MotionId) -> bool {
        matches!(self, VoteTarget::Motion(target) if target == id)
    }

    pub fn is_resolution(&self, id: &ResolutionId) -> bool {
        matches!(self, VoteTarget::Resolution(target) if target == id)
    }

    pub fn is_amendment(&self, id: &AmendmentId) -> bool {
        matches!(self, VoteTarget::Amendment(target) if target == id)
    }
}

impl std::fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind_str(), self.id_str())
    }
}

/// A vote in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingSession {
    pub target: VoteTarget,
    #[serde(default)]
    pub ballots: BTreeMap<DelegateId, VoteChoice>,
}

impl VotingSession {
    /// Open a vote with an empty ballot map
    pub fn begin(target: VoteTarget) -> Self {
        Self {
            target,
            ballots: BTreeMap::new(),
        }
    }

    /// Set or overwrite a delegate's ballot
    pub fn record(&mut self, delegate_id: DelegateId, choice: VoteChoice) {
        self.ballots.insert(delegate_id, choice);
    }

    /// Drop one delegate's ballot; returns whether one existed
    pub fn clear_ballot(&mut self, delegate_id: &DelegateId) -> bool {
        self.ballots.remove(delegate_id).is_some()
    }

    pub fn ballot_of(&self, delegate_id: &DelegateId) -> Option<VoteChoice> {
        self.ballots.get(delegate_id).copied()
    }

    /// Live tally of the ballots cast so far
    pub fn tally(&self) -> VoteTally {
        VoteTally::from_choices(self.ballots.values())
    }

    /// Close the vote, yielding its target and final tally
    pub fn finish(self) -> (VoteTarget, VoteTally) {
        let tally = self.tally();
        (self.target, tally)
    }
}
