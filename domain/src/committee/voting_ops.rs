//! Starting, recording and ending the single in-flight vote

use super::state::CommitteeState;
use crate::core::ids::DelegateId;
use crate::floor::{AMENDMENT_MAJORITY, DisplayStatus, MotionStatus, RESOLUTION_MAJORITY};
use crate::majority::{MajorityRequirement, MajorityType, VoteChoice, VoteTally};
use crate::voting::{VoteTarget, VotingSession};
use serde::Serialize;

/// Result of ending a vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub target: VoteTarget,
    pub tally: VoteTally,
    /// Majority the item is configured to need
    pub required: MajorityRequirement,
    /// Status written (motions) or derived (resolutions, amendments)
    pub status: DisplayStatus,
}

impl CommitteeState {
    pub(crate) fn target_exists(&self, target: &VoteTarget) -> bool {
        match target {
            VoteTarget::Motion(id) => self.motion(id).is_some_and(|m| m.is_votable()),
            VoteTarget::Resolution(id) => self.resolution(id).is_some(),
            VoteTarget::Amendment(id) => self.amendment(id).is_some(),
        }
    }

    /// Open a vote, replacing any vote already in progress
    ///
    /// The target must exist and, for motions, must not be a point.
    pub fn start_vote(&mut self, target: VoteTarget) -> bool {
        if !self.target_exists(&target) {
            return false;
        }
        self.voting = Some(VotingSession::begin(target));
        true
    }

    /// Record a ballot without any eligibility check
    ///
    /// Eligibility is advisory: callers gate on
    /// [`voting_eligibility`](crate::roll_call::voting_eligibility) if they
    /// want to. With no vote open there is nothing to record against.
    pub fn record_vote(&mut self, delegate_id: &DelegateId, choice: VoteChoice) -> bool {
        match &mut self.voting {
            Some(vote) => {
                vote.record(delegate_id.clone(), choice);
                true
            }
            None => false,
        }
    }

    pub fn clear_vote(&mut self, delegate_id: &DelegateId) -> bool {
        self.voting
            .as_mut()
            .is_some_and(|vote| vote.clear_ballot(delegate_id))
    }

    pub fn live_tally(&self) -> Option<VoteTally> {
        self.voting.as_ref().map(VotingSession::tally)
    }

    /// Discard the vote in progress without writing a tally
    pub fn cancel_vote(&mut self) -> Option<VoteTarget> {
        self.voting.take().map(|vote| vote.target)
    }

    /// Close the vote and write its tally onto the target
    ///
    /// Motions get a tally and a status decided by simple majority, whatever
    /// majority their preset calls for; `required` still reports the
    /// configured one. Resolutions and amendments only get the tally and
    /// their status stays derived.
    pub fn end_vote(&mut self) -> Option<VoteOutcome> {
        let (target, tally) = self.voting.take()?.finish();

        let (required, status) = match &target {
            VoteTarget::Motion(id) => {
                let motion = self.motions.iter_mut().find(|m| &m.id == id)?;
                let passed = MajorityType::Simple.is_satisfied(tally.yes, tally.no);
                motion.votes = Some(tally);
                motion.status = if passed {
                    MotionStatus::Passed
                } else {
                    MotionStatus::Failed
                };
                let status = if passed {
                    DisplayStatus::Passed
                } else {
                    DisplayStatus::Failed
                };
                (motion.majority(), status)
            }
            VoteTarget::Resolution(id) => {
                let resolution = self.resolutions.iter_mut().find(|r| &r.id == id)?;
                resolution.votes = Some(tally);
                (RESOLUTION_MAJORITY.into(), resolution.display_status())
            }
            VoteTarget::Amendment(id) => {
                let amendment = self.amendments.iter_mut().find(|a| &a.id == id)?;
                amendment.votes = Some(tally);
                (AMENDMENT_MAJORITY.into(), amendment.display_status())
            }
        };

        Some(VoteOutcome {
            target,
            tally,
            required,
            status,
        })
    }
}
