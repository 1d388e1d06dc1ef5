//! Voting and speaking eligibility

use crate::core::error::DomainError;
use crate::delegate::Delegate;
use crate::majority::VoteChoice;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Attendance recorded at roll call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RollCallStatus {
    #[default]
    Absent,
    Present,
    /// Present and committed to vote yes or no on substantive matters
    PresentAndVoting,
}

impl RollCallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RollCallStatus::Absent => "absent",
            RollCallStatus::Present => "present",
            RollCallStatus::PresentAndVoting => "present-and-voting",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RollCallStatus::Absent => "Absent",
            RollCallStatus::Present => "Present",
            RollCallStatus::PresentAndVoting => "Present and Voting",
        }
    }
}

impl std::fmt::Display for RollCallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for RollCallStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "absent" => Ok(RollCallStatus::Absent),
            "present" => Ok(RollCallStatus::Present),
            "present-and-voting" | "pv" => Ok(RollCallStatus::PresentAndVoting),
            other => Err(DomainError::unknown("roll-call status", other)),
        }
    }
}

/// Which ballots a delegate may cast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotingEligibility {
    /// Absent, or voting rights revoked
    Ineligible,
    /// Present: yes, no or abstain
    YesNoAbstain,
    /// Present and voting: abstaining is not offered
    YesNoOnly,
}

impl VotingEligibility {
    pub fn can_vote(&self) -> bool {
        !matches!(self, VotingEligibility::Ineligible)
    }

    pub fn allowed_choices(&self) -> &'static [VoteChoice] {
        match self {
            VotingEligibility::Ineligible => &[],
            VotingEligibility::YesNoAbstain => &[VoteChoice::Yes, VoteChoice::No, VoteChoice::Abstain],
            VotingEligibility::YesNoOnly => &[VoteChoice::Yes, VoteChoice::No],
        }
    }

    pub fn allows(&self, choice: VoteChoice) -> bool {
        self.allowed_choices().contains(&choice)
    }
}

/// Roll-call status with the legacy `present` fallback
pub fn effective_status(delegate: &Delegate) -> RollCallStatus {
    delegate.effective_status()
}

pub fn voting_eligibility(delegate: &Delegate) -> VotingEligibility {
    if delegate.voting_rights_revoked {
        return VotingEligibility::Ineligible;
    }
    match delegate.effective_status() {
        RollCallStatus::Absent => VotingEligibility::Ineligible,
        RollCallStatus::Present => VotingEligibility::YesNoAbstain,
        RollCallStatus::PresentAndVoting => VotingEligibility::YesNoOnly,
    }
}

/// Whether a delegate may be added to the speakers list
pub fn can_speak(delegate: &Delegate) -> bool {
    !delegate.speaking_rights_revoked
}

/// Delegates a random pick may draw from
///
/// Once roll call is complete, absent delegates are excluded as well.
pub fn speaker_pool(delegates: &[Delegate], roll_call_complete: bool) -> Vec<&Delegate> {
    delegates
        .iter()
        .filter(|d| can_speak(d))
        .filter(|d| !roll_call_complete || d.effective_status() != RollCallStatus::Absent)
        .collect()
}

/// Draw one delegate uniformly from a pool
pub fn pick_random_speaker<'a, R: Rng + ?Sized>(
    pool: &[&'a Delegate],
    rng: &mut R,
) -> Option<&'a Delegate> {
    pool.choose(rng).copied()
}

/// Attendance counts for the roll-call panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollCallSummary {
    pub absent: usize,
    pub present: usize,
    pub present_and_voting: usize,
    /// Delegates who may cast any ballot
    pub eligible_voters: usize,
}

impl RollCallSummary {
    pub fn from_delegates(delegates: &[Delegate]) -> Self {
        delegates.iter().fold(Self::default(), |mut summary, d| {
            match d.effective_status() {
                RollCallStatus::Absent => summary.absent += 1,
                RollCallStatus::Present => summary.present += 1,
                RollCallStatus::PresentAndVoting => summary.present_and_voting += 1,
            }
            if voting_eligibility(d).can_vote() {
                summary.eligible_voters += 1;
            }
            summary
        })
    }

    pub fn attending(&self) -> usize {
        self.present + self.present_and_voting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn delegate(country: &str, status: RollCallStatus) -> Delegate {
        let mut d = Delegate::new(country);
        d.set_roll_call(status);
        d
    }

    #[test]
    fn test_absent_cannot_vote() {
        let d = delegate("Brazil", RollCallStatus::Absent);
        assert_eq!(voting_eligibility(&d), VotingEligibility::Ineligible);
        assert!(voting_eligibility(&d).allowed_choices().is_empty());
    }

    #[test]
    fn test_revoked_cannot_vote_even_if_present() {
        let mut d = delegate("Brazil", RollCallStatus::PresentAndVoting);
        d.voting_rights_revoked = true;
        assert!(!voting_eligibility(&d).can_vote());
    }

    #[test]
    fn test_present_may_abstain() {
        let d = delegate("India", RollCallStatus::Present);
        let eligibility = voting_eligibility(&d);
        assert!(eligibility.allows(VoteChoice::Abstain));
        assert_eq!(eligibility.allowed_choices().len(), 3);
    }

    #[test]
    fn test_present_and_voting_may_not_abstain() {
        let d = delegate("France", RollCallStatus::PresentAndVoting);
        let eligibility = voting_eligibility(&d);
        assert!(eligibility.allows(VoteChoice::Yes));
        assert!(eligibility.allows(VoteChoice::No));
        assert!(!eligibility.allows(VoteChoice::Abstain));
    }

    #[test]
    fn test_legacy_present_flag_counts() {
        let mut d = Delegate::new("Ghana");
        d.roll_call_status = None;
        d.present = true;
        assert_eq!(voting_eligibility(&d), VotingEligibility::YesNoAbstain);
    }

    #[test]
    fn test_speaker_pool_excludes_revoked() {
        let mut muted = delegate("Iran", RollCallStatus::Present);
        muted.speaking_rights_revoked = true;
        let delegates = vec![muted, delegate("Iraq", RollCallStatus::Absent)];

        let pool = speaker_pool(&delegates, false);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].country, "Iraq");
    }

    #[test]
    fn test_speaker_pool_excludes_absent_after_roll_call() {
        let delegates = vec![
            delegate("Iraq", RollCallStatus::Absent),
            delegate("Oman", RollCallStatus::Present),
            delegate("Qatar", RollCallStatus::PresentAndVoting),
        ];
        let pool = speaker_pool(&delegates, true);
        let names: Vec<_> = pool.iter().map(|d| d.country.as_str()).collect();
        assert_eq!(names, vec!["Oman", "Qatar"]);
    }

    #[test]
    fn test_pick_random_from_pool() {
        let delegates = vec![
            delegate("Oman", RollCallStatus::Present),
            delegate("Qatar", RollCallStatus::Present),
        ];
        let pool = speaker_pool(&delegates, true);
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_random_speaker(&pool, &mut rng).unwrap();
        assert!(["Oman", "Qatar"].contains(&picked.country.as_str()));
        assert!(pick_random_speaker(&[], &mut rng).is_none());
    }

    #[test]
    fn test_summary_counts() {
        let mut revoked = delegate("Chad", RollCallStatus::Present);
        revoked.voting_rights_revoked = true;
        let delegates = vec![
            delegate("Iraq", RollCallStatus::Absent),
            delegate("Oman", RollCallStatus::Present),
            delegate("Qatar", RollCallStatus::PresentAndVoting),
            revoked,
        ];
        let summary = RollCallSummary::from_delegates(&delegates);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.present_and_voting, 1);
        assert_eq!(summary.eligible_voters, 2);
        assert_eq!(summary.attending(), 3);
    }

    #[test]
    fn test_status_parse_and_wire_name() {
        assert_eq!(
            "present_and_voting".parse::<RollCallStatus>().ok(),
            Some(RollCallStatus::PresentAndVoting)
        );
        assert_eq!(
            serde_json::to_value(RollCallStatus::PresentAndVoting).unwrap(),
            serde_json::json!("present-and-voting")
        );
    }
}
