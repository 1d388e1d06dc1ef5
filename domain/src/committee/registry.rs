//! Delegate registry operations

use super::state::CommitteeState;
use crate::core::ids::{DelegateId, FeedbackId};
use crate::core::time::EpochMillis;
use crate::delegate::{Delegate, DelegateUpdate, Feedback, FeedbackKind, ScoreUpdate, Strike};
use crate::roll_call::RollCallStatus;

impl CommitteeState {
    /// Seat a delegate. A blank delegation name is refused.
    pub fn add_delegate(&mut self, mut delegate: Delegate) -> Option<DelegateId> {
        delegate.country = delegate.country.trim().to_string();
        if delegate.country.is_empty() {
            return None;
        }
        let id = delegate.id.clone();
        self.delegates.push(delegate);
        Some(id)
    }

    pub fn update_delegate(&mut self, id: &DelegateId, update: DelegateUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        match self.delegate_mut(id) {
            Some(delegate) => {
                delegate.apply(update);
                true
            }
            None => false,
        }
    }

    /// Remove a delegate and everything that refers to it
    ///
    /// Strikes, feedback and scores go with the delegate, as do its ballot in
    /// an in-progress vote and any speakers list entries. Emoji overrides are
    /// per delegation and stay.
    pub fn remove_delegate(&mut self, id: &DelegateId) -> Option<Delegate> {
        let index = self.delegates.iter().position(|d| &d.id == id)?;
        let removed = self.delegates.remove(index);

        self.strikes.retain(|s| &s.delegate_id != id);
        self.feedback.retain(|f| &f.delegate_id != id);
        self.scores.remove(id);
        if let Some(vote) = &mut self.voting {
            vote.clear_ballot(id);
        }
        let was_speaking = self
            .speakers
            .iter()
            .any(|s| &s.delegate_id == id && s.speaking);
        self.speakers.retain(|s| &s.delegate_id != id);
        if was_speaking {
            self.overtime.reset();
        }

        Some(removed)
    }

    // ==================== Roll call ====================

    pub fn set_roll_call(&mut self, id: &DelegateId, status: RollCallStatus) -> bool {
        match self.delegate_mut(id) {
            Some(delegate) => {
                delegate.set_roll_call(status);
                true
            }
            None => false,
        }
    }

    /// Mark every delegate present; returns how many changed
    pub fn mark_all_present(&mut self) -> usize {
        let mut changed = 0;
        for delegate in &mut self.delegates {
            if delegate.effective_status() == RollCallStatus::Absent {
                delegate.set_roll_call(RollCallStatus::Present);
                changed += 1;
            }
        }
        changed
    }

    pub fn set_roll_call_complete(&mut self, complete: bool) -> bool {
        let changed = self.roll_call_complete != complete;
        self.roll_call_complete = complete;
        changed
    }

    pub fn set_voting_rights_revoked(&mut self, id: &DelegateId, revoked: bool) -> bool {
        self.update_delegate(id, DelegateUpdate::new().voting_rights_revoked(revoked))
    }

    pub fn set_speaking_rights_revoked(&mut self, id: &DelegateId, revoked: bool) -> bool {
        self.update_delegate(id, DelegateUpdate::new().speaking_rights_revoked(revoked))
    }

    // ==================== Strikes ====================

    pub fn add_strike(&mut self, id: &DelegateId, kind: &str, now: EpochMillis) -> bool {
        let kind = kind.trim();
        if kind.is_empty() || self.delegate(id).is_none() {
            return false;
        }
        self.strikes.push(Strike::new(id.clone(), kind, now));
        true
    }

    /// Remove the most recent strike of `kind` for this delegate
    pub fn remove_strike(&mut self, id: &DelegateId, kind: &str) -> bool {
        let kind = kind.trim();
        match self
            .strikes
            .iter()
            .rposition(|s| &s.delegate_id == id && s.kind == kind)
        {
            Some(index) => {
                self.strikes.remove(index);
                true
            }
            None => false,
        }
    }

    // ==================== Feedback ====================

    pub fn add_feedback(
        &mut self,
        id: &DelegateId,
        kind: FeedbackKind,
        reason: &str,
        now: EpochMillis,
    ) -> Option<FeedbackId> {
        self.delegate(id)?;
        let entry = Feedback::new(id.clone(), kind, reason.trim(), now);
        let feedback_id = entry.id.clone();
        self.feedback.push(entry);
        Some(feedback_id)
    }

    pub fn edit_feedback(&mut self, id: &FeedbackId, reason: &str) -> bool {
        match self.feedback.iter_mut().find(|f| &f.id == id) {
            Some(entry) => {
                entry.reason = reason.trim().to_string();
                true
            }
            None => false,
        }
    }

    pub fn delete_feedback(&mut self, id: &FeedbackId) -> bool {
        let before = self.feedback.len();
        self.feedback.retain(|f| &f.id != id);
        self.feedback.len() != before
    }

    // ==================== Scores ====================

    /// Merge a score patch, creating the score sheet on first use
    pub fn set_score(&mut self, id: &DelegateId, update: ScoreUpdate) -> bool {
        if self.delegate(id).is_none() {
            return false;
        }
        self.scores.entry(id.clone()).or_default().merge(update);
        true
    }

    // ==================== Emoji ====================

    /// Set or clear the emoji shown for a delegation
    pub fn set_emoji_override(&mut self, delegation: &str, emoji: Option<&str>) -> bool {
        let delegation = delegation.trim();
        if delegation.is_empty() {
            return false;
        }
        match emoji.map(str::trim).filter(|e| !e.is_empty()) {
            Some(emoji) => {
                self.emoji_overrides
                    .insert(delegation.to_string(), emoji.to_string());
                true
            }
            None => self.emoji_overrides.remove(delegation).is_some(),
        }
    }

    /// Emoji for a delegation: the override if set, else `fallback`
    pub fn emoji_for(
        &self,
        delegation: &str,
        fallback: impl FnOnce(&str) -> Option<String>,
    ) -> Option<String> {
        self.emoji_override(delegation)
            .map(str::to_string)
            .or_else(|| fallback(delegation.trim()))
    }

    // ==================== Roster import ====================

    /// Seat one delegate per delegation not already present
    pub fn import_delegations<S: AsRef<str>>(&mut self, delegations: &[S]) -> Vec<DelegateId> {
        delegations
            .iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                if self.delegate_by_country(name).is_some() {
                    return None;
                }
                self.add_delegate(Delegate::new(name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::committee::CommitteeState;
    use crate::core::ids::DelegateId;
    use crate::delegate::{
        Delegate, DelegateCriterion, DelegateUpdate, FeedbackKind, PaperCriterion, ScoreUpdate,
        ScoreValue,
    };
    use crate::majority::VoteChoice;
    use crate::roll_call::RollCallStatus;
    use crate::voting::VoteTarget;

    fn seated(countries: &[&str]) -> (CommitteeState, Vec<DelegateId>) {
        let mut state = CommitteeState::new("GA1");
        let ids = countries
            .iter()
            .map(|c| state.add_delegate(Delegate::new(*c)).unwrap())
            .collect();
        (state, ids)
    }

    fn score(value: u8) -> ScoreValue {
        ScoreValue::try_from(value).unwrap()
    }

    #[test]
    fn test_add_delegate_starts_absent() {
        let (state, ids) = seated(&["Brazil"]);
        let delegate = state.delegate(&ids[0]).unwrap();
        assert_eq!(delegate.effective_status(), RollCallStatus::Absent);
    }

    #[test]
    fn test_blank_delegation_refused() {
        let mut state = CommitteeState::default();
        assert!(state.add_delegate(Delegate::new("   ")).is_none());
        assert!(state.delegates().is_empty());
    }

    #[test]
    fn test_update_preserves_absent_fields() {
        let mut state = CommitteeState::default();
        let id = state
            .add_delegate(Delegate::new("India").with_email("india@example.org"))
            .unwrap();

        assert!(state.update_delegate(&id, DelegateUpdate::new().name(Some("Priya".into()))));
        let delegate = state.delegate(&id).unwrap();
        assert_eq!(delegate.name.as_deref(), Some("Priya"));
        assert_eq!(delegate.email.as_deref(), Some("india@example.org"));

        assert!(!state.update_delegate(&id, DelegateUpdate::new()));
        assert!(!state.update_delegate(&DelegateId::new("nope"), DelegateUpdate::new().country("X")));
    }

    #[test]
    fn test_remove_cascades_dependents() {
        let (mut state, ids) = seated(&["Egypt", "Ghana"]);
        let egypt = &ids[0];
        state.add_strike(egypt, "phone", 1);
        state.add_strike(egypt, "late", 2);
        state.add_feedback(egypt, FeedbackKind::Compliment, "Strong opening", 3);
        state.set_score(egypt, ScoreUpdate::new().delegate(DelegateCriterion::Speaking, score(7)));
        state.add_to_speakers(egypt);
        state.add_strike(&ids[1], "phone", 4);

        let removed = state.remove_delegate(egypt).unwrap();
        assert_eq!(removed.country, "Egypt");
        assert_eq!(state.strikes_for(egypt).count(), 0);
        assert_eq!(state.feedback_for(egypt).count(), 0);
        assert!(state.score_for(egypt).is_none());
        assert!(state.speakers().is_empty());
        assert_eq!(state.strikes().len(), 1);
        assert!(state.remove_delegate(egypt).is_none());
    }

    #[test]
    fn test_remove_drops_ballot() {
        let (mut state, ids) = seated(&["Egypt", "Ghana"]);
        let motion = state
            .add_motion("Unmod", crate::floor::MotionKind::Motion, None, None, 1)
            .unwrap();
        state.start_vote(VoteTarget::Motion(motion));
        state.record_vote(&ids[0], VoteChoice::Yes);
        state.record_vote(&ids[1], VoteChoice::No);

        state.remove_delegate(&ids[0]);
        let vote = state.current_vote().unwrap();
        assert_eq!(vote.ballots.len(), 1);
        assert!(vote.ballot_of(&ids[0]).is_none());
    }

    #[test]
    fn test_remove_strike_is_lifo_and_idempotent() {
        let (mut state, ids) = seated(&["Chile"]);
        let chile = &ids[0];
        state.add_strike(chile, "phone", 100);
        state.add_strike(chile, "late", 150);
        state.add_strike(chile, "phone", 200);

        assert!(state.remove_strike(chile, "phone"));
        let remaining: Vec<_> = state.strikes_for(chile).map(|s| s.timestamp).collect();
        assert_eq!(remaining, vec![100, 150]);

        assert!(state.remove_strike(chile, "phone"));
        assert!(!state.remove_strike(chile, "phone"));
        assert_eq!(state.strike_count(chile, "phone"), 0);
        assert_eq!(state.strike_count(chile, "late"), 1);
    }

    #[test]
    fn test_feedback_edit_and_delete() {
        let (mut state, ids) = seated(&["Peru"]);
        let id = state
            .add_feedback(&ids[0], FeedbackKind::Concern, "Off topic", 10)
            .unwrap();
        assert!(state.edit_feedback(&id, "Off topic twice"));
        assert_eq!(state.feedback()[0].reason, "Off topic twice");
        assert_eq!(state.feedback()[0].timestamp, 10);
        assert!(state.delete_feedback(&id));
        assert!(!state.delete_feedback(&id));
    }

    #[test]
    fn test_feedback_for_unknown_delegate_is_noop() {
        let mut state = CommitteeState::default();
        assert!(state
            .add_feedback(&DelegateId::new("ghost"), FeedbackKind::Concern, "x", 1)
            .is_none());
    }

    #[test]
    fn test_score_merge_is_shallow() {
        let (mut state, ids) = seated(&["Norway"]);
        let id = &ids[0];
        state.set_score(
            id,
            ScoreUpdate::new()
                .delegate(DelegateCriterion::Research, score(6))
                .evidence("Cited UNHCR data"),
        );
        state.set_score(
            id,
            ScoreUpdate::new()
                .delegate(DelegateCriterion::Research, score(8))
                .paper(PaperCriterion::Citations, score(5)),
        );

        let sheet = state.score_for(id).unwrap();
        assert_eq!(sheet.delegate[&DelegateCriterion::Research].get(), 8);
        assert_eq!(sheet.position_paper[&PaperCriterion::Citations].get(), 5);
        assert_eq!(sheet.evidence.as_deref(), Some("Cited UNHCR data"));
    }

    #[test]
    fn test_roll_call_operations() {
        let (mut state, ids) = seated(&["Cuba", "Fiji", "Laos"]);
        state.set_roll_call(&ids[0], RollCallStatus::PresentAndVoting);
        assert_eq!(state.mark_all_present(), 2);
        assert_eq!(
            state.delegate(&ids[0]).unwrap().effective_status(),
            RollCallStatus::PresentAndVoting
        );

        let summary = state.roll_call_summary();
        assert_eq!(summary.present, 2);
        assert_eq!(summary.present_and_voting, 1);
        assert_eq!(summary.eligible_voters, 3);

        assert!(state.set_roll_call_complete(true));
        assert!(!state.set_roll_call_complete(true));
    }

    #[test]
    fn test_emoji_override_falls_back() {
        let mut state = CommitteeState::default();
        let lookup = |name: &str| (name == "Japan").then(|| "🇯🇵".to_string());

        assert_eq!(state.emoji_for("Japan", lookup).as_deref(), Some("🇯🇵"));
        assert!(state.set_emoji_override("Japan", Some("🗾")));
        assert_eq!(state.emoji_for("Japan", lookup).as_deref(), Some("🗾"));

        assert!(state.set_emoji_override("Japan", Some("  ")));
        assert_eq!(state.emoji_for("Japan", lookup).as_deref(), Some("🇯🇵"));
        assert!(!state.set_emoji_override("Japan", None));
    }

    #[test]
    fn test_import_skips_seated_delegations() {
        let (mut state, _) = seated(&["France"]);
        let added = state.import_delegations(&["france", "Germany", "Italy"]);
        assert_eq!(added.len(), 2);
        assert_eq!(state.delegates().len(), 3);
    }
}
