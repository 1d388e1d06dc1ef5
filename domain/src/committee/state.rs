//! The committee state container

use crate::core::ids::{AmendmentId, DelegateId, MotionId, ResolutionId, SpeakerId};
use crate::core::time::EpochMillis;
use crate::delegate::{Delegate, DelegateScore, Feedback, FeedbackKind, Strike};
use crate::floor::{Amendment, Motion, Resolution};
use crate::roll_call::RollCallSummary;
use crate::session_timer::SessionTimer;
use crate::speakers::{DEFAULT_SPEAKER_SECONDS, OvertimeMonitor, Speaker};
use crate::voting::VotingSession;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// How session-local state is treated when a stored state is loaded
///
/// The pause marker and the active speaker only matter while a session is
/// live. A caller that picks up where the previous process left off (one CLI
/// command per process) resumes them; a caller opening a new live session
/// starts from a clean floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadMode {
    /// Nobody holds the floor and an open pause is closed.
    #[default]
    Fresh,
    /// The floor and an open pause are kept as stored.
    Resume,
}

/// Full state of one committee
///
/// Fields are only reachable through the accessors and the operations in
/// this module, so cascades and single-active invariants cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeState {
    pub(crate) committee_name: String,
    pub(crate) delegates: Vec<Delegate>,
    pub(crate) strikes: Vec<Strike>,
    pub(crate) feedback: Vec<Feedback>,
    pub(crate) scores: BTreeMap<DelegateId, DelegateScore>,
    /// Emoji per delegation name
    pub(crate) emoji_overrides: BTreeMap<String, String>,
    pub(crate) motions: Vec<Motion>,
    pub(crate) resolutions: Vec<Resolution>,
    pub(crate) amendments: Vec<Amendment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) voting: Option<VotingSession>,
    pub(crate) speakers: Vec<Speaker>,
    /// Default speaking time in seconds
    pub(crate) speaker_duration: u32,
    pub(crate) roll_call_complete: bool,
    #[serde(flatten)]
    pub(crate) timer: SessionTimer,
    #[serde(skip)]
    pub(crate) overtime: OvertimeMonitor,
}

impl Default for CommitteeState {
    fn default() -> Self {
        Self {
            committee_name: String::new(),
            delegates: Vec::new(),
            strikes: Vec::new(),
            feedback: Vec::new(),
            scores: BTreeMap::new(),
            emoji_overrides: BTreeMap::new(),
            motions: Vec::new(),
            resolutions: Vec::new(),
            amendments: Vec::new(),
            voting: None,
            speakers: Vec::new(),
            speaker_duration: DEFAULT_SPEAKER_SECONDS,
            roll_call_complete: false,
            timer: SessionTimer::default(),
            overtime: OvertimeMonitor::default(),
        }
    }
}

impl CommitteeState {
    pub fn new(committee_name: impl Into<String>) -> Self {
        Self {
            committee_name: committee_name.into().trim().to_string(),
            ..Default::default()
        }
    }

    pub fn committee_name(&self) -> &str {
        &self.committee_name
    }

    pub fn set_committee_name(&mut self, name: impl Into<String>) {
        self.committee_name = name.into().trim().to_string();
    }

    // ==================== Delegates ====================

    pub fn delegates(&self) -> &[Delegate] {
        &self.delegates
    }

    pub fn delegate(&self, id: &DelegateId) -> Option<&Delegate> {
        self.delegates.iter().find(|d| &d.id == id)
    }

    /// Find a delegate by delegation name, ignoring case and surrounding space
    pub fn delegate_by_country(&self, country: &str) -> Option<&Delegate> {
        let wanted = country.trim();
        self.delegates
            .iter()
            .find(|d| d.country.eq_ignore_ascii_case(wanted))
    }

    pub(crate) fn delegate_mut(&mut self, id: &DelegateId) -> Option<&mut Delegate> {
        self.delegates.iter_mut().find(|d| &d.id == id)
    }

    pub fn roll_call_complete(&self) -> bool {
        self.roll_call_complete
    }

    pub fn roll_call_summary(&self) -> RollCallSummary {
        RollCallSummary::from_delegates(&self.delegates)
    }

    pub fn strikes(&self) -> &[Strike] {
        &self.strikes
    }

    pub fn strikes_for<'a>(&'a self, id: &'a DelegateId) -> impl Iterator<Item = &'a Strike> {
        self.strikes.iter().filter(move |s| &s.delegate_id == id)
    }

    pub fn strike_count(&self, id: &DelegateId, kind: &str) -> usize {
        self.strikes_for(id).filter(|s| s.kind == kind).count()
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn feedback_for<'a>(&'a self, id: &'a DelegateId) -> impl Iterator<Item = &'a Feedback> {
        self.feedback.iter().filter(move |f| &f.delegate_id == id)
    }

    pub fn scores(&self) -> &BTreeMap<DelegateId, DelegateScore> {
        &self.scores
    }

    pub fn score_for(&self, id: &DelegateId) -> Option<&DelegateScore> {
        self.scores.get(id)
    }

    pub fn emoji_overrides(&self) -> &BTreeMap<String, String> {
        &self.emoji_overrides
    }

    pub fn emoji_override(&self, delegation: &str) -> Option<&str> {
        self.emoji_overrides
            .get(delegation.trim())
            .map(String::as_str)
    }

    // ==================== Floor ====================

    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    pub fn motion(&self, id: &MotionId) -> Option<&Motion> {
        self.motions.iter().find(|m| &m.id == id)
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn resolution(&self, id: &ResolutionId) -> Option<&Resolution> {
        self.resolutions.iter().find(|r| &r.id == id)
    }

    pub fn amendments(&self) -> &[Amendment] {
        &self.amendments
    }

    pub fn amendment(&self, id: &AmendmentId) -> Option<&Amendment> {
        self.amendments.iter().find(|a| &a.id == id)
    }

    pub fn amendments_for<'a>(
        &'a self,
        resolution_id: &'a ResolutionId,
    ) -> impl Iterator<Item = &'a Amendment> {
        self.amendments
            .iter()
            .filter(move |a| a.resolution_id.as_ref() == Some(resolution_id))
    }

    // ==================== Voting / speakers / timer ====================

    pub fn current_vote(&self) -> Option<&VotingSession> {
        self.voting.as_ref()
    }

    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn speaker(&self, id: &SpeakerId) -> Option<&Speaker> {
        self.speakers.iter().find(|s| &s.id == id)
    }

    pub fn active_speaker(&self) -> Option<&Speaker> {
        self.speakers.iter().find(|s| s.speaking)
    }

    pub fn speaker_duration(&self) -> u32 {
        self.speaker_duration
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    /// Make a state read from storage safe to use in a live session
    ///
    /// In [`ReloadMode::Fresh`] every speaker is stopped and an open pause is
    /// folded into the paused total. In [`ReloadMode::Resume`] the first
    /// entry holding the floor keeps it and an open pause stays open. Either
    /// way, references to delegates or floor items that no longer exist are
    /// dropped. Returns one note per repair made.
    pub fn normalize_for_reload(&mut self, now: EpochMillis, mode: ReloadMode) -> Vec<String> {
        let mut notes = Vec::new();

        let holder = match mode {
            ReloadMode::Fresh => None,
            ReloadMode::Resume => self.speakers.iter().position(Speaker::holds_floor),
        };
        for (index, speaker) in self.speakers.iter_mut().enumerate() {
            if Some(index) != holder {
                speaker.stop();
            }
        }
        self.timer.normalize_for_reload(now, mode == ReloadMode::Resume);
        self.overtime.reset();
        if self.speaker_duration == 0 {
            self.speaker_duration = DEFAULT_SPEAKER_SECONDS;
        }

        let known: HashSet<DelegateId> = self.delegates.iter().map(|d| d.id.clone()).collect();
        let before = (
            self.strikes.len(),
            self.feedback.len(),
            self.scores.len(),
            self.speakers.len(),
        );
        self.strikes.retain(|s| known.contains(&s.delegate_id));
        self.feedback.retain(|f| known.contains(&f.delegate_id));
        self.scores.retain(|id, _| known.contains(id));
        self.speakers.retain(|s| known.contains(&s.delegate_id));
        let after = (
            self.strikes.len(),
            self.feedback.len(),
            self.scores.len(),
            self.speakers.len(),
        );
        if before != after {
            notes.push(format!(
                "dropped records for unknown delegates in '{}'",
                self.committee_name
            ));
        }

        if let Some(vote) = &self.voting
            && !self.target_exists(&vote.target)
        {
            notes.push(format!("dropped vote on missing {}", vote.target));
            self.voting = None;
        }
        if let Some(vote) = &mut self.voting {
            vote.ballots.retain(|id, _| known.contains(id));
        }

        self.rearm_overtime();
        notes
    }

    /// Mark the current speech as already flagged if its overtime concern
    /// was recorded before the state was stored
    fn rearm_overtime(&mut self) {
        let Some((delegate_id, start)) = self
            .active_speaker()
            .and_then(|s| s.start_time_ms().map(|start| (s.delegate_id.clone(), start)))
        else {
            return;
        };
        let flagged = self.feedback.iter().any(|f| {
            f.delegate_id == delegate_id
                && f.kind == FeedbackKind::Concern
                && f.reason == super::OVERTIME_REASON
                && f.timestamp >= start
        });
        if flagged {
            self.overtime.mark_flagged(delegate_id, start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::MotionKind;
    use crate::voting::VoteTarget;

    #[test]
    fn test_default_state() {
        let state = CommitteeState::new(" DISEC ");
        assert_eq!(state.committee_name(), "DISEC");
        assert_eq!(state.speaker_duration(), 60);
        assert!(state.delegates().is_empty());
        assert!(state.current_vote().is_none());
    }

    #[test]
    fn test_serialized_shape_flattens_timer() {
        let state = CommitteeState::new("UNSC");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["committeeName"], "UNSC");
        assert_eq!(json["speakerDuration"], 60);
        assert_eq!(json["sessionStarted"], false);
        assert!(json["sessionRecords"].as_array().unwrap().is_empty());
        assert!(json.get("overtime").is_none());
        assert!(json.get("voting").is_none());
    }

    #[test]
    fn test_lookup_by_country_ignores_case() {
        let mut state = CommitteeState::default();
        let id = state.add_delegate(Delegate::new("France")).unwrap();
        assert_eq!(state.delegate_by_country(" france ").map(|d| &d.id), Some(&id));
        assert!(state.delegate_by_country("Spain").is_none());
    }

    #[test]
    fn test_reload_stops_speakers_and_drops_dangling_refs() {
        let mut state = CommitteeState::default();
        let fr = state.add_delegate(Delegate::new("France")).unwrap();
        let speaker = state.add_to_speakers(&fr).unwrap();
        state.set_active_speaker(Some(&speaker), 1_000);
        let motion = state.add_motion("Unmod", MotionKind::Motion, None, None, 1).unwrap();
        state.start_vote(VoteTarget::Motion(motion.clone()));

        // simulate a stale document
        state.strikes.push(Strike::new(DelegateId::new("ghost"), "phone", 1));
        state.motions.clear();

        let notes = state.normalize_for_reload(5_000, ReloadMode::Fresh);
        assert_eq!(notes.len(), 2);
        assert!(state.active_speaker().is_none());
        assert!(state.strikes().is_empty());
        assert!(state.current_vote().is_none());
        assert_eq!(state.speakers().len(), 1);
    }

    #[test]
    fn test_resume_keeps_floor_and_overtime_flag() {
        let mut state = CommitteeState::default();
        let fr = state.add_delegate(Delegate::new("France")).unwrap();
        let cl = state.add_delegate(Delegate::new("Chile")).unwrap();
        let first = state.add_to_speakers(&fr).unwrap();
        state.add_to_speakers(&cl).unwrap();

        let t0 = 1_700_000_000_000;
        state.set_active_speaker(Some(&first), t0);
        assert!(state.check_overtime(t0 + 75_000, 10_000).is_some());
        // a second entry marked speaking by a damaged document
        state.speakers[1].speaking = true;

        let notes = state.normalize_for_reload(t0 + 80_000, ReloadMode::Resume);
        assert!(notes.is_empty());
        assert_eq!(state.active_speaker().map(|s| &s.id), Some(&first));
        assert!(!state.speakers()[1].speaking);
        assert!(state.check_overtime(t0 + 90_000, 10_000).is_none());
        assert_eq!(state.feedback_for(&fr).count(), 1);
    }
}
