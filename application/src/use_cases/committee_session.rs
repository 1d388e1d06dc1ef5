//! Committee Session use case.
//!
//! [`CommitteeSession`] is the handle callers hold. It owns the
//! [`ConferenceBook`], forwards every operation to the active conference's
//! [`CommitteeState`] with the current time from the injected [`Clock`], and
//! after each change schedules a snapshot for persistence.
//!
//! # Flow
//!
//! ```text
//! caller ──> CommitteeSession::op(..)
//!               │  now = clock.now_ms()
//!               ├─> CommitteeState::op(.., now)      (pure transition)
//!               ├─> changed? ──> PersistenceHandle::schedule(snapshot)
//!               └─> notable? ──> CommitteeEventLog::log(event)
//! ```
//!
//! Requests that change nothing are logged at debug level and return the
//! domain's "nothing happened" value; they never error.

use crate::config::SessionParams;
use crate::ports::clock::Clock;
use crate::ports::event_log::{CommitteeEvent, CommitteeEventLog, NoEventLog};
use crate::ports::reference_data::{NoReferenceData, ReferenceData};
use crate::use_cases::persistence::PersistenceHandle;
use chrono::{DateTime, Utc};
use dais_domain::{
    Amendment, AmendmentId, CommitteeState, Conference, ConferenceBook, ConferenceId,
    DecidedStatus, Delegate, DelegateId, DelegateUpdate, EpochMillis, FeedbackId, FeedbackKind,
    MotionId, MotionKind, ResolutionId, Resolution, RollCallStatus, ScoreUpdate, SessionRecord,
    SessionRecordId, SpeakerId, VoteChoice, VoteOutcome, VoteTarget, to_document,
};
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Whether an operation's return value means state changed.
trait Changed {
    fn changed(&self) -> bool;
}

impl Changed for bool {
    fn changed(&self) -> bool {
        *self
    }
}

impl<T> Changed for Option<T> {
    fn changed(&self) -> bool {
        self.is_some()
    }
}

impl<T> Changed for Vec<T> {
    fn changed(&self) -> bool {
        !self.is_empty()
    }
}

impl Changed for usize {
    fn changed(&self) -> bool {
        *self > 0
    }
}

impl Changed for () {
    fn changed(&self) -> bool {
        true
    }
}

pub struct CommitteeSession {
    book: ConferenceBook,
    clock: Arc<dyn Clock>,
    reference: Arc<dyn ReferenceData>,
    event_log: Arc<dyn CommitteeEventLog>,
    persistence: Option<PersistenceHandle>,
    params: SessionParams,
}

impl CommitteeSession {
    pub fn new(book: ConferenceBook, clock: Arc<dyn Clock>) -> Self {
        Self {
            book,
            clock,
            reference: Arc::new(NoReferenceData),
            event_log: Arc::new(NoEventLog),
            persistence: None,
            params: SessionParams::default(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_reference_data(mut self, reference: Arc<dyn ReferenceData>) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_event_log(mut self, event_log: Arc<dyn CommitteeEventLog>) -> Self {
        self.event_log = event_log;
        self
    }

    pub fn with_persistence(mut self, persistence: PersistenceHandle) -> Self {
        self.persistence = Some(persistence);
        self
    }

    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }

    // ==================== Reads ====================

    pub fn book(&self) -> &ConferenceBook {
        &self.book
    }

    pub fn active_conference(&self) -> &Conference {
        self.book.active()
    }

    /// State of the active conference.
    pub fn state(&self) -> &CommitteeState {
        &self.book.active().data
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn now(&self) -> EpochMillis {
        self.clock.now_ms()
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.persistence.as_ref().and_then(PersistenceHandle::last_saved)
    }

    /// The document as it would be persisted.
    pub fn snapshot(&self) -> Result<Value, serde_json::Error> {
        to_document(&self.book)
    }

    /// Emoji for a delegation: the conference override, else the flag lookup.
    pub fn emoji_for(&self, delegation: &str) -> Option<String> {
        self.state()
            .emoji_for(delegation, |name| self.reference.flag_for(name))
    }

    /// Committees whose rosters [`import_roster`](Self::import_roster) knows.
    pub fn preset_committees(&self) -> Vec<String> {
        self.reference.committees()
    }

    pub fn session_elapsed_ms(&self) -> i64 {
        self.state().session_elapsed_ms(self.now())
    }

    pub fn session_remaining_ms(&self) -> Option<i64> {
        self.state().session_remaining_ms(self.now())
    }

    /// Draw a delegate at random from those allowed to speak.
    pub fn pick_random_speaker<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Delegate> {
        self.state().pick_random_speaker(rng)
    }

    // ==================== Conferences ====================

    pub fn add_conference(&mut self, name: &str) -> ConferenceId {
        let id = self.book.add_conference(name);
        self.book
            .active_mut()
            .data
            .set_speaker_duration(self.params.default_speaker_seconds);
        let name = self.book.active().name.clone();
        info!("Added conference {} ({})", name, id);
        self.emit(CommitteeEvent::ConferenceAdded {
            conference: id.clone(),
            name,
        });
        self.persist();
        id
    }

    pub fn remove_conference(&mut self, id: &ConferenceId) -> bool {
        let Some(removed) = self.book.remove_conference(id) else {
            debug!("Ignored removal of unknown conference {}", id);
            return false;
        };
        info!(
            "Removed conference {}; active is now {}",
            removed.name,
            self.book.active().name
        );
        self.emit(CommitteeEvent::ConferenceRemoved {
            conference: removed.id,
            name: removed.name,
        });
        self.persist();
        true
    }

    pub fn rename_conference(&mut self, id: &ConferenceId, name: &str) -> bool {
        let changed = self.book.rename_conference(id, name);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn switch_conference(&mut self, id: &ConferenceId) -> bool {
        let changed = self.book.switch_conference(id);
        if changed {
            info!("Switched to conference {}", self.book.active().name);
            self.persist();
        }
        changed
    }

    pub fn set_committee_name(&mut self, name: &str) {
        self.update("set_committee_name", |state, _| state.set_committee_name(name));
    }

    // ==================== Delegates ====================

    pub fn add_delegate(
        &mut self,
        country: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Option<DelegateId> {
        let mut delegate = Delegate::new(country);
        if let Some(name) = name {
            delegate = delegate.with_name(name);
        }
        if let Some(email) = email {
            delegate = delegate.with_email(email);
        }
        self.update("add_delegate", |state, _| state.add_delegate(delegate))
    }

    pub fn update_delegate(&mut self, id: &DelegateId, update: DelegateUpdate) -> bool {
        self.update("update_delegate", |state, _| state.update_delegate(id, update))
    }

    pub fn remove_delegate(&mut self, id: &DelegateId) -> bool {
        let removed = self.update("remove_delegate", |state, _| state.remove_delegate(id));
        if let Some(delegate) = &removed {
            info!("Removed delegate {} and dependent records", delegate.country);
        }
        removed.is_some()
    }

    /// Seat every delegation on a preset committee roster.
    pub fn import_roster(&mut self, committee: &str) -> Vec<DelegateId> {
        let Some(roster) = self.reference.roster_for(committee) else {
            warn!("No roster known for committee '{}'", committee);
            return Vec::new();
        };
        let added = self.update("import_roster", |state, _| {
            let added = state.import_delegations(&roster);
            if state.committee_name().is_empty() {
                state.set_committee_name(committee);
            }
            added
        });
        info!(
            "Imported {} of {} delegations from {}",
            added.len(),
            roster.len(),
            committee
        );
        added
    }

    pub fn set_roll_call(&mut self, id: &DelegateId, status: RollCallStatus) -> bool {
        self.update("set_roll_call", |state, _| state.set_roll_call(id, status))
    }

    pub fn mark_all_present(&mut self) -> usize {
        self.update("mark_all_present", |state, _| state.mark_all_present())
    }

    pub fn set_roll_call_complete(&mut self, complete: bool) -> bool {
        self.update("set_roll_call_complete", |state, _| {
            state.set_roll_call_complete(complete)
        })
    }

    pub fn set_voting_rights_revoked(&mut self, id: &DelegateId, revoked: bool) -> bool {
        self.update("set_voting_rights_revoked", |state, _| {
            state.set_voting_rights_revoked(id, revoked)
        })
    }

    pub fn set_speaking_rights_revoked(&mut self, id: &DelegateId, revoked: bool) -> bool {
        self.update("set_speaking_rights_revoked", |state, _| {
            state.set_speaking_rights_revoked(id, revoked)
        })
    }

    pub fn add_strike(&mut self, id: &DelegateId, kind: &str) -> bool {
        self.update("add_strike", |state, now| state.add_strike(id, kind, now))
    }

    pub fn remove_strike(&mut self, id: &DelegateId, kind: &str) -> bool {
        self.update("remove_strike", |state, _| state.remove_strike(id, kind))
    }

    pub fn add_feedback(
        &mut self,
        id: &DelegateId,
        kind: FeedbackKind,
        reason: &str,
    ) -> Option<FeedbackId> {
        self.update("add_feedback", |state, now| {
            state.add_feedback(id, kind, reason, now)
        })
    }

    pub fn edit_feedback(&mut self, id: &FeedbackId, reason: &str) -> bool {
        self.update("edit_feedback", |state, _| state.edit_feedback(id, reason))
    }

    pub fn delete_feedback(&mut self, id: &FeedbackId) -> bool {
        self.update("delete_feedback", |state, _| state.delete_feedback(id))
    }

    pub fn set_score(&mut self, id: &DelegateId, update: ScoreUpdate) -> bool {
        self.update("set_score", |state, _| state.set_score(id, update))
    }

    pub fn set_emoji_override(&mut self, delegation: &str, emoji: Option<&str>) -> bool {
        self.update("set_emoji_override", |state, _| {
            state.set_emoji_override(delegation, emoji)
        })
    }

    // ==================== Floor ====================

    pub fn add_motion(
        &mut self,
        text: &str,
        kind: MotionKind,
        submitter: Option<&str>,
        preset_label: Option<&str>,
    ) -> Option<MotionId> {
        self.update("add_motion", |state, now| {
            state.add_motion(text, kind, submitter, preset_label, now)
        })
    }

    pub fn toggle_motion_star(&mut self, id: &MotionId) -> Option<bool> {
        self.update("toggle_motion_star", |state, _| state.toggle_motion_star(id))
    }

    pub fn table_motion(&mut self, id: &MotionId) -> bool {
        let tabled = self.update("table_motion", |state, _| state.table_motion(id));
        if tabled && let Some(motion) = self.state().motion(id) {
            info!("Tabled: {}", motion.text);
            let event = CommitteeEvent::MotionTabled {
                conference: self.book.active_id().clone(),
                motion: motion.id.clone(),
                text: motion.text.clone(),
                kind: motion.kind,
            };
            self.emit(event);
        }
        tabled
    }

    pub fn remove_motion(&mut self, id: &MotionId) -> bool {
        self.update("remove_motion", |state, _| state.remove_motion(id))
    }

    pub fn add_resolution(&mut self, resolution: Resolution) -> Option<ResolutionId> {
        self.update("add_resolution", |state, _| state.add_resolution(resolution))
    }

    pub fn set_resolution_status(
        &mut self,
        id: &ResolutionId,
        status: Option<DecidedStatus>,
    ) -> bool {
        self.update("set_resolution_status", |state, _| {
            state.set_resolution_status(id, status)
        })
    }

    pub fn remove_resolution(&mut self, id: &ResolutionId) -> bool {
        self.update("remove_resolution", |state, _| state.remove_resolution(id))
    }

    pub fn add_amendment(&mut self, amendment: Amendment) -> Option<AmendmentId> {
        self.update("add_amendment", |state, _| state.add_amendment(amendment))
    }

    pub fn set_amendment_status(
        &mut self,
        id: &AmendmentId,
        status: Option<DecidedStatus>,
    ) -> bool {
        self.update("set_amendment_status", |state, _| {
            state.set_amendment_status(id, status)
        })
    }

    pub fn remove_amendment(&mut self, id: &AmendmentId) -> bool {
        self.update("remove_amendment", |state, _| state.remove_amendment(id))
    }

    // ==================== Voting ====================

    pub fn start_vote(&mut self, target: VoteTarget) -> bool {
        let label = target.to_string();
        let started = self.update("start_vote", |state, _| state.start_vote(target));
        if started {
            info!("Voting opened on {}", label);
        }
        started
    }

    /// Record a ballot. Eligibility is not checked.
    pub fn record_vote(&mut self, id: &DelegateId, choice: VoteChoice) -> bool {
        self.update("record_vote", |state, _| state.record_vote(id, choice))
    }

    pub fn clear_vote(&mut self, id: &DelegateId) -> bool {
        self.update("clear_vote", |state, _| state.clear_vote(id))
    }

    pub fn cancel_vote(&mut self) -> Option<VoteTarget> {
        let cancelled = self.update("cancel_vote", |state, _| state.cancel_vote());
        if let Some(target) = &cancelled {
            info!("Voting on {} cancelled", target);
        }
        cancelled
    }

    pub fn end_vote(&mut self) -> Option<VoteOutcome> {
        let outcome = self.update("end_vote", |state, _| state.end_vote())?;
        info!(
            "Voting on {} ended {} ({}, requires {})",
            outcome.target,
            outcome.status,
            outcome.tally.summary(),
            outcome.required.kind
        );
        self.emit(CommitteeEvent::VoteEnded {
            conference: self.book.active_id().clone(),
            outcome: outcome.clone(),
        });
        Some(outcome)
    }

    // ==================== Speakers ====================

    pub fn add_to_speakers(&mut self, id: &DelegateId) -> Option<SpeakerId> {
        self.update("add_to_speakers", |state, _| state.add_to_speakers(id))
    }

    pub fn set_active_speaker(&mut self, id: Option<&SpeakerId>) -> bool {
        self.update("set_active_speaker", |state, now| {
            state.set_active_speaker(id, now)
        })
    }

    pub fn next_speaker(&mut self) -> Option<SpeakerId> {
        let now = self.now();
        let before = self.state().active_speaker().map(|s| s.id.clone());
        let next = self.book.active_mut().data.next_speaker(now);
        if before.is_some() || next.is_some() {
            self.persist();
        }
        next
    }

    pub fn remove_from_speakers(&mut self, id: &SpeakerId) -> bool {
        self.update("remove_from_speakers", |state, _| {
            state.remove_from_speakers(id)
        })
    }

    pub fn set_speaker_duration(&mut self, seconds: u32) -> bool {
        self.update("set_speaker_duration", |state, _| {
            state.set_speaker_duration(seconds)
        })
    }

    /// Record a concern for the active speaker once they are past the grace
    /// period. Meant to be called from the display tick.
    pub fn check_overtime(&mut self) -> Option<FeedbackId> {
        let grace_ms = self.params.overtime_grace_ms();
        let feedback_id = self.update("check_overtime", |state, now| {
            state.check_overtime(now, grace_ms)
        })?;

        let delegate = self
            .state()
            .feedback()
            .iter()
            .find(|f| f.id == feedback_id)
            .and_then(|f| self.state().delegate(&f.delegate_id));
        if let Some(delegate) = delegate {
            warn!("{} is over time", delegate.country);
            let event = CommitteeEvent::SpeakerOvertime {
                conference: self.book.active_id().clone(),
                delegate: delegate.id.clone(),
                country: delegate.country.clone(),
            };
            self.emit(event);
        }
        Some(feedback_id)
    }

    // ==================== Session timer ====================

    /// Start the session, applying the configured default name if unnamed.
    pub fn start_session(&mut self) -> bool {
        let default_name = self.params.default_session_name.clone();
        let started = self.update("start_session", |state, now| {
            if state.timer().session_started {
                return false;
            }
            if state.timer().session_name.is_none()
                && let Some(name) = default_name.as_deref()
            {
                state.set_session_name(Some(name));
            }
            state.start_session(now)
        });
        if started {
            info!("Session started");
        }
        started
    }

    pub fn pause_session(&mut self) -> bool {
        self.update("pause_session", |state, now| state.pause_session(now))
    }

    pub fn resume_session(&mut self) -> bool {
        self.update("resume_session", |state, now| state.resume_session(now))
    }

    pub fn stop_session(&mut self) -> Option<SessionRecord> {
        let record = self.update("stop_session", |state, now| state.stop_session(now))?;
        info!(
            "Session '{}' stopped after {}s",
            record.name, record.duration_seconds
        );
        self.emit(CommitteeEvent::SessionStopped {
            conference: self.book.active_id().clone(),
            record: record.clone(),
        });
        Some(record)
    }

    pub fn set_session_duration(&mut self, minutes: Option<u32>) {
        self.update("set_session_duration", |state, _| {
            state.set_session_duration(minutes)
        })
    }

    pub fn set_session_name(&mut self, name: Option<&str>) {
        self.update("set_session_name", |state, _| state.set_session_name(name))
    }

    pub fn delete_session_record(&mut self, id: &SessionRecordId) -> bool {
        self.update("delete_session_record", |state, _| {
            state.delete_session_record(id)
        })
    }

    // ==================== Lifecycle ====================

    /// Flush pending writes and stop the persistence task.
    pub async fn shutdown(self) -> Option<DateTime<Utc>> {
        match self.persistence {
            Some(handle) => handle.shutdown().await,
            None => None,
        }
    }

    // ==================== Internals ====================

    fn update<T: Changed>(
        &mut self,
        action: &'static str,
        op: impl FnOnce(&mut CommitteeState, EpochMillis) -> T,
    ) -> T {
        let now = self.clock.now_ms();
        let result = op(&mut self.book.active_mut().data, now);
        if result.changed() {
            debug!("{}: applied", action);
            self.persist();
        } else {
            debug!("{}: nothing to change", action);
        }
        result
    }

    fn persist(&self) {
        let Some(handle) = &self.persistence else {
            return;
        };
        match to_document(&self.book) {
            Ok(document) => handle.schedule(document),
            Err(e) => warn!("Could not serialize conferences: {}", e),
        }
    }

    fn emit(&self, event: CommitteeEvent) {
        debug!("event: {}", event.event_type());
        self.event_log.log(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::ManualClock;
    use crate::ports::document_store::{DocumentStore, StoreError};
    use async_trait::async_trait;
    use dais_domain::{DisplayStatus, MajorityType, MotionStatus, VoteTally};
    use std::sync::Mutex;
    use std::time::Duration;

    const T0: EpochMillis = 1_700_000_000_000;

    #[derive(Default)]
    struct MockEventLog {
        events: Mutex<Vec<CommitteeEvent>>,
    }

    impl MockEventLog {
        fn types(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.event_type().to_string())
                .collect()
        }
    }

    impl CommitteeEventLog for MockEventLog {
        fn log(&self, event: &CommitteeEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    struct MockReference;

    impl ReferenceData for MockReference {
        fn flag_for(&self, delegation: &str) -> Option<String> {
            (delegation == "France").then(|| "🇫🇷".to_string())
        }

        fn roster_for(&self, committee: &str) -> Option<Vec<String>> {
            (committee == "UNSC").then(|| vec!["France".into(), "China".into()])
        }
    }

    #[derive(Default)]
    struct MockStore {
        saves: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn load(&self, _key: &str) -> Result<Option<Value>, StoreError> {
            Ok(self.saves.lock().unwrap().last().cloned())
        }

        async fn save(&self, _key: &str, document: &Value) -> Result<(), StoreError> {
            self.saves.lock().unwrap().push(document.clone());
            Ok(())
        }
    }

    fn session() -> (CommitteeSession, Arc<ManualClock>, Arc<MockEventLog>) {
        let clock = Arc::new(ManualClock::new(T0));
        let events = Arc::new(MockEventLog::default());
        let session = CommitteeSession::new(ConferenceBook::new(), clock.clone())
            .with_event_log(events.clone())
            .with_reference_data(Arc::new(MockReference));
        (session, clock, events)
    }

    #[test]
    fn test_vote_flow_logs_outcome() {
        let (mut session, _, events) = session();
        let fr = session.add_delegate("France", None, None).unwrap();
        let cn = session.add_delegate("China", None, None).unwrap();
        let motion = session
            .add_motion("Moderated caucus", MotionKind::Motion, None, Some("moderated caucus"))
            .unwrap();

        assert!(session.start_vote(VoteTarget::Motion(motion.clone())));
        session.record_vote(&fr, VoteChoice::Yes);
        session.record_vote(&cn, VoteChoice::Abstain);

        let outcome = session.end_vote().unwrap();
        assert_eq!(outcome.required.kind, MajorityType::Simple);
        assert_eq!(outcome.tally, VoteTally::new(1, 0, 1));
        assert_eq!(outcome.status, DisplayStatus::Passed);
        assert_eq!(
            session.state().motion(&motion).unwrap().status,
            MotionStatus::Passed
        );
        assert_eq!(events.types(), vec!["vote_ended"]);
        assert!(session.end_vote().is_none());
    }

    #[test]
    fn test_session_timer_uses_clock() {
        let (mut session, clock, events) = session();
        assert!(session.start_session());
        clock.advance(60_000);
        assert!(session.pause_session());
        assert!(!session.pause_session());
        clock.advance(30_000);
        assert!(session.resume_session());
        clock.advance(30_000);
        assert_eq!(session.session_elapsed_ms(), 90_000);

        let record = session.stop_session().unwrap();
        assert_eq!(record.duration_seconds, 90);
        assert_eq!(record.total_paused_ms, 30_000);
        assert_eq!(events.types(), vec!["session_stopped"]);
    }

    #[test]
    fn test_default_session_name_applied() {
        let (session, _, _) = session();
        let mut session = session.with_params(
            SessionParams::default().with_default_session_name(Some("Committee Session".into())),
        );
        session.start_session();
        let record = session.stop_session().unwrap();
        assert_eq!(record.name, "Committee Session");
    }

    #[test]
    fn test_overtime_concern_is_logged_once() {
        let (mut session, clock, events) = session();
        let fr = session.add_delegate("France", None, None).unwrap();
        let speaker = session.add_to_speakers(&fr).unwrap();
        session.set_active_speaker(Some(&speaker));

        clock.advance(69_000);
        assert!(session.check_overtime().is_none());
        clock.advance(1_000);
        assert!(session.check_overtime().is_some());
        clock.advance(5_000);
        assert!(session.check_overtime().is_none());

        assert_eq!(session.state().feedback_for(&fr).count(), 1);
        assert_eq!(events.types(), vec!["speaker_overtime"]);
    }

    #[test]
    fn test_conference_lifecycle_events() {
        let (mut session, _, events) = session();
        let first = session.book().active_id().clone();
        let second = session.add_conference("Crisis");
        assert_eq!(session.book().active_id(), &second);
        assert_eq!(session.state().speaker_duration(), 60);

        assert!(session.switch_conference(&first));
        assert!(session.remove_conference(&second));
        assert!(!session.remove_conference(&second));
        assert_eq!(events.types(), vec!["conference_added", "conference_removed"]);
    }

    #[test]
    fn test_operations_touch_only_active_conference() {
        let (mut session, _, _) = session();
        session.add_delegate("Chile", None, None);
        session.add_conference("Second");
        assert!(session.state().delegates().is_empty());
        assert_eq!(session.book().conferences()[0].data.delegates().len(), 1);
    }

    #[test]
    fn test_roster_import_and_flags() {
        let (mut session, _, _) = session();
        assert_eq!(session.import_roster("UNSC").len(), 2);
        assert_eq!(session.state().committee_name(), "UNSC");
        assert!(session.import_roster("Unknown").is_empty());
        assert!(session.import_roster("UNSC").is_empty());

        assert_eq!(session.emoji_for("France").as_deref(), Some("🇫🇷"));
        session.set_emoji_override("France", Some("🥖"));
        assert_eq!(session.emoji_for("France").as_deref(), Some("🥖"));
        assert_eq!(session.emoji_for("China"), None);
    }

    #[test]
    fn test_table_motion_event() {
        let (mut session, _, events) = session();
        let point = session
            .add_motion("Point of order", MotionKind::Point, Some("Chile"), None)
            .unwrap();
        assert!(session.table_motion(&point));
        assert!(!session.table_motion(&point));
        assert_eq!(events.types(), vec!["motion_tabled"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutations_are_persisted_on_shutdown() {
        let store = Arc::new(MockStore::default());
        let clock = Arc::new(ManualClock::new(T0));
        let handle = PersistenceHandle::spawn(
            store.clone(),
            "dais/anonymous/conferences",
            Duration::from_secs(5),
        );
        let mut session =
            CommitteeSession::new(ConferenceBook::new(), clock).with_persistence(handle);

        session.add_delegate("Kenya", None, None);
        session.add_delegate("Peru", None, None);
        assert!(!session.remove_strike(&DelegateId::new("nobody"), "phone"));

        assert!(session.shutdown().await.is_some());
        let saves = store.saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        let delegates = &saves[0]["conferences"][0]["data"]["delegates"];
        assert_eq!(delegates.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_do_not_schedule_saves() {
        let store = Arc::new(MockStore::default());
        let handle = PersistenceHandle::spawn(store.clone(), "k", Duration::from_millis(10));
        let session = CommitteeSession::new(ConferenceBook::new(), Arc::new(ManualClock::new(T0)))
            .with_persistence(handle);

        let _ = session.state().delegates();
        let _ = session.snapshot().unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(session.last_saved().is_none());
        assert!(store.saves.lock().unwrap().is_empty());
    }
}
