//! Port for the committee event log.
//!
//! Defines the [`CommitteeEventLog`] trait for recording notable committee
//! events (a vote ending, a motion tabled, a speaker running over, a session
//! stopped, conferences added or removed) as structured records.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps a machine-readable
//! record of what happened in the room (JSONL).

use dais_domain::{
    ConferenceId, DelegateId, MotionId, MotionKind, SessionRecord, VoteOutcome,
};
use serde::Serialize;

/// A structured committee event.
///
/// Serializes as one flat object whose `type` field names the variant, e.g.
/// `{"type":"speaker_overtime","conference":"..","delegate":"..","country":"Peru"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommitteeEvent {
    ConferenceAdded {
        conference: ConferenceId,
        name: String,
    },
    ConferenceRemoved {
        conference: ConferenceId,
        name: String,
    },
    MotionTabled {
        conference: ConferenceId,
        motion: MotionId,
        text: String,
        kind: MotionKind,
    },
    VoteEnded {
        conference: ConferenceId,
        outcome: VoteOutcome,
    },
    SpeakerOvertime {
        conference: ConferenceId,
        delegate: DelegateId,
        country: String,
    },
    SessionStopped {
        conference: ConferenceId,
        record: SessionRecord,
    },
}

impl CommitteeEvent {
    /// Event type identifier, as written in the `type` field.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ConferenceAdded { .. } => "conference_added",
            Self::ConferenceRemoved { .. } => "conference_removed",
            Self::MotionTabled { .. } => "motion_tabled",
            Self::VoteEnded { .. } => "vote_ended",
            Self::SpeakerOvertime { .. } => "speaker_overtime",
            Self::SessionStopped { .. } => "session_stopped",
        }
    }

    /// Conference the event happened in.
    pub fn conference(&self) -> &ConferenceId {
        match self {
            Self::ConferenceAdded { conference, .. }
            | Self::ConferenceRemoved { conference, .. }
            | Self::MotionTabled { conference, .. }
            | Self::VoteEnded { conference, .. }
            | Self::SpeakerOvertime { conference, .. }
            | Self::SessionStopped { conference, .. } => conference,
        }
    }
}

/// Port for logging committee events.
///
/// `log` is synchronous and infallible: a failing log must never disrupt the
/// session, so implementations swallow their own errors.
pub trait CommitteeEventLog: Send + Sync {
    fn log(&self, event: &CommitteeEvent);
}

/// No-op implementation for tests and when the event log is disabled.
pub struct NoEventLog;

impl CommitteeEventLog for NoEventLog {
    fn log(&self, _event: &CommitteeEvent) {}
}
