//! Domain layer for dais
//!
//! This crate contains the committee session state machine: entities, value
//! objects and the transitions between them. It has no dependencies on
//! storage, clocks or presentation; time is always passed in as epoch
//! milliseconds.
//!
//! # Core Concepts
//!
//! ## Committee state
//!
//! A [`CommitteeState`] holds everything one committee room tracks:
//!
//! - **Delegates** with roll-call status, strikes, feedback and scores
//! - **Floor items**: motions, points, draft resolutions and amendments
//! - **The vote in progress**: at most one, with its ballot map
//! - **Speakers list** with a single active speaker and overtime detection
//! - **Session timer** with pause accounting and archived records
//!
//! ## Conferences
//!
//! A [`ConferenceBook`] keeps one committee state per conference, exactly one
//! of them active, and is persisted as a versioned document.

pub mod committee;
pub mod conference;
pub mod core;
pub mod delegate;
pub mod floor;
pub mod majority;
pub mod roll_call;
pub mod session_timer;
pub mod speakers;
pub mod voting;

// Re-export commonly used types
pub use committee::{CommitteeState, OVERTIME_REASON, ReloadMode, VoteOutcome};
pub use conference::{
    CURRENT_DOCUMENT_VERSION, Conference, ConferenceBook, DEFAULT_CONFERENCE_NAME, LoadOutcome,
    load_document, to_document,
};
pub use core::{
    error::DomainError,
    ids::{
        AmendmentId, ConferenceId, DelegateId, FeedbackId, MotionId, ResolutionId,
        SessionRecordId, SpeakerId,
    },
    time::{EpochMillis, MAX_EPOCH_MS, checked_epoch_ms, normalize_epoch_ms},
};
pub use delegate::{
    Delegate, DelegateCriterion, DelegateScore, DelegateUpdate, Feedback, FeedbackKind,
    PaperCriterion, ScoreUpdate, ScoreValue, Strike,
};
pub use floor::{
    Amendment, DecidedStatus, DisplayStatus, Motion, MotionKind, MotionStatus, Resolution,
};
pub use majority::{
    MajorityRequirement, MajorityType, VoteChoice, VoteTally, compute_passed, majority_for,
};
pub use roll_call::{
    RollCallStatus, RollCallSummary, VotingEligibility, can_speak, effective_status,
    speaker_pool, voting_eligibility,
};
pub use session_timer::{SessionRecord, SessionTimer};
pub use speakers::{DEFAULT_SPEAKER_SECONDS, OVERTIME_GRACE_MS, OvertimeMonitor, Speaker};
pub use voting::{VoteTarget, VotingSession};
