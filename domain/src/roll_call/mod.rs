//! Roll call and eligibility
//!
//! Derives what each delegate may do on the floor from their roll-call status
//! and rights flags. Eligibility is advisory: the voting session records any
//! ballot it is given, and callers use these answers to decide which options
//! to offer.

pub mod eligibility;

pub use eligibility::{
    RollCallStatus, RollCallSummary, VotingEligibility, can_speak, effective_status,
    pick_random_speaker, speaker_pool, voting_eligibility,
};
