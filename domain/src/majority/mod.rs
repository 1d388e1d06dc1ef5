//! Majority rules
//!
//! Maps a floor item to the threshold it needs and decides pass/fail from a
//! vote tally. Everything here is pure: the same inputs always give the same
//! answer, and nothing in this module mutates committee state.
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────┐
//! │ Item                         │ Majority             │
//! ├──────────────────────────────┼──────────────────────┤
//! │ Point (any)                  │ Chair's discretion   │
//! │ Close debate / voting proc.  │ Two-thirds           │
//! │ Adjourn / suspend            │ Two-thirds           │
//! │ Any other motion             │ Simple               │
//! │ Resolution                   │ Two-thirds           │
//! │ Amendment                    │ Simple               │
//! └──────────────────────────────┴──────────────────────┘
//! ```

pub mod rule;
pub mod tally;

pub use rule::{MajorityRequirement, MajorityType, compute_passed, majority_for};
pub use tally::{VoteChoice, VoteTally};
