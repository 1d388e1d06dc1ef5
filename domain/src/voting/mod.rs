//! Voting session: the single in-flight vote and its ballot map

pub mod session;

pub use session::{VoteTarget, VotingSession};
