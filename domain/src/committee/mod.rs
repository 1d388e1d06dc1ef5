//! Per-conference committee state and the operations that mutate it
//!
//! [`CommitteeState`] is the single state object a conference owns. Every
//! operation is a synchronous transition; requests that make no sense in the
//! current state (voting on a point, pausing an idle timer, removing an
//! unknown id) leave the state untouched and report that nothing changed.
//!
//! Operations are grouped by concern:
//!
//! | file              | concern                                            |
//! |-------------------|----------------------------------------------------|
//! | `registry.rs`     | delegates, roll call, strikes, feedback, scores    |
//! | `floor_ops.rs`    | motions, points, resolutions, amendments           |
//! | `voting_ops.rs`   | the single in-flight vote                          |
//! | `speaker_ops.rs`  | speakers list, active speaker, overtime            |
//! | `timer_ops.rs`    | session timer                                      |

mod floor_ops;
mod registry;
mod speaker_ops;
pub mod state;
mod timer_ops;
mod voting_ops;

pub use speaker_ops::OVERTIME_REASON;
pub use state::{CommitteeState, ReloadMode};
pub use voting_ops::VoteOutcome;
