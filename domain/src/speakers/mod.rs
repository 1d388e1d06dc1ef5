//! Speaker queue entries and overtime detection

pub mod overtime;
pub mod speaker;

pub use overtime::{OVERTIME_GRACE_MS, OvertimeMonitor};
pub use speaker::{DEFAULT_SPEAKER_SECONDS, Speaker};
