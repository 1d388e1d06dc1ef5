//! Session parameters: defaults the use case applies to live sessions.
//!
//! [`SessionParams`] is built from the file configuration in the
//! infrastructure layer and handed to
//! [`CommitteeSession`](crate::use_cases::committee_session::CommitteeSession).

use dais_domain::{DEFAULT_SPEAKER_SECONDS, OVERTIME_GRACE_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Speaking time given to conferences created in this process.
    pub default_speaker_seconds: u32,
    /// How long a speaker may run over before a concern is recorded.
    pub overtime_grace: Duration,
    /// Name applied when a session starts without one.
    pub default_session_name: Option<String>,
    /// Quiet period before a pending snapshot is written.
    pub save_debounce: Duration,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            default_speaker_seconds: DEFAULT_SPEAKER_SECONDS,
            overtime_grace: Duration::from_millis(OVERTIME_GRACE_MS as u64),
            default_session_name: None,
            save_debounce: Duration::from_millis(500),
        }
    }
}

impl SessionParams {
    // ==================== Builder Methods ====================

    pub fn with_default_speaker_seconds(mut self, seconds: u32) -> Self {
        self.default_speaker_seconds = seconds;
        self
    }

    pub fn with_overtime_grace(mut self, grace: Duration) -> Self {
        self.overtime_grace = grace;
        self
    }

    pub fn with_default_session_name(mut self, name: Option<String>) -> Self {
        self.default_session_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_save_debounce(mut self, debounce: Duration) -> Self {
        self.save_debounce = debounce;
        self
    }

    pub fn overtime_grace_ms(&self) -> i64 {
        i64::try_from(self.overtime_grace.as_millis()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SessionParams::default();
        assert_eq!(params.default_speaker_seconds, 60);
        assert_eq!(params.overtime_grace_ms(), 10_000);
        assert_eq!(params.default_session_name, None);
    }

    #[test]
    fn test_blank_session_name_is_none() {
        let params = SessionParams::default().with_default_session_name(Some("  ".into()));
        assert_eq!(params.default_session_name, None);
    }
}
