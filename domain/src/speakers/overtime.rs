//! Once-per-speech overtime detection

use super::speaker::Speaker;
use crate::core::ids::DelegateId;
use crate::core::time::EpochMillis;

/// How long a speaker may run over before a concern is recorded
pub const OVERTIME_GRACE_MS: i64 = 10_000;

/// Tracks which speech has already been flagged
///
/// A speech is identified by `(delegate_id, start_time)`. When a different
/// speech is observed the monitor resets, so each speech can be flagged at
/// most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OvertimeMonitor {
    speech: Option<(DelegateId, EpochMillis)>,
    flagged: bool,
}

impl OvertimeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current speech
    pub fn reset(&mut self) {
        self.speech = None;
        self.flagged = false;
    }

    /// Record that the speech `(delegate_id, start)` was already flagged
    pub fn mark_flagged(&mut self, delegate_id: DelegateId, start: EpochMillis) {
        self.speech = Some((delegate_id, start));
        self.flagged = true;
    }

    /// Observe the active speaker at `now`
    ///
    /// Returns the delegate to record a concern for, exactly once per speech,
    /// when the speaker has been over time for at least `grace_ms`.
    pub fn observe(
        &mut self,
        active: Option<&Speaker>,
        floor_secs: u32,
        grace_ms: i64,
        now: EpochMillis,
    ) -> Option<DelegateId> {
        let Some((speaker, start)) = active.and_then(|s| s.start_time_ms().map(|t| (s, t))) else {
            self.reset();
            return None;
        };

        let key = (speaker.delegate_id.clone(), start);
        if self.speech.as_ref() != Some(&key) {
            self.speech = Some(key);
            self.flagged = false;
        }

        if self.flagged {
            return None;
        }

        let remaining = speaker.remaining_ms(now, floor_secs)?;
        if remaining <= -grace_ms {
            self.flagged = true;
            Some(speaker.delegate_id.clone())
        } else {
            None
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }
}
