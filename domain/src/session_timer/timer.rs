//! Session timer
//!
//! Elapsed and remaining time are pure functions of the stored fields and a
//! caller-supplied `now`. Nothing here reads the wall clock.
//!
//! | state   | `session_started` | `session_paused_at` |
//! |---------|-------------------|---------------------|
//! | idle    | false             | None                |
//! | running | true              | None                |
//! | paused  | true              | Some                |

use crate::core::ids::SessionRecordId;
use crate::core::time::EpochMillis;
use serde::{Deserialize, Serialize};

/// Archived summary of a stopped session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: SessionRecordId,
    pub name: String,
    pub start_time: EpochMillis,
    pub end_time: EpochMillis,
    pub duration_seconds: i64,
    #[serde(default)]
    pub total_paused_ms: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionTimer {
    pub session_started: bool,
    pub session_start_time: Option<EpochMillis>,
    /// Countdown length; `None` runs open-ended
    pub session_duration_minutes: Option<u32>,
    pub session_paused_at: Option<EpochMillis>,
    pub session_total_paused_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
    pub session_records: Vec<SessionRecord>,
}

impl SessionTimer {
    pub fn is_running(&self) -> bool {
        self.session_started && self.session_paused_at.is_none()
    }

    pub fn is_paused(&self) -> bool {
        self.session_started && self.session_paused_at.is_some()
    }

    /// Start the session. Ignored if a session is already under way.
    pub fn start(&mut self, now: EpochMillis) -> bool {
        if self.session_started {
            return false;
        }
        self.session_started = true;
        self.session_start_time = Some(now);
        self.session_paused_at = None;
        self.session_total_paused_ms = 0;
        true
    }

    pub fn pause(&mut self, now: EpochMillis) -> bool {
        if !self.session_started || self.session_paused_at.is_some() {
            return false;
        }
        self.session_paused_at = Some(now);
        true
    }

    pub fn resume(&mut self, now: EpochMillis) -> bool {
        let Some(paused_at) = self.session_paused_at.take() else {
            return false;
        };
        self.session_total_paused_ms = self
            .session_total_paused_ms
            .saturating_add(now.saturating_sub(paused_at).max(0));
        true
    }

    /// Stop the session and archive it
    ///
    /// Time spent in a pause that is still open counts as paused. The live
    /// fields reset to idle; the countdown length is kept for the next run.
    pub fn stop(&mut self, now: EpochMillis) -> Option<SessionRecord> {
        let start = self.session_start_time?;
        let open_pause = self
            .session_paused_at
            .map(|paused_at| now.saturating_sub(paused_at).max(0))
            .unwrap_or(0);
        let total_paused_ms = self.session_total_paused_ms.saturating_add(open_pause);
        let duration_seconds =
            (now.saturating_sub(start).saturating_sub(total_paused_ms) / 1000).max(0);

        let name = self
            .session_name
            .take()
            .unwrap_or_else(|| format!("Session {}", self.session_records.len() + 1));

        let record = SessionRecord {
            id: SessionRecordId::generate(),
            name,
            start_time: start,
            end_time: now,
            duration_seconds,
            total_paused_ms,
        };
        self.session_records.push(record.clone());

        self.session_started = false;
        self.session_start_time = None;
        self.session_paused_at = None;
        self.session_total_paused_ms = 0;
        Some(record)
    }

    /// Milliseconds of unpaused session time at `now`
    pub fn elapsed_ms(&self, now: EpochMillis) -> i64 {
        let Some(start) = self.session_start_time else {
            return 0;
        };
        let until = self.session_paused_at.unwrap_or(now);
        until
            .saturating_sub(start)
            .saturating_sub(self.session_total_paused_ms)
            .max(0)
    }

    /// Countdown remaining, negative once the session overruns
    pub fn remaining_ms(&self, now: EpochMillis) -> Option<i64> {
        self.session_duration_minutes
            .map(|minutes| i64::from(minutes) * 60_000 - self.elapsed_ms(now))
    }

    pub fn set_duration(&mut self, minutes: Option<u32>) {
        self.session_duration_minutes = minutes.filter(|m| *m > 0);
    }

    pub fn set_name(&mut self, name: Option<&str>) {
        self.session_name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
    }

    pub fn delete_record(&mut self, id: &SessionRecordId) -> bool {
        let before = self.session_records.len();
        self.session_records.retain(|record| &record.id != id);
        self.session_records.len() != before
    }

    /// Bring a freshly loaded timer into a consistent state
    ///
    /// With `keep_pause` an open pause stays open, clamped so it never starts
    /// before the session did. Without it the pause is closed: the time since
    /// it was set is folded into the paused total so the gap is not counted
    /// as session time.
    pub fn normalize_for_reload(&mut self, now: EpochMillis, keep_pause: bool) {
        if self.session_start_time.is_none() {
            self.session_started = false;
        }
        if !self.session_started {
            self.session_start_time = None;
            self.session_paused_at = None;
            self.session_total_paused_ms = 0;
        }
        self.session_total_paused_ms = self.session_total_paused_ms.max(0);

        let Some(paused_at) = self.session_paused_at else {
            return;
        };
        let paused_at = self
            .session_start_time
            .map_or(paused_at, |start| paused_at.max(start));
        if keep_pause {
            self.session_paused_at = Some(paused_at);
        } else {
            self.session_paused_at = None;
            self.session_total_paused_ms = self
                .session_total_paused_ms
                .saturating_add(now.saturating_sub(paused_at).max(0));
        }
    }
}
