//! A single entry in the speakers list

use crate::core::ids::{DelegateId, SpeakerId};
use crate::core::time::{EpochMillis, checked_epoch_ms, normalize_epoch_ms};
use crate::delegate::Delegate;
use serde::{Deserialize, Serialize};

/// Default speaking time in seconds
pub const DEFAULT_SPEAKER_SECONDS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: SpeakerId,
    pub delegate_id: DelegateId,
    pub country: String,
    #[serde(default)]
    pub name: String,
    /// Allotted time in seconds
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub speaking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<EpochMillis>,
}

fn default_duration() -> u32 {
    DEFAULT_SPEAKER_SECONDS
}

impl Speaker {
    /// Queue entry for `delegate`, not yet speaking
    pub fn for_delegate(delegate: &Delegate, duration: u32) -> Self {
        Self {
            id: SpeakerId::generate(),
            delegate_id: delegate.id.clone(),
            country: delegate.country.clone(),
            name: delegate.display_name().to_string(),
            duration,
            speaking: false,
            start_time: None,
        }
    }

    /// Start time in epoch milliseconds, accepting legacy second values
    pub fn start_time_ms(&self) -> Option<EpochMillis> {
        self.start_time.map(normalize_epoch_ms)
    }

    pub fn start(&mut self, now: EpochMillis) {
        self.speaking = true;
        self.start_time = Some(now);
    }

    /// Whether the entry is speaking with a usable start time
    pub fn holds_floor(&self) -> bool {
        self.speaking && self.start_time.and_then(checked_epoch_ms).is_some()
    }

    pub fn stop(&mut self) {
        self.speaking = false;
        self.start_time = None;
    }

    pub fn elapsed_ms(&self, now: EpochMillis) -> Option<i64> {
        self.start_time_ms().map(|start| now.saturating_sub(start))
    }

    /// Milliseconds left; negative once the speaker runs over
    ///
    /// The allotment is never shorter than `floor_secs`, the committee's
    /// current default speaking time.
    pub fn remaining_ms(&self, now: EpochMillis, floor_secs: u32) -> Option<i64> {
        let allotted = i64::from(self.duration.max(floor_secs)) * 1000;
        self.elapsed_ms(now).map(|elapsed| allotted.saturating_sub(elapsed))
    }
}
