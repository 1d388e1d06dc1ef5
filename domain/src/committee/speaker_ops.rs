//! Speakers list operations

use super::state::CommitteeState;
use crate::core::ids::{DelegateId, FeedbackId, SpeakerId};
use crate::core::time::EpochMillis;
use crate::delegate::{Delegate, FeedbackKind};
use crate::roll_call::{can_speak, pick_random_speaker, speaker_pool};
use crate::speakers::Speaker;
use rand::Rng;

/// Reason recorded on the automatic overtime concern
pub const OVERTIME_REASON: &str = "Exceeded allotted speaking time";

impl CommitteeState {
    /// Append a delegate to the speakers list
    ///
    /// Delegates whose speaking rights are revoked are refused.
    pub fn add_to_speakers(&mut self, delegate_id: &DelegateId) -> Option<SpeakerId> {
        let delegate = self.delegate(delegate_id).filter(|d| can_speak(d))?;
        let speaker = Speaker::for_delegate(delegate, self.speaker_duration);
        let id = speaker.id.clone();
        self.speakers.push(speaker);
        Some(id)
    }

    /// Make one speaker active, or clear the floor with `None`
    ///
    /// Every other entry stops speaking. An unknown id changes nothing.
    pub fn set_active_speaker(&mut self, id: Option<&SpeakerId>, now: EpochMillis) -> bool {
        if let Some(id) = id
            && self.speaker(id).is_none()
        {
            return false;
        }
        for speaker in &mut self.speakers {
            if Some(&speaker.id) == id {
                speaker.start(now);
            } else {
                speaker.stop();
            }
        }
        self.overtime.reset();
        true
    }

    /// Activate the entry after the current speaker, or the first one
    pub fn next_speaker(&mut self, now: EpochMillis) -> Option<SpeakerId> {
        let next = match self.speakers.iter().position(|s| s.speaking) {
            Some(current) => self.speakers.get(current + 1),
            None => self.speakers.first(),
        }
        .map(|s| s.id.clone());

        match next {
            Some(id) => {
                self.set_active_speaker(Some(&id), now);
                Some(id)
            }
            None => {
                self.set_active_speaker(None, now);
                None
            }
        }
    }

    pub fn remove_from_speakers(&mut self, id: &SpeakerId) -> bool {
        let Some(index) = self.speakers.iter().position(|s| &s.id == id) else {
            return false;
        };
        let removed = self.speakers.remove(index);
        if removed.speaking {
            self.overtime.reset();
        }
        true
    }

    /// Default speaking time for speakers added from now on
    pub fn set_speaker_duration(&mut self, seconds: u32) -> bool {
        if seconds == 0 {
            return false;
        }
        self.speaker_duration = seconds;
        true
    }

    /// Draw a delegate at random from those allowed to speak
    pub fn pick_random_speaker<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Delegate> {
        let pool = speaker_pool(&self.delegates, self.roll_call_complete);
        pick_random_speaker(&pool, rng)
    }

    /// Record a concern if the active speaker has run over
    ///
    /// Fires at most once per speech, once the speaker has been past their
    /// time for `grace_ms`.
    pub fn check_overtime(&mut self, now: EpochMillis, grace_ms: i64) -> Option<FeedbackId> {
        let active = self.speakers.iter().find(|s| s.speaking);
        let delegate_id =
            self.overtime
                .observe(active, self.speaker_duration, grace_ms, now)?;
        self.add_feedback(&delegate_id, FeedbackKind::Concern, OVERTIME_REASON, now)
    }
}
