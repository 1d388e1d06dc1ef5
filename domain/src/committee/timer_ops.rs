//! Session timer operations

use super::state::CommitteeState;
use crate::core::ids::SessionRecordId;
use crate::core::time::EpochMillis;
use crate::session_timer::SessionRecord;

impl CommitteeState {
    pub fn start_session(&mut self, now: EpochMillis) -> bool {
        self.timer.start(now)
    }

    pub fn pause_session(&mut self, now: EpochMillis) -> bool {
        self.timer.pause(now)
    }

    pub fn resume_session(&mut self, now: EpochMillis) -> bool {
        self.timer.resume(now)
    }

    pub fn stop_session(&mut self, now: EpochMillis) -> Option<SessionRecord> {
        self.timer.stop(now)
    }

    pub fn set_session_duration(&mut self, minutes: Option<u32>) {
        self.timer.set_duration(minutes);
    }

    pub fn set_session_name(&mut self, name: Option<&str>) {
        self.timer.set_name(name);
    }

    pub fn delete_session_record(&mut self, id: &SessionRecordId) -> bool {
        self.timer.delete_record(id)
    }

    pub fn session_elapsed_ms(&self, now: EpochMillis) -> i64 {
        self.timer.elapsed_ms(now)
    }

    pub fn session_remaining_ms(&self, now: EpochMillis) -> Option<i64> {
        self.timer.remaining_ms(now)
    }
}
