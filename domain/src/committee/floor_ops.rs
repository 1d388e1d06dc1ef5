//! Motion, resolution and amendment lifecycle

use super::state::CommitteeState;
use crate::core::ids::{AmendmentId, MotionId, ResolutionId};
use crate::core::time::EpochMillis;
use crate::floor::{Amendment, DecidedStatus, Motion, MotionKind, MotionStatus, Resolution};

impl CommitteeState {
    // ==================== Motions and points ====================

    /// Raise a motion or point. Blank text is refused.
    pub fn add_motion(
        &mut self,
        text: &str,
        kind: MotionKind,
        submitter: Option<&str>,
        preset_label: Option<&str>,
        now: EpochMillis,
    ) -> Option<MotionId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let motion = Motion::new(text, kind, now)
            .with_submitter(submitter)
            .with_preset_label(preset_label);
        let id = motion.id.clone();
        self.motions.push(motion);
        Some(id)
    }

    /// Toggle the star; returns the new value
    pub fn toggle_motion_star(&mut self, id: &MotionId) -> Option<bool> {
        let motion = self.motions.iter_mut().find(|m| &m.id == id)?;
        motion.starred = !motion.starred;
        Some(motion.starred)
    }

    /// Table an active motion or point
    pub fn table_motion(&mut self, id: &MotionId) -> bool {
        match self.motions.iter_mut().find(|m| &m.id == id) {
            Some(motion) if motion.status == MotionStatus::Active => {
                motion.status = MotionStatus::Tabled;
                true
            }
            _ => false,
        }
    }

    /// Remove a motion, cancelling a vote held on it
    pub fn remove_motion(&mut self, id: &MotionId) -> bool {
        let before = self.motions.len();
        self.motions.retain(|m| &m.id != id);
        if self.motions.len() == before {
            return false;
        }
        if self.voting.as_ref().is_some_and(|v| v.target.is_motion(id)) {
            self.voting = None;
        }
        true
    }

    // ==================== Resolutions ====================

    /// File a draft resolution. A blank title is refused.
    pub fn add_resolution(&mut self, mut resolution: Resolution) -> Option<ResolutionId> {
        resolution.title = resolution.title.trim().to_string();
        if resolution.title.is_empty() {
            return None;
        }
        resolution.main_submitters = clean_names(resolution.main_submitters);
        resolution.co_submitters = clean_names(resolution.co_submitters);
        let id = resolution.id.clone();
        self.resolutions.push(resolution);
        Some(id)
    }

    /// Set or clear the chair's explicit outcome
    pub fn set_resolution_status(
        &mut self,
        id: &ResolutionId,
        status: Option<DecidedStatus>,
    ) -> bool {
        match self.resolutions.iter_mut().find(|r| &r.id == id) {
            Some(resolution) => {
                resolution.status = status;
                true
            }
            None => false,
        }
    }

    /// Remove a resolution, cancelling a vote held on it
    ///
    /// Amendments pointing at it are kept.
    pub fn remove_resolution(&mut self, id: &ResolutionId) -> bool {
        let before = self.resolutions.len();
        self.resolutions.retain(|r| &r.id != id);
        if self.resolutions.len() == before {
            return false;
        }
        if self.voting.as_ref().is_some_and(|v| v.target.is_resolution(id)) {
            self.voting = None;
        }
        true
    }

    // ==================== Amendments ====================

    pub fn add_amendment(&mut self, mut amendment: Amendment) -> Option<AmendmentId> {
        amendment.title = amendment.title.trim().to_string();
        if amendment.title.is_empty() {
            return None;
        }
        amendment.main_submitters = clean_names(amendment.main_submitters);
        amendment.co_submitters = clean_names(amendment.co_submitters);
        let id = amendment.id.clone();
        self.amendments.push(amendment);
        Some(id)
    }

    pub fn set_amendment_status(&mut self, id: &AmendmentId, status: Option<DecidedStatus>) -> bool {
        match self.amendments.iter_mut().find(|a| &a.id == id) {
            Some(amendment) => {
                amendment.status = status;
                true
            }
            None => false,
        }
    }

    pub fn remove_amendment(&mut self, id: &AmendmentId) -> bool {
        let before = self.amendments.len();
        self.amendments.retain(|a| &a.id != id);
        if self.amendments.len() == before {
            return false;
        }
        if self.voting.as_ref().is_some_and(|v| v.target.is_amendment(id)) {
            self.voting = None;
        }
        true
    }
}

fn clean_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}
