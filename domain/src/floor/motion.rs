//! Motions and points

use crate::core::error::DomainError;
use crate::core::ids::MotionId;
use crate::core::time::EpochMillis;
use crate::majority::{MajorityRequirement, VoteTally, majority_for};
use serde::{Deserialize, Serialize};

/// Whether a floor item is a motion (votable) or a point (chair-decided)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    #[default]
    Motion,
    Point,
}

impl MotionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionKind::Motion => "motion",
            MotionKind::Point => "point",
        }
    }
}

impl std::fmt::Display for MotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MotionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "motion" => Ok(MotionKind::Motion),
            "point" => Ok(MotionKind::Point),
            other => Err(DomainError::unknown("floor item type", other)),
        }
    }
}

/// Lifecycle of a motion
///
/// `Active → Tabled` is a chair action; `Active → Passed | Failed` only
/// happens when a vote on the motion ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MotionStatus {
    #[default]
    Active,
    Passed,
    Failed,
    Tabled,
}

impl MotionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionStatus::Active => "active",
            MotionStatus::Passed => "passed",
            MotionStatus::Failed => "failed",
            MotionStatus::Tabled => "tabled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, MotionStatus::Active)
    }
}

impl std::fmt::Display for MotionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A motion or point raised on the floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    pub id: MotionId,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: MotionKind,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub status: MotionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter: Option<String>,
    /// Preset the motion was created from; drives the majority lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<VoteTally>,
    #[serde(default)]
    pub timestamp: EpochMillis,
}

impl Motion {
    pub fn new(text: impl Into<String>, kind: MotionKind, timestamp: EpochMillis) -> Self {
        Self {
            id: MotionId::generate(),
            text: text.into(),
            kind,
            starred: false,
            status: MotionStatus::Active,
            submitter: None,
            preset_label: None,
            votes: None,
            timestamp,
        }
    }

    /// Set the submitter; blank input leaves it unset
    pub fn with_submitter(mut self, submitter: Option<&str>) -> Self {
        self.submitter = trimmed(submitter);
        self
    }

    /// Set the preset label; blank input leaves it unset
    pub fn with_preset_label(mut self, label: Option<&str>) -> Self {
        self.preset_label = trimmed(label);
        self
    }

    pub fn is_point(&self) -> bool {
        self.kind == MotionKind::Point
    }

    /// Points never go to a vote
    pub fn is_votable(&self) -> bool {
        !self.is_point()
    }

    pub fn majority(&self) -> MajorityRequirement {
        majority_for(self.preset_label.as_deref(), self.kind)
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
