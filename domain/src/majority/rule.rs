//! Majority thresholds for floor items
//!
//! This module defines the rules used to determine whether a vote passes.

use super::tally::VoteTally;
use crate::core::error::DomainError;
use crate::floor::motion::MotionKind;
use serde::{Deserialize, Serialize};

/// Procedural motions that need a two-thirds majority.
///
/// Matched case-insensitively, either exactly or as a substring of the
/// motion's preset label ("Motion to close debate" matches "close debate").
const TWO_THIRDS_LABELS: &[&str] = &[
    "close debate",
    "closure of debate",
    "move to voting procedure",
    "move into voting procedure",
    "adjourn",
    "suspend",
];

/// Labels that are chair-decided even when filed as a motion.
const CHAIR_LABELS: &[&str] = &["point of", "right of reply"];

/// Threshold required for a floor item to pass
///
/// - `Simple`: more yes than no votes
/// - `TwoThirds`: yes votes are at least two thirds of yes + no
/// - `Chair`: decided by the chair, never computed from votes
///
/// Abstentions never count toward either threshold.
///
/// # Example
///
/// ```
/// use dais_domain::majority::MajorityType;
///
/// assert!(MajorityType::Simple.is_satisfied(5, 4));
/// assert!(!MajorityType::TwoThirds.is_satisfied(5, 4));
/// assert!(!MajorityType::Chair.is_satisfied(10, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MajorityType {
    #[default]
    Simple,
    TwoThirds,
    Chair,
}

impl MajorityType {
    /// Check whether `yes` against `no` meets this threshold
    pub fn is_satisfied(&self, yes: u32, no: u32) -> bool {
        let (yes, no) = (u64::from(yes), u64::from(no));
        match self {
            MajorityType::Chair => false,
            MajorityType::Simple => yes > no,
            MajorityType::TwoThirds => {
                let total = yes + no;
                // yes >= 2/3 * total, kept in integers
                total > 0 && 3 * yes >= 2 * total
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MajorityType::Simple => "simple",
            MajorityType::TwoThirds => "two-thirds",
            MajorityType::Chair => "chair",
        }
    }

    /// Human-readable label shown next to an item
    pub fn label(&self) -> &'static str {
        match self {
            MajorityType::Simple => "Simple majority",
            MajorityType::TwoThirds => "Two-thirds majority",
            MajorityType::Chair => "Chair's discretion",
        }
    }
}

impl std::fmt::Display for MajorityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for MajorityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(MajorityType::Simple),
            "two-thirds" | "two_thirds" | "2/3" => Ok(MajorityType::TwoThirds),
            "chair" => Ok(MajorityType::Chair),
            other => Err(DomainError::unknown("majority type", other)),
        }
    }
}

/// Majority required for a specific item, with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MajorityRequirement {
    #[serde(rename = "type")]
    pub kind: MajorityType,
    pub label: &'static str,
}

impl From<MajorityType> for MajorityRequirement {
    fn from(kind: MajorityType) -> Self {
        Self {
            kind,
            label: kind.label(),
        }
    }
}

/// Resolve the majority a motion or point needs from its preset label
pub fn majority_for(preset_label: Option<&str>, kind: MotionKind) -> MajorityRequirement {
    if kind == MotionKind::Point {
        return MajorityType::Chair.into();
    }

    let Some(label) = preset_label.map(|l| l.trim().to_lowercase()) else {
        return MajorityType::Simple.into();
    };

    if CHAIR_LABELS.iter().any(|key| label.contains(key)) {
        MajorityType::Chair.into()
    } else if TWO_THIRDS_LABELS.iter().any(|key| label.contains(key)) {
        MajorityType::TwoThirds.into()
    } else {
        MajorityType::Simple.into()
    }
}

/// Decide pass/fail for a tally under the given majority
pub fn compute_passed(yes: u32, no: u32, _abstain: u32, majority: MajorityType) -> bool {
    majority.is_satisfied(yes, no)
}

impl VoteTally {
    /// Check whether this tally passes under `majority`
    pub fn passes(&self, majority: MajorityType) -> bool {
        compute_passed(self.yes, self.no, self.abstain, majority)
    }
}
