//! Strikes and feedback notes

use crate::core::error::DomainError;
use crate::core::ids::{DelegateId, FeedbackId};
use crate::core::time::EpochMillis;
use serde::{Deserialize, Serialize};

/// A disciplinary strike against a delegate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strike {
    pub delegate_id: DelegateId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: EpochMillis,
}

impl Strike {
    pub fn new(delegate_id: DelegateId, kind: impl Into<String>, timestamp: EpochMillis) -> Self {
        Self {
            delegate_id,
            kind: kind.into(),
            timestamp,
        }
    }
}

/// Kind of feedback note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Compliment,
    Concern,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Compliment => "compliment",
            FeedbackKind::Concern => "concern",
        }
    }
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FeedbackKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compliment" => Ok(FeedbackKind::Compliment),
            "concern" => Ok(FeedbackKind::Concern),
            other => Err(DomainError::unknown("feedback kind", other)),
        }
    }
}

/// A chair's note on a delegate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: FeedbackId,
    pub delegate_id: DelegateId,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub timestamp: EpochMillis,
}

impl Feedback {
    pub fn new(
        delegate_id: DelegateId,
        kind: FeedbackKind,
        reason: impl Into<String>,
        timestamp: EpochMillis,
    ) -> Self {
        Self {
            id: FeedbackId::generate(),
            delegate_id,
            kind,
            reason: reason.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_wire_names() {
        let strike = Strike::new(DelegateId::new("d1"), "phone", 1_700_000_000_000);
        let json = serde_json::to_value(&strike).unwrap();
        assert_eq!(json["delegateId"], "d1");
        assert_eq!(json["type"], "phone");
    }

    #[test]
    fn test_feedback_kind_parse() {
        assert_eq!("Concern".parse::<FeedbackKind>().ok(), Some(FeedbackKind::Concern));
        assert!("praise".parse::<FeedbackKind>().is_err());
    }
}
