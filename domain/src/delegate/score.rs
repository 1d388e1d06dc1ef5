//! Rubric scores
//!
//! Each delegate may carry a sparse set of 1–8 scores over six delegate
//! criteria and five position-paper criteria, plus free-text evidence and a
//! justification. Criterion definitions (descriptors per band) are reference
//! data and live outside the domain.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A validated rubric score in `1..=8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ScoreValue(u8);

impl ScoreValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ScoreValue {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidScore(value))
        }
    }
}

impl From<ScoreValue> for u8 {
    fn from(value: ScoreValue) -> Self {
        value.0
    }
}

/// Criteria for a delegate's in-committee performance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelegateCriterion {
    Research,
    Speaking,
    Diplomacy,
    Leadership,
    Collaboration,
    ResolutionWriting,
}

impl DelegateCriterion {
    pub const ALL: [DelegateCriterion; 6] = [
        DelegateCriterion::Research,
        DelegateCriterion::Speaking,
        DelegateCriterion::Diplomacy,
        DelegateCriterion::Leadership,
        DelegateCriterion::Collaboration,
        DelegateCriterion::ResolutionWriting,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            DelegateCriterion::Research => "Research & Preparation",
            DelegateCriterion::Speaking => "Public Speaking",
            DelegateCriterion::Diplomacy => "Diplomacy",
            DelegateCriterion::Leadership => "Leadership",
            DelegateCriterion::Collaboration => "Collaboration",
            DelegateCriterion::ResolutionWriting => "Resolution Writing",
        }
    }
}

impl std::str::FromStr for DelegateCriterion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "research" => Ok(DelegateCriterion::Research),
            "speaking" => Ok(DelegateCriterion::Speaking),
            "diplomacy" => Ok(DelegateCriterion::Diplomacy),
            "leadership" => Ok(DelegateCriterion::Leadership),
            "collaboration" => Ok(DelegateCriterion::Collaboration),
            "resolutionwriting" => Ok(DelegateCriterion::ResolutionWriting),
            _ => Err(DomainError::unknown("delegate criterion", s)),
        }
    }
}

/// Criteria for a position paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaperCriterion {
    Research,
    CountryPolicy,
    ProposedSolutions,
    Structure,
    Citations,
}

impl PaperCriterion {
    pub const ALL: [PaperCriterion; 5] = [
        PaperCriterion::Research,
        PaperCriterion::CountryPolicy,
        PaperCriterion::ProposedSolutions,
        PaperCriterion::Structure,
        PaperCriterion::Citations,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PaperCriterion::Research => "Research Depth",
            PaperCriterion::CountryPolicy => "Country Policy",
            PaperCriterion::ProposedSolutions => "Proposed Solutions",
            PaperCriterion::Structure => "Structure & Clarity",
            PaperCriterion::Citations => "Citations",
        }
    }
}

impl std::str::FromStr for PaperCriterion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "research" => Ok(PaperCriterion::Research),
            "countrypolicy" | "policy" => Ok(PaperCriterion::CountryPolicy),
            "proposedsolutions" | "solutions" => Ok(PaperCriterion::ProposedSolutions),
            "structure" => Ok(PaperCriterion::Structure),
            "citations" => Ok(PaperCriterion::Citations),
            _ => Err(DomainError::unknown("position paper criterion", s)),
        }
    }
}

/// A delegate's score sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DelegateScore {
    pub delegate: BTreeMap<DelegateCriterion, ScoreValue>,
    pub position_paper: BTreeMap<PaperCriterion, ScoreValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

impl DelegateScore {
    /// Shallow merge: each criterion or text field in the update replaces the
    /// stored one, everything else is kept.
    pub fn merge(&mut self, update: ScoreUpdate) {
        self.delegate.extend(update.delegate);
        self.position_paper.extend(update.position_paper);
        if let Some(evidence) = update.evidence {
            self.evidence = Some(evidence);
        }
        if let Some(justification) = update.justification {
            self.justification = Some(justification);
        }
    }

    pub fn delegate_total(&self) -> u32 {
        self.delegate.values().map(|v| u32::from(v.get())).sum()
    }

    pub fn paper_total(&self) -> u32 {
        self.position_paper.values().map(|v| u32::from(v.get())).sum()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update for a [`DelegateScore`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub delegate: BTreeMap<DelegateCriterion, ScoreValue>,
    pub position_paper: BTreeMap<PaperCriterion, ScoreValue>,
    pub evidence: Option<String>,
    pub justification: Option<String>,
}

impl ScoreUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delegate(mut self, criterion: DelegateCriterion, value: ScoreValue) -> Self {
        self.delegate.insert(criterion, value);
        self
    }

    pub fn paper(mut self, criterion: PaperCriterion, value: ScoreValue) -> Self {
        self.position_paper.insert(criterion, value);
        self
    }

    pub fn evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = Some(justification.into());
        self
    }
}
