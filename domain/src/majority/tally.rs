//! Ballot choices and vote tallies

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A single delegate's ballot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Yes => "yes",
            VoteChoice::No => "no",
            VoteChoice::Abstain => "abstain",
        }
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "for" => Ok(VoteChoice::Yes),
            "no" | "n" | "against" => Ok(VoteChoice::No),
            "abstain" | "a" => Ok(VoteChoice::Abstain),
            other => Err(DomainError::unknown("vote choice", other)),
        }
    }
}

/// Aggregated yes/no/abstain counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteTally {
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
}

impl VoteTally {
    pub fn new(yes: u32, no: u32, abstain: u32) -> Self {
        Self { yes, no, abstain }
    }

    /// Count a sequence of ballots
    pub fn from_choices<'a>(choices: impl IntoIterator<Item = &'a VoteChoice>) -> Self {
        choices.into_iter().fold(Self::default(), |mut tally, choice| {
            match choice {
                VoteChoice::Yes => tally.yes += 1,
                VoteChoice::No => tally.no += 1,
                VoteChoice::Abstain => tally.abstain += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> u32 {
        self.yes + self.no + self.abstain
    }

    /// Generate a compact summary (e.g., "12-3-1")
    pub fn summary(&self) -> String {
        format!("{}-{}-{}", self.yes, self.no, self.abstain)
    }
}
