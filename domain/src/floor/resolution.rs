//! Draft resolutions and amendments
//!
//! Neither has an explicit `active` state: once added, an item can be put to
//! a vote any number of times until it is removed. The status shown to the
//! committee is derived from the recorded votes on every read.

use crate::core::ids::{AmendmentId, ResolutionId};
use crate::majority::{MajorityType, VoteTally};
use serde::{Deserialize, Serialize};

/// Majority a draft resolution needs
pub const RESOLUTION_MAJORITY: MajorityType = MajorityType::TwoThirds;

/// Majority an amendment needs
pub const AMENDMENT_MAJORITY: MajorityType = MajorityType::Simple;

/// Outcome set explicitly by the chair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecidedStatus {
    Passed,
    Failed,
}

/// Status shown for a resolution or amendment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Pending,
    Passed,
    Failed,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Pending => "pending",
            DisplayStatus::Passed => "passed",
            DisplayStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<DecidedStatus> for DisplayStatus {
    fn from(status: DecidedStatus) -> Self {
        match status {
            DecidedStatus::Passed => DisplayStatus::Passed,
            DecidedStatus::Failed => DisplayStatus::Failed,
        }
    }
}

/// Derive the displayed status from stored votes
///
/// No votes means pending. With votes, an explicit status wins; otherwise the
/// tally is judged against `majority`.
fn derive_status(
    votes: Option<&VoteTally>,
    explicit: Option<DecidedStatus>,
    majority: MajorityType,
) -> DisplayStatus {
    let Some(votes) = votes else {
        return DisplayStatus::Pending;
    };
    match explicit {
        Some(status) => status.into(),
        None if votes.passes(majority) => DisplayStatus::Passed,
        None => DisplayStatus::Failed,
    }
}

/// A draft resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub id: ResolutionId,
    pub title: String,
    #[serde(default)]
    pub main_submitters: Vec<String>,
    #[serde(default)]
    pub co_submitters: Vec<String>,
    /// Link to the shared document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<VoteTally>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DecidedStatus>,
}

impl Resolution {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ResolutionId::generate(),
            title: title.into(),
            main_submitters: Vec::new(),
            co_submitters: Vec::new(),
            link: None,
            votes: None,
            status: None,
        }
    }

    pub fn with_main_submitters(mut self, submitters: Vec<String>) -> Self {
        self.main_submitters = submitters;
        self
    }

    pub fn with_co_submitters(mut self, submitters: Vec<String>) -> Self {
        self.co_submitters = submitters;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into()).filter(|l| !l.trim().is_empty());
        self
    }

    pub fn display_status(&self) -> DisplayStatus {
        derive_status(self.votes.as_ref(), self.status, RESOLUTION_MAJORITY)
    }
}

/// An amendment, optionally attached to a resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amendment {
    pub id: AmendmentId,
    pub title: String,
    #[serde(default)]
    pub main_submitters: Vec<String>,
    #[serde(default)]
    pub co_submitters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Resolution this amends; not an ownership link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_id: Option<ResolutionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<VoteTally>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DecidedStatus>,
}

impl Amendment {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: AmendmentId::generate(),
            title: title.into(),
            main_submitters: Vec::new(),
            co_submitters: Vec::new(),
            link: None,
            resolution_id: None,
            votes: None,
            status: None,
        }
    }

    pub fn for_resolution(mut self, resolution_id: ResolutionId) -> Self {
        self.resolution_id = Some(resolution_id);
        self
    }

    pub fn with_main_submitters(mut self, submitters: Vec<String>) -> Self {
        self.main_submitters = submitters;
        self
    }

    pub fn with_co_submitters(mut self, submitters: Vec<String>) -> Self {
        self.co_submitters = submitters;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into()).filter(|l| !l.trim().is_empty());
        self
    }

    pub fn display_status(&self) -> DisplayStatus {
        derive_status(self.votes.as_ref(), self.status, AMENDMENT_MAJORITY)
    }
}
