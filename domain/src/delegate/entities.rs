//! Delegate entity

use crate::core::ids::DelegateId;
use crate::roll_call::RollCallStatus;
use serde::{Deserialize, Serialize};

/// A delegation seated in the committee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegate {
    pub id: DelegateId,
    /// Country or delegation name
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Explicit roll-call status; older records only carry `present`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_call_status: Option<RollCallStatus>,
    #[serde(default)]
    pub present: bool,
    #[serde(default)]
    pub voting_rights_revoked: bool,
    #[serde(default)]
    pub speaking_rights_revoked: bool,
}

impl Delegate {
    /// Create a delegate marked absent
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            id: DelegateId::generate(),
            country: country.into().trim().to_string(),
            name: None,
            email: None,
            roll_call_status: Some(RollCallStatus::Absent),
            present: false,
            voting_rights_revoked: false,
            speaking_rights_revoked: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_empty(email.into());
        self
    }

    /// Roll-call status, falling back to the legacy `present` flag
    pub fn effective_status(&self) -> RollCallStatus {
        self.roll_call_status.unwrap_or(if self.present {
            RollCallStatus::Present
        } else {
            RollCallStatus::Absent
        })
    }

    /// Name shown on the floor: the personal name if set, else the delegation
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.country)
    }

    /// Set the roll-call status, keeping the legacy flag in step
    pub fn set_roll_call(&mut self, status: RollCallStatus) {
        self.roll_call_status = Some(status);
        self.present = status != RollCallStatus::Absent;
    }

    /// Merge an update: present fields replace, absent fields are preserved
    pub fn apply(&mut self, update: DelegateUpdate) {
        if let Some(country) = update.country {
            self.country = country.trim().to_string();
        }
        if let Some(name) = update.name {
            self.name = name.and_then(non_empty);
        }
        if let Some(email) = update.email {
            self.email = email.and_then(non_empty);
        }
        if let Some(status) = update.roll_call_status {
            self.set_roll_call(status);
        }
        if let Some(revoked) = update.voting_rights_revoked {
            self.voting_rights_revoked = revoked;
        }
        if let Some(revoked) = update.speaking_rights_revoked {
            self.speaking_rights_revoked = revoked;
        }
    }
}

/// Partial update for a [`Delegate`]
///
/// `name` and `email` are doubly optional: `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegateUpdate {
    pub country: Option<String>,
    pub name: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub roll_call_status: Option<RollCallStatus>,
    pub voting_rights_revoked: Option<bool>,
    pub speaking_rights_revoked: Option<bool>,
}

impl DelegateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn name(mut self, name: Option<String>) -> Self {
        self.name = Some(name);
        self
    }

    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = Some(email);
        self
    }

    pub fn roll_call(mut self, status: RollCallStatus) -> Self {
        self.roll_call_status = Some(status);
        self
    }

    pub fn voting_rights_revoked(mut self, revoked: bool) -> Self {
        self.voting_rights_revoked = Some(revoked);
        self
    }

    pub fn speaking_rights_revoked(mut self, revoked: bool) -> Self {
        self.speaking_rights_revoked = Some(revoked);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
