//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Committee operations themselves never fail (invalid requests are no-ops);
/// these errors only arise when constructing validated values from raw input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Score must be between 1 and 8, got {0}")]
    InvalidScore(u8),

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Unsupported document version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl DomainError {
    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        DomainError::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}
