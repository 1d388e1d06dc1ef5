//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! through [`FileConfig::to_session_params`].

mod logging;
mod session;
mod storage;

pub use logging::FileLoggingConfig;
pub use session::FileSessionConfig;
pub use storage::FileStorageConfig;

use dais_application::SessionParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value cannot be used; a built-in default replaces it.
    Error,
    /// The value works but probably not as intended.
    Warning,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("session.speaker_seconds cannot be 0")]
    ZeroSpeakerDuration,

    #[error("storage.debounce_ms is 0: every change is written immediately")]
    ZeroDebounce,

    #[error("session.session_name is blank and will be ignored")]
    BlankSessionName,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub error: ConfigValidationError,
}

impl ConfigIssue {
    fn error(error: ConfigValidationError) -> Self {
        Self {
            severity: Severity::Error,
            error,
        }
    }

    fn warning(error: ConfigValidationError) -> Self {
        Self {
            severity: Severity::Warning,
            error,
        }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session defaults
    pub session: FileSessionConfig,
    /// Where and how often documents are written
    pub storage: FileStorageConfig,
    /// Event log and diagnostic log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.session.speaker_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigValidationError::ZeroSpeakerDuration,
            ));
        }

        if self
            .session
            .session_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            issues.push(ConfigIssue::warning(
                ConfigValidationError::BlankSessionName,
            ));
        }

        if self.storage.debounce_ms == 0 {
            issues.push(ConfigIssue::warning(ConfigValidationError::ZeroDebounce));
        }

        issues
    }

    /// Whether any issue is fatal for its value.
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Build the application's session parameters.
    ///
    /// Values rejected by [`validate`](Self::validate) fall back to defaults.
    pub fn to_session_params(&self) -> SessionParams {
        let defaults = SessionParams::default();
        let speaker_seconds = match self.session.speaker_seconds {
            0 => defaults.default_speaker_seconds,
            n => n,
        };

        defaults
            .with_default_speaker_seconds(speaker_seconds)
            .with_overtime_grace(Duration::from_secs(self.session.overtime_grace_secs))
            .with_default_session_name(self.session.session_name.clone())
            .with_save_debounce(Duration::from_millis(self.storage.debounce_ms))
    }
}
