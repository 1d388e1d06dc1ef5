//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving committee events (votes, overtime, sessions)
    pub event_log: Option<PathBuf>,
    /// File receiving diagnostic logs in addition to stderr
    pub file: Option<PathBuf>,
}

impl FileLoggingConfig {
    pub fn event_log_path(&self) -> Option<PathBuf> {
        self.event_log.as_deref().map(super::storage::expand_home)
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.as_deref().map(super::storage::expand_home)
    }
}
