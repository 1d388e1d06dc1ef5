//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding conference documents.
    /// Falls back to the platform data directory when unset.
    pub data_dir: Option<PathBuf>,
    /// Quiet period before a pending snapshot is written
    pub debounce_ms: u64,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            debounce_ms: 500,
        }
    }
}

impl FileStorageConfig {
    /// Resolve the data directory, expanding a leading `~/`.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        match &self.data_dir {
            Some(dir) => Some(expand_home(dir)),
            None => dirs::data_dir().map(|d| d.join("dais")),
        }
    }
}

pub(crate) fn expand_home(path: &std::path::Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = FileStorageConfig {
            data_dir: Some(PathBuf::from("/var/lib/dais")),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_data_dir(),
            Some(PathBuf::from("/var/lib/dais"))
        );
    }

    #[test]
    fn test_tilde_is_expanded() {
        let expanded = expand_home(std::path::Path::new("~/dais"));
        if dirs::home_dir().is_some() {
            assert!(!expanded.starts_with("~"));
            assert!(expanded.ends_with("dais"));
        }
    }
}
