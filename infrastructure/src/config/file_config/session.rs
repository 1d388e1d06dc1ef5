//! Session defaults from TOML (`[session]` section)

use serde::{Deserialize, Serialize};

/// Raw session configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Speaking time given to newly created conferences, in seconds
    pub speaker_seconds: u32,
    /// How long a speaker may run over before a concern is recorded
    pub overtime_grace_secs: u64,
    /// Name applied when a session starts without one
    pub session_name: Option<String>,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            speaker_seconds: 60,
            overtime_grace_secs: 10,
            session_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_section_deserialize() {
        let toml_str = r#"
[session]
speaker_seconds = 90
session_name = "Morning Session"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.speaker_seconds, 90);
        assert_eq!(config.session.overtime_grace_secs, 10);
        assert_eq!(
            config.session.session_name.as_deref(),
            Some("Morning Session")
        );
    }
}
