//! Configuration file loading for dais
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DAIS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./dais.toml` or `./.dais.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/dais/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigValidationError, FileConfig, FileLoggingConfig, FileSessionConfig,
    FileStorageConfig, Severity,
};
pub use loader::ConfigLoader;
