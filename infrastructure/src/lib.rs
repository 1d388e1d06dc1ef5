//! Infrastructure layer for dais
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: document stores, the committee event log,
//! static reference data, and configuration file loading.

pub mod config;
pub mod logging;
pub mod reference;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig,
    FileSessionConfig, FileStorageConfig, Severity,
};
pub use logging::JsonlEventLog;
pub use reference::StaticReferenceData;
pub use storage::{JsonFileStore, MemoryStore};
