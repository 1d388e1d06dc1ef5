//! Port for durable storage of the conference document.
//!
//! The core hands the store a complete JSON snapshot and asks for it back by
//! key. Stores do not interpret the document: absent keys load as `None` and
//! shape problems are left to the versioned loader in the domain layer.
//!
//! # Built-in Implementations
//!
//! - `JsonFileStore`: one JSON file per key (infrastructure layer)
//! - `MemoryStore`: in-process map for tests and ephemeral runs (infrastructure layer)

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by document store adapters.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Port for loading and saving the persisted document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the document stored under `key`, or `None` on first run.
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the document stored under `key`.
    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError>;
}
