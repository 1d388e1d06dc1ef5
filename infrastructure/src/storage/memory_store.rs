//! In-process document store for `--ephemeral` runs and tests.

use async_trait::async_trait;
use dais_application::{DocumentStore, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// [`DocumentStore`] backed by a map. Nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, as if a previous run had saved it.
    pub fn with_document(self, key: &str, document: Value) -> Self {
        if let Ok(mut docs) = self.documents.lock() {
            docs.insert(key.to_string(), document);
        }
        self
    }

    /// Current document under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.documents.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let docs = self
            .documents
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        Ok(docs.get(key).cloned())
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        let mut docs = self
            .documents
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        docs.insert(key.to_string(), document.clone());
        Ok(())
    }
}
