//! Load Book use case.
//!
//! Reads the stored document for a user and turns it into a live
//! [`ConferenceBook`]. Nothing here is fatal: a store failure or an unusable
//! document degrades to a fresh book and a warning.
//!
//! The [`ReloadMode`] decides what happens to the live floor and pause
//! marker. A long-lived front end opens each session with
//! [`ReloadMode::Fresh`]; a one-command-per-process CLI continues the stored
//! session with [`ReloadMode::Resume`].

use crate::config::SessionParams;
use crate::ports::clock::Clock;
use crate::ports::document_store::DocumentStore;
use dais_domain::{ConferenceBook, ReloadMode, load_document};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of [`LoadBookUseCase::execute`].
#[derive(Debug, Clone)]
pub struct LoadedBook {
    pub book: ConferenceBook,
    /// Whether anything usable was found in the store.
    pub restored: bool,
    /// Repairs and coercions applied while loading.
    pub notes: Vec<String>,
}

pub struct LoadBookUseCase {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    params: SessionParams,
    mode: ReloadMode,
}

impl LoadBookUseCase {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            params: SessionParams::default(),
            mode: ReloadMode::default(),
        }
    }

    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_reload_mode(mut self, mode: ReloadMode) -> Self {
        self.mode = mode;
        self
    }

    pub async fn execute(&self, key: &str) -> LoadedBook {
        let raw = match self.store.load(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not load {}: {}; starting fresh", key, e);
                None
            }
        };

        let outcome = load_document(raw.as_ref(), self.clock.now_ms(), self.mode);
        if let Some(rejected) = &outcome.rejected {
            warn!("Ignoring stored document for {}: {}", key, rejected);
        }
        if let Some(version) = outcome.migrated_from {
            info!("Migrated stored document from version {}", version);
        }
        for note in &outcome.notes {
            warn!("Load repair: {}", note);
        }

        let restored = raw.as_ref().is_some_and(Value::is_object) && outcome.rejected.is_none();
        let mut book = outcome.book;
        if !restored {
            book.active_mut()
                .data
                .set_speaker_duration(self.params.default_speaker_seconds);
        } else {
            info!(
                "Loaded {} conference(s), active: {}",
                book.conferences().len(),
                book.active().name
            );
        }

        LoadedBook {
            book,
            restored,
            notes: outcome.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::ManualClock;
    use crate::ports::document_store::StoreError;
    use async_trait::async_trait;
    use serde_json::json;

    struct MockStore(Result<Option<Value>, ()>);

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn load(&self, _key: &str) -> Result<Option<Value>, StoreError> {
            self.0
                .clone()
                .map_err(|_| StoreError::Unavailable("down".into()))
        }

        async fn save(&self, _key: &str, _document: &Value) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn use_case(stored: Result<Option<Value>, ()>) -> LoadBookUseCase {
        LoadBookUseCase::new(
            Arc::new(MockStore(stored)),
            Arc::new(ManualClock::new(1_700_000_000_000)),
        )
        .with_params(SessionParams::default().with_default_speaker_seconds(45))
    }

    #[tokio::test]
    async fn test_first_run_uses_params() {
        let loaded = use_case(Ok(None)).execute("k").await;
        assert!(!loaded.restored);
        assert_eq!(loaded.book.active().data.speaker_duration(), 45);
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_fresh_book() {
        let loaded = use_case(Err(())).execute("k").await;
        assert!(!loaded.restored);
        assert_eq!(loaded.book.conferences().len(), 1);
    }

    #[tokio::test]
    async fn test_legacy_document_is_restored() {
        let legacy = json!({"committeeName": "WHO", "speakerDuration": 90});
        let loaded = use_case(Ok(Some(legacy))).execute("k").await;
        assert!(loaded.restored);
        assert_eq!(loaded.book.active().name, "WHO");
        assert_eq!(loaded.book.active().data.speaker_duration(), 90);
    }

    #[tokio::test]
    async fn test_newer_document_is_not_restored() {
        let loaded = use_case(Ok(Some(json!({"version": 99})))).execute("k").await;
        assert!(!loaded.restored);
        assert_eq!(loaded.book.active().data.speaker_duration(), 45);
    }

    #[tokio::test]
    async fn test_reload_mode_decides_open_pause() {
        let stored = json!({
            "version": 2,
            "conferences": [{
                "id": "c1",
                "name": "Main",
                "data": {
                    "sessionStarted": true,
                    "sessionStartTime": 1_699_999_000_000_i64,
                    "sessionPausedAt": 1_699_999_500_000_i64
                }
            }],
            "activeConferenceId": "c1"
        });

        let fresh = use_case(Ok(Some(stored.clone()))).execute("k").await;
        assert!(!fresh.book.active().data.timer().is_paused());

        let resumed = use_case(Ok(Some(stored)))
            .with_reload_mode(ReloadMode::Resume)
            .execute("k")
            .await;
        assert!(resumed.book.active().data.timer().is_paused());
    }
}
