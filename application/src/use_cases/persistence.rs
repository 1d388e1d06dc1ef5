//! Debounced, fire-and-forget persistence of the conference document.
//!
//! [`PersistenceHandle::schedule`] never blocks: it pushes a snapshot onto a
//! channel and returns. A background task keeps only the newest snapshot,
//! waits for a quiet period, then writes it. Each successful write publishes
//! its timestamp on a watch channel.
//!
//! ```text
//! schedule(a) ─┐
//! schedule(b) ─┼─ quiet for `debounce` ──> save(c) ──> last_saved = now
//! schedule(c) ─┘
//! ```
//!
//! [`PersistenceHandle::shutdown`] flushes whatever is still pending.

use crate::ports::document_store::DocumentStore;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub struct PersistenceHandle {
    tx: mpsc::UnboundedSender<Value>,
    saved: watch::Receiver<Option<DateTime<Utc>>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PersistenceHandle {
    /// Start the background saver on the current tokio runtime.
    pub fn spawn(store: Arc<dyn DocumentStore>, key: impl Into<String>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (saved_tx, saved) = watch::channel(None);
        let cancel = CancellationToken::new();
        let saver = Saver {
            store,
            key: key.into(),
            debounce,
            saved: saved_tx,
        };
        let task = tokio::spawn(saver.run(rx, cancel.clone()));
        Self {
            tx,
            saved,
            cancel,
            task,
        }
    }

    /// Queue a snapshot for writing.
    pub fn schedule(&self, document: Value) {
        if self.tx.send(document).is_err() {
            warn!("Persistence task has stopped; snapshot dropped");
        }
    }

    /// Time of the last successful write.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        *self.saved.borrow()
    }

    /// Watch save confirmations.
    pub fn subscribe(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.saved.clone()
    }

    /// Stop the saver after writing any pending snapshot.
    pub async fn shutdown(self) -> Option<DateTime<Utc>> {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("Persistence task ended abnormally: {}", e);
        }
        *self.saved.borrow()
    }
}

struct Saver {
    store: Arc<dyn DocumentStore>,
    key: String,
    debounce: Duration,
    saved: watch::Sender<Option<DateTime<Utc>>>,
}

impl Saver {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<Value>, cancel: CancellationToken) {
        let mut pending: Option<Value> = None;

        loop {
            let received = if pending.is_some() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    document = rx.recv() => document,
                    _ = tokio::time::sleep(self.debounce) => {
                        if let Some(document) = pending.take() {
                            self.write(&document).await;
                        }
                        continue;
                    }
                }
            } else {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    document = rx.recv() => document,
                }
            };

            match received {
                Some(document) => pending = Some(document),
                None => break,
            }
        }

        while let Ok(document) = rx.try_recv() {
            pending = Some(document);
        }
        if let Some(document) = pending {
            self.write(&document).await;
        }
        debug!("Persistence task stopped");
    }

    async fn write(&self, document: &Value) {
        match self.store.save(&self.key, document).await {
            Ok(()) => {
                let now = Utc::now();
                self.saved.send_replace(Some(now));
                debug!("Saved {} at {}", self.key, now.to_rfc3339());
            }
            Err(e) => {
                // Dropped; the next mutation schedules a fresh snapshot.
                warn!("Failed to save {}: {}", self.key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::document_store::StoreError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStore {
        saves: Mutex<Vec<(String, Value)>>,
    }

    impl MockStore {
        fn saves(&self) -> Vec<(String, Value)> {
            self.saves.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn load(&self, _key: &str) -> Result<Option<Value>, StoreError> {
            Ok(None)
        }

        async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
            self.saves
                .lock()
                .unwrap()
                .push((key.to_string(), document.clone()));
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn load(&self, _key: &str) -> Result<Option<Value>, StoreError> {
            Ok(None)
        }

        async fn save(&self, _key: &str, _document: &Value) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    const DEBOUNCE: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_coalesced_into_last_snapshot() {
        let store = Arc::new(MockStore::default());
        let handle = PersistenceHandle::spawn(store.clone(), "dais/anonymous/conferences", DEBOUNCE);

        handle.schedule(json!({"n": 1}));
        handle.schedule(json!({"n": 2}));
        handle.schedule(json!({"n": 3}));

        tokio::time::sleep(DEBOUNCE / 2).await;
        assert!(store.saves().is_empty());

        tokio::time::sleep(DEBOUNCE * 2).await;
        let saves = store.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].0, "dais/anonymous/conferences");
        assert_eq!(saves[0].1, json!({"n": 3}));
        assert!(handle.last_saved().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_snapshot_restarts_quiet_period() {
        let store = Arc::new(MockStore::default());
        let handle = PersistenceHandle::spawn(store.clone(), "k", DEBOUNCE);

        handle.schedule(json!({"n": 1}));
        tokio::time::sleep(Duration::from_millis(400)).await;
        handle.schedule(json!({"n": 2}));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(store.saves().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(store.saves().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_pending() {
        let store = Arc::new(MockStore::default());
        let handle = PersistenceHandle::spawn(store.clone(), "k", Duration::from_secs(60));

        handle.schedule(json!({"n": 1}));
        let last = handle.shutdown().await;

        assert_eq!(store.saves().len(), 1);
        assert!(last.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_without_changes_writes_nothing() {
        let store = Arc::new(MockStore::default());
        let handle = PersistenceHandle::spawn(store.clone(), "k", DEBOUNCE);
        assert!(handle.shutdown().await.is_none());
        assert!(store.saves().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_leaves_timestamp_unset() {
        let handle = PersistenceHandle::spawn(Arc::new(FailingStore), "k", DEBOUNCE);
        handle.schedule(json!({}));
        tokio::time::sleep(DEBOUNCE * 2).await;
        assert!(handle.last_saved().is_none());
    }
}
