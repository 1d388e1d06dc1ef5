//! File-backed document store.
//!
//! Each key maps to one JSON file inside the data directory. Writes go to a
//! sibling temp file first and are renamed into place, so a crash mid-write
//! leaves the previous document intact.

use async_trait::async_trait;
use dais_application::{DocumentStore, StoreError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// [`DocumentStore`] writing one pretty-printed JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the document for `key`.
    ///
    /// Each `/`-separated segment made only of `[A-Za-z0-9-]` is kept as is;
    /// any other segment is written as `+` followed by its hex bytes.
    /// Segments are joined with `_`, which neither form contains, so distinct
    /// keys always get distinct files: `dais/users/u-42/conferences` lands in
    /// `dais_users_u-42_conferences.json` and `a@b.org` in `+6140622e6f7267.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name = key
            .split('/')
            .map(encode_segment)
            .collect::<Vec<_>>()
            .join("_");
        self.dir.join(format!("{}.json", name))
    }

    async fn quarantine(&self, path: &Path) {
        let backup = path.with_extension("json.corrupt");
        match tokio::fs::rename(path, &backup).await {
            Ok(()) => warn!(
                "Moved unreadable document {} to {}",
                path.display(),
                backup.display()
            ),
            Err(e) => warn!("Could not move aside {}: {}", path.display(), e),
        }
    }
}

fn encode_segment(segment: &str) -> String {
    let plain = !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-');
    if plain {
        segment.to_string()
    } else {
        format!("+{}", hex::encode(segment))
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No document at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Keep the unreadable bytes; the next save would overwrite them.
                self.quarantine(&path).await;
                Err(StoreError::Malformed(e))
            }
        }
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(document)?;

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_for_keeps_plain_segments() {
        let store = JsonFileStore::new("/data");
        assert_eq!(
            store.path_for("dais/users/u-42/conferences"),
            PathBuf::from("/data/dais_users_u-42_conferences.json")
        );
        assert_eq!(
            store.path_for("../etc/passwd"),
            PathBuf::from("/data/+2e2e_etc_passwd.json")
        );
        assert_eq!(store.path_for(""), PathBuf::from("/data/+.json"));
    }

    #[test]
    fn test_path_for_never_merges_distinct_keys() {
        let store = JsonFileStore::new("/data");
        let keys = [
            "dais/users/alice@un.org/conferences",
            "dais/users/alice_un_org/conferences",
            "dais/users/alice/un/org/conferences",
            "dais/users/anonymous/conferences",
            "dais/anonymous/conferences",
            "dais/users/+616c696365/conferences",
            "dais/users/alice/conferences",
            "dais//conferences",
            "dais/conferences",
        ];
        let paths: std::collections::HashSet<PathBuf> =
            keys.iter().map(|k| store.path_for(k)).collect();
        assert_eq!(paths.len(), keys.len());
    }

    #[tokio::test]
    async fn test_users_with_similar_ids_do_not_share_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store
            .save("dais/users/alice@un.org/conferences", &json!({"owner": 1}))
            .await
            .unwrap();

        assert!(
            store
                .load("dais/users/alice_un_org/conferences")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(
            store.load("dais/users/alice@un.org/conferences").await.unwrap(),
            Some(json!({"owner": 1}))
        );
    }

    #[tokio::test]
    async fn test_missing_key_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load("dais/anonymous/conferences").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));
        let doc = json!({"version": 2, "conferences": []});

        store.save("dais/anonymous/conferences", &doc).await.unwrap();
        let loaded = store.load("dais/anonymous/conferences").await.unwrap();
        assert_eq!(loaded, Some(doc));

        // No temp file left behind
        let leftovers: Vec<_> = std::fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save("k", &json!({"n": 1})).await.unwrap();
        store.save("k", &json!({"n": 2})).await.unwrap();
        assert_eq!(store.load("k").await.unwrap(), Some(json!({"n": 2})));
    }

    #[tokio::test]
    async fn test_malformed_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let path = store.path_for("k");
        std::fs::write(&path, "{not json").unwrap();

        let result = store.load("k").await;
        assert!(matches!(result, Err(StoreError::Malformed(_))));
        assert!(!path.exists());
        assert!(path.with_extension("json.corrupt").exists());

        // Once moved aside, the key reads as empty
        assert!(store.load("k").await.unwrap().is_none());
    }
}
