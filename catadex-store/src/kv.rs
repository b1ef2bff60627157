//! String key-value storage.
//!
//! Accounts, the session, and favorites are stored as JSON strings under
//! fixed keys. [`FileKeyValueStore`] keeps every key in one JSON object on
//! disk; [`MemoryKeyValueStore`] is the in-process variant.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::{load_json_or_default, save_json};

/// Key holding the signed-in [`catadex_core::Session`].
pub const SESSION_KEY: &str = "catadex:session";
/// Key holding the registered [`catadex_core::UserRecord`] list.
pub const USERS_KEY: &str = "catadex:users";
/// Key holding the [`catadex_core::FavoriteEntry`] list.
pub const FAVORITES_KEY: &str = "catadex:favorites";

/// Minimal async string map.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads `key` and decodes it as JSON.
///
/// # Errors
///
/// Returns the store's error or [`StoreError::Serialization`] when the
/// stored text does not decode as `T`.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns the store's error or [`StoreError::Serialization`].
pub async fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.set(key, serde_json::to_string(value)?).await
}

// ============================================================================
// File-backed store
// ============================================================================

/// Key-value store persisted as a single JSON object file.
///
/// Every write rewrites the file atomically.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries: BTreeMap<String, String> = load_json_or_default(&path).await;
        debug!(path = %path.display(), keys = entries.len(), "Opened key-value store");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value);
        save_json(&self.path, &updated).await?;
        *entries = updated;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        save_json(&self.path, &updated).await?;
        *entries = updated;
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Key-value store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_get_set_remove() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v".into()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("store.json");

        let store = FileKeyValueStore::open(&path).await;
        set_json(&store, FAVORITES_KEY, &vec![1, 2, 3]).await.unwrap();
        store.set(SESSION_KEY, "{}".into()).await.unwrap();
        store.remove(SESSION_KEY).await.unwrap();

        let reopened = FileKeyValueStore::open(&path).await;
        let favorites: Option<Vec<u32>> = get_json(&reopened, FAVORITES_KEY).await.unwrap();
        assert_eq!(favorites, Some(vec![1, 2, 3]));
        assert_eq!(reopened.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_untouched() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "file, not a directory").await.unwrap();

        let store = FileKeyValueStore::open(blocker.join("store.json")).await;
        assert!(store.set(SESSION_KEY, "{}".into()).await.is_err());
        assert_eq!(store.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = FileKeyValueStore::open(&path).await;
        store.set(SESSION_KEY, "{}".into()).await.unwrap();

        // A directory at the temp-file path makes the next save fail.
        tokio::fs::create_dir(path.with_extension("json.tmp")).await.unwrap();

        assert!(store.remove(SESSION_KEY).await.is_err());
        assert_eq!(store.get(SESSION_KEY).await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FileKeyValueStore::open(&path).await;
        assert_eq!(store.get(USERS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_json_rejects_garbage() {
        let store = MemoryKeyValueStore::new();
        store.set(USERS_KEY, "[oops".into()).await.unwrap();

        let result: Result<Option<Vec<String>>, _> = get_json(&store, USERS_KEY).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
