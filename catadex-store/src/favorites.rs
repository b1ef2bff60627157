//! Favorites list.

use catadex_core::FavoriteEntry;
use std::sync::Arc;
use tracing::debug;

use crate::error::StoreError;
use crate::kv::{FAVORITES_KEY, KeyValueStore, get_json, set_json};

/// Persistent, insertion-ordered set of favorite items keyed by id.
#[derive(Clone)]
pub struct FavoriteStore {
    kv: Arc<dyn KeyValueStore>,
}

impl FavoriteStore {
    /// Creates a favorites store over `kv`.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Returns all favorites in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds invalid data.
    pub async fn list(&self) -> Result<Vec<FavoriteEntry>, StoreError> {
        Ok(get_json(&*self.kv, FAVORITES_KEY).await?.unwrap_or_default())
    }

    /// Returns true if `id` is a favorite.
    ///
    /// # Errors
    ///
    /// See [`FavoriteStore::list`].
    pub async fn is_favorite(&self, id: u32) -> Result<bool, StoreError> {
        Ok(self.list().await?.iter().any(|f| f.id == id))
    }

    /// Adds `entry` unless its id is already present. Returns true if added.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn add(&self, entry: FavoriteEntry) -> Result<bool, StoreError> {
        let mut favorites = self.list().await?;
        if favorites.iter().any(|f| f.id == entry.id) {
            return Ok(false);
        }
        debug!(id = entry.id, name = %entry.name, "Adding favorite");
        favorites.push(entry);
        self.save(&favorites).await?;
        Ok(true)
    }

    /// Removes the favorite with `id`. Returns true if it was present.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn remove(&self, id: u32) -> Result<bool, StoreError> {
        let mut favorites = self.list().await?;
        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        if favorites.len() == before {
            return Ok(false);
        }
        debug!(id, "Removing favorite");
        self.save(&favorites).await?;
        Ok(true)
    }

    /// Adds `entry` if absent, otherwise removes it.
    ///
    /// Returns true if the item is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn toggle(&self, entry: FavoriteEntry) -> Result<bool, StoreError> {
        let id = entry.id;
        if self.remove(id).await? {
            Ok(false)
        } else {
            self.add(entry).await
        }
    }

    async fn save(&self, favorites: &[FavoriteEntry]) -> Result<(), StoreError> {
        set_json(&*self.kv, FAVORITES_KEY, favorites).await
    }
}

impl std::fmt::Debug for FavoriteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteStore").finish_non_exhaustive()
    }
}
