//! On-disk JSON for settings and the key-value store.
//!
//! Both files hold account material (password hashes, the session), so
//! they are written owner-only and replaced atomically.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

/// Directory name under the platform config and data roots.
const APP_DIR: &str = "catadex";

// ============================================================================
// Locations
// ============================================================================

/// Joins [`APP_DIR`] onto a platform root, falling back to the working
/// directory on systems without one.
fn app_dir(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Directory holding `settings.json`.
pub fn default_config_dir() -> PathBuf {
    app_dir(dirs::config_dir())
}

/// Directory holding the key-value store.
pub fn default_data_dir() -> PathBuf {
    app_dir(dirs::data_dir())
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

/// Returns the default key-value store file path.
pub fn default_store_path() -> PathBuf {
    default_data_dir().join("store.json")
}

// ============================================================================
// Permissions
// ============================================================================

const FILE_MODE: u32 = 0o600;
const DIR_MODE: u32 = 0o700;

#[cfg(unix)]
async fn restrict(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    debug!(path = %path.display(), mode = %format!("{mode:o}"), "Restricted permissions");
    Ok(())
}

#[cfg(not(unix))]
async fn restrict(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// Reading and writing
// ============================================================================

/// Serializes `data` to `path`.
///
/// The JSON goes to `<path>.json.tmp` first and is renamed over the target,
/// so readers see either the old or the new file. Missing parent
/// directories are created with mode 0700, the file ends up 0600.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] or [`StoreError::Io`].
pub async fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    let json = serde_json::to_string_pretty(data)?;
    let staging = path.with_extension("json.tmp");
    tokio::fs::write(&staging, &json).await?;
    tokio::fs::rename(&staging, path).await?;
    restrict(path, FILE_MODE).await?;

    debug!(path = %path.display(), bytes = json.len(), "Saved");
    Ok(())
}

/// Reads and decodes `path`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read and
/// [`StoreError::Serialization`] if it is not valid JSON for `T`.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;
    debug!(path = %path.display(), "Loaded");
    Ok(data)
}

/// Like [`load_json`], but a missing or corrupt file yields `T::default()`.
///
/// Only corruption is logged; a missing file is the normal first run.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(data) => data,
        Err(e) if e.is_io() => T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable file, starting fresh");
            T::default()
        }
    }
}

/// Creates `path` and its parents, restricting a newly created leaf to 0700.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory cannot be created.
pub async fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path).await?;
    restrict(path, DIR_MODE).await
}
