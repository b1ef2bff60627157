//! Persistence round-trip and edge case tests.
//!
//! Tests file I/O, the file-backed key-value store, and settings round-trip.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::auth::{AuthStore, NewUser};
use crate::favorites::FavoriteStore;
use crate::kv::{FileKeyValueStore, KeyValueStore, SESSION_KEY};
use crate::persistence::{ensure_dir, load_json, save_json};
use crate::settings_store::{LogLevel, Settings};
use catadex_core::{FavoriteEntry, UserProfile};

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("store.json");

    let data = serde_json::json!({"key": "value"});

    assert!(save_json(&nested_path, &data).await.is_ok());
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/settings.json");

    let result: Result<Settings, _> = load_json(&file_path).await;
    assert!(result.unwrap_err().is_io());
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("data");

    ensure_dir(&dir_path).await.unwrap();
    ensure_dir(&dir_path).await.unwrap();

    assert!(dir_path.is_dir());
}

#[tokio::test]
async fn test_atomic_write_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("atomic.json");

    save_json(&file_path, &Settings::default()).await.unwrap();

    assert!(!file_path.with_extension("json.tmp").exists());
    assert!(file_path.exists());
}

// ============================================================================
// Settings Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_settings_full_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    let settings = Settings {
        api_base_url: "http://localhost:9000/api".to_string(),
        page_size: 40,
        batch_size: 8,
        request_timeout_ms: 5_000,
        max_retries: 1,
        backoff_base_ms: 250,
        max_jitter_ms: 0,
        alert_cooldown_ms: 10_000,
        log_level: LogLevel::Trace,
        allowed_domains: vec!["localhost".to_string()],
    };

    save_json(&file_path, &settings).await.unwrap();
    let loaded: Settings = load_json(&file_path).await.unwrap();

    assert_eq!(loaded, settings);
}

#[tokio::test]
async fn test_load_json_with_unknown_fields() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("extra_fields.json");

    let json = r#"{
        "page_size": 12,
        "refresh_cadence": "two_minutes",
        "nested_unknown": {"key": "value"}
    }"#;
    tokio::fs::write(&file_path, json).await.unwrap();

    let loaded: Settings = load_json(&file_path).await.unwrap();
    assert_eq!(loaded.page_size, 12);
    assert_eq!(loaded.batch_size, 5);
}

// ============================================================================
// Account & Favorites Persistence
// ============================================================================

#[tokio::test]
async fn test_session_and_favorites_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    {
        let kv = Arc::new(FileKeyValueStore::open(&path).await);
        let auth = AuthStore::new(kv.clone())
            .with_iterations(std::num::NonZeroU32::new(1_000).unwrap());
        auth.register(NewUser {
            username: "misty".to_string(),
            password: "starmie".to_string(),
            profile: UserProfile {
                name: "Misty".to_string(),
                ..UserProfile::default()
            },
        })
        .await
        .unwrap();
        auth.sign_in("misty", "starmie").await.unwrap().unwrap();

        let favorites = FavoriteStore::new(kv);
        favorites
            .add(FavoriteEntry {
                id: 121,
                name: "starmie".to_string(),
                image_url: None,
                types: vec!["water".to_string(), "psychic".to_string()],
                added_at: chrono::Utc::now(),
            })
            .await
            .unwrap();
    }

    let kv = Arc::new(FileKeyValueStore::open(&path).await);
    assert!(kv.get(SESSION_KEY).await.unwrap().is_some());

    let auth = AuthStore::new(kv.clone());
    let session = auth.current_session().await.unwrap().unwrap();
    assert_eq!(session.username, "misty");

    let favorites = FavoriteStore::new(kv);
    assert!(favorites.is_favorite(121).await.unwrap());
}

#[tokio::test]
async fn test_unicode_profile_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    let kv = Arc::new(FileKeyValueStore::open(&path).await);
    let auth = AuthStore::new(kv).with_iterations(std::num::NonZeroU32::new(1_000).unwrap());
    auth.register(NewUser {
        username: "sakura".to_string(),
        password: "さくら🌸".to_string(),
        profile: UserProfile {
            name: "桜 木之本".to_string(),
            ..UserProfile::default()
        },
    })
    .await
    .unwrap();

    let reopened = AuthStore::new(Arc::new(FileKeyValueStore::open(&path).await));
    let session = reopened.sign_in("sakura", "さくら🌸").await.unwrap().unwrap();
    assert_eq!(session.profile.first_name(), "桜");
}
