// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Catadex Store
//!
//! Local state for Catadex.
//!
//! This crate provides:
//!
//! - **KeyValueStore**: String map behind accounts, session, and favorites
//! - **AuthStore**: Registration, sign-in with hashed passwords, session
//! - **FavoriteStore**: Insertion-ordered favorites keyed by item id
//! - **SettingsStore**: User preferences with persistence
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use catadex_store::{AuthStore, FavoriteStore, FileKeyValueStore, default_store_path};
//!
//! let kv = Arc::new(FileKeyValueStore::open(default_store_path()).await);
//! let auth = AuthStore::new(kv.clone());
//! let favorites = FavoriteStore::new(kv);
//!
//! if let Some(session) = auth.sign_in("ash", "pikachu").await? {
//!     println!("Hello, {}", session.profile.first_name());
//!     println!("{} favorites", favorites.list().await?.len());
//! }
//! ```

pub mod auth;
pub mod error;
pub mod favorites;
pub mod kv;
pub mod persistence;
pub mod settings_store;

pub use auth::{AuthStore, NewUser, hash_password, verify_password};
pub use error::StoreError;
pub use favorites::FavoriteStore;
pub use kv::{
    FAVORITES_KEY, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SESSION_KEY, USERS_KEY,
    get_json, set_json,
};
pub use persistence::{
    default_config_dir, default_data_dir, default_settings_path, default_store_path, ensure_dir,
    load_json, load_json_or_default, save_json,
};
pub use settings_store::{LogLevel, Settings, SettingsStore};

#[cfg(test)]
mod persistence_tests;
