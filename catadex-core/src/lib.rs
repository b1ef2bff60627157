// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `Catadex` Core
//!
//! Core types, models, and traits for the `Catadex` application.
//!
//! This crate provides the foundational abstractions used across all other
//! `Catadex` crates, including:
//!
//! - Domain models (catalog items, favorites, accounts)
//! - Error types
//! - Collaborator traits for notifications and time
//!
//! ## Key Types
//!
//! ### Catalog Types
//! - [`ItemSummary`] - Minimal list-endpoint reference
//! - [`PageResponse`] - One page of the list endpoint
//! - [`ItemDetail`] - Full per-item record
//!
//! ### Persisted Types
//! - [`FavoriteEntry`] - Favorite projection of an item
//! - [`UserRecord`] - Registered account
//! - [`Session`] - Signed-in identity
//!
//! ### Collaborators
//! - [`Notifier`] - Fire-and-forget alert presentation
//! - [`Clock`] - Injected monotonic time

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Catalog types
    AbilityEntry,
    ItemDetail,
    ItemImages,
    ItemSummary,
    PageResponse,
    StatEntry,
    TypeSlot,
    capitalize,
    // Persisted types
    FavoriteEntry,
    Session,
    UserProfile,
    UserRecord,
};

// Re-export traits
pub use traits::{Clock, Notifier, SystemClock};
