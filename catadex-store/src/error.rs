//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Username already registered.
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Registration input was rejected.
    #[error("Invalid account data: {0}")]
    InvalidInput(String),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if the failure came from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }
}
