//! Local accounts and the signed-in session.
//!
//! Passwords are stored as PBKDF2-HMAC-SHA256 digests in the form
//! `pbkdf2-sha256$<iterations>$<salt>$<hash>`, with salt and hash in
//! standard base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use catadex_core::{Session, UserProfile, UserRecord};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;
use crate::kv::{KeyValueStore, SESSION_KEY, USERS_KEY, get_json, set_json};

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const HASH_SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const CREDENTIAL_LEN: usize = digest::SHA256_OUTPUT_LEN;

/// Iteration count for new password hashes.
pub const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => unreachable!(),
};

// ============================================================================
// Password hashing
// ============================================================================

/// Hashes `password` with a fresh random salt.
///
/// # Errors
///
/// Returns [`StoreError::PasswordHash`] if the system RNG fails.
pub fn hash_password(password: &str, iterations: NonZeroU32) -> Result<String, StoreError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| StoreError::PasswordHash("system RNG unavailable".to_string()))?;

    let mut hash = [0u8; CREDENTIAL_LEN];
    pbkdf2::derive(PBKDF2_ALG, iterations, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{HASH_SCHEME}${iterations}${}${}",
        STANDARD.encode(salt),
        STANDARD.encode(hash)
    ))
}

/// Checks `password` against an encoded hash. Malformed hashes never match.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (Some(HASH_SCHEME), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    let Ok(iterations) = iterations.parse::<NonZeroU32>() else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (STANDARD.decode(salt), STANDARD.decode(hash)) else {
        return false;
    };

    pbkdf2::verify(PBKDF2_ALG, iterations, &salt, password.as_bytes(), &hash).is_ok()
}

// ============================================================================
// Auth Store
// ============================================================================

/// Registration form.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Profile fields.
    pub profile: UserProfile,
}

/// Registers accounts and manages the single active session.
#[derive(Clone)]
pub struct AuthStore {
    kv: Arc<dyn KeyValueStore>,
    iterations: NonZeroU32,
}

impl AuthStore {
    /// Creates an auth store over `kv`.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Overrides the PBKDF2 iteration count for new hashes.
    #[must_use]
    pub fn with_iterations(mut self, iterations: NonZeroU32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Returns every registered account.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds invalid data.
    pub async fn users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(get_json(&*self.kv, USERS_KEY).await?.unwrap_or_default())
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidInput`] for a blank username or password,
    /// [`StoreError::UserExists`] if the username is taken, or a storage
    /// error.
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn register(&self, new_user: NewUser) -> Result<(), StoreError> {
        let username = new_user.username.trim().to_string();
        if username.is_empty() {
            return Err(StoreError::InvalidInput("username is required".to_string()));
        }
        if new_user.password.is_empty() {
            return Err(StoreError::InvalidInput("password is required".to_string()));
        }

        let mut users = self.users().await?;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::UserExists(username));
        }

        users.push(UserRecord {
            username,
            password_hash: hash_password(&new_user.password, self.iterations)?,
            profile: new_user.profile,
        });
        set_json(&*self.kv, USERS_KEY, &users).await?;

        info!(total = users.len(), "Account registered");
        Ok(())
    }

    /// Signs in and persists the session on success.
    ///
    /// Returns `None` for an unknown user or a wrong password.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Option<Session>, StoreError> {
        let username = username.trim();
        let users = self.users().await?;

        let Some(record) = users
            .iter()
            .find(|u| u.username == username && verify_password(password, &u.password_hash))
        else {
            debug!("Credentials rejected");
            return Ok(None);
        };

        let session = record.to_session();
        set_json(&*self.kv, SESSION_KEY, &session).await?;
        info!("Signed in");
        Ok(Some(session))
    }

    /// Clears the active session.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.kv.remove(SESSION_KEY).await?;
        info!("Signed out");
        Ok(())
    }

    /// Returns the active session, if any. An unreadable session counts as
    /// signed out.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        match get_json(&*self.kv, SESSION_KEY).await {
            Ok(session) => Ok(session),
            Err(StoreError::Serialization(e)) => {
                warn!(error = %e, "Discarding unreadable session");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}
