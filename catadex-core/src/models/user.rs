//! Account types.
//!
//! - [`UserProfile`] - Profile fields shown in the app
//! - [`UserRecord`] - A registered account as persisted
//! - [`Session`] - The signed-in identity (no password material)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile fields collected at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// National document number.
    pub document: String,
    /// Email address.
    pub email: String,
    /// Course or affiliation.
    pub course: String,
}

impl UserProfile {
    /// Returns the first word of the name, used for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique username.
    pub username: String,
    /// Encoded password hash.
    pub password_hash: String,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl UserRecord {
    /// Projects the record into a session, dropping the password hash.
    pub fn to_session(&self) -> Session {
        Session {
            username: self.username.clone(),
            profile: self.profile.clone(),
            signed_in_at: Utc::now(),
        }
    }
}

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Username.
    pub username: String,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: UserProfile,
    /// When the session started.
    #[serde(default = "Utc::now")]
    pub signed_in_at: DateTime<Utc>,
}
