//! User identity model and login credential parsing.
//!
//! Keep inbound payload parsing outside the handlers by exposing
//! constructors that validate string inputs before a handler talks to a
//! port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// A registered user identity as persisted.
///
/// The hash/salt pair is written once at registration and never mutated;
/// profile edits only touch `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Server-assigned surrogate identifier.
    pub id: i32,
    /// Opaque external identifier.
    pub uuid: Uuid,
    /// Unique login name.
    pub username: String,
    /// HMAC-SHA512 of the password under `password_salt`.
    pub password_hash: Vec<u8>,
    /// Per-user random salt generated at registration.
    pub password_salt: Vec<u8>,
    /// Given name.
    pub first_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// When the account was registered.
    pub registered_at: DateTime<Utc>,
    /// Last profile update.
    pub updated_at: DateTime<Utc>,
}

/// Serializable identity snapshot embedded (encrypted) in issued tokens.
///
/// Deliberately excludes the hash and salt so credential material never
/// leaves the persistence boundary, even in ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub uuid: Uuid,
    pub username: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.uuid,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            middle_name: user.middle_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Persistence-shaped draft of a user ready to be inserted.
///
/// Built by the registration service once the plaintext password has been
/// hashed; the plaintext never reaches a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// HMAC-SHA512 of the password under `password_salt`.
    pub password_hash: Vec<u8>,
    /// Per-user random salt.
    pub password_salt: Vec<u8>,
    /// Given name.
    pub first_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
}

/// Registration input carrying the plaintext password to be hashed.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Requested login name.
    pub username: String,
    /// Plaintext password, wiped from memory on drop.
    pub password: Zeroizing<String>,
    /// Given name.
    pub first_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  ", "secret", LoginValidationError::EmptyUsername)]
    #[case("ada", "", LoginValidationError::EmptyPassword)]
    fn credential_parsing_rejects_blank_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password).unwrap_err(),
            expected
        );
    }

    #[rstest]
    fn credential_parsing_trims_the_username_only() {
        let creds = LoginCredentials::try_from_parts(" ada ", " p w ").expect("valid parts");
        assert_eq!(creds.username(), "ada");
        assert_eq!(creds.password(), " p w ");
    }

    #[rstest]
    fn snapshot_excludes_credential_material() {
        let user = User {
            id: 1,
            uuid: Uuid::new_v4(),
            username: "ada".into(),
            password_hash: vec![1, 2, 3],
            password_salt: vec![4, 5, 6],
            first_name: "Ada".into(),
            middle_name: None,
            last_name: "Lovelace".into(),
            email: "ada@example.net".into(),
            registered_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let snapshot = UserSnapshot::from(&user);
        let json = serde_json::to_string(&snapshot).expect("serialise");
        assert!(!json.contains("password"));
        assert!(json.contains("ada"));
    }
}
