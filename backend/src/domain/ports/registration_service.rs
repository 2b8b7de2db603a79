//! Driving port for registering new users.

use async_trait::async_trait;

use crate::domain::{Error, Outcome, Registration, User};

/// Domain use-case port for user registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the submitted password under a fresh salt and persist the new
    /// user transactionally.
    async fn register(&self, registration: Registration) -> Outcome<User>;

    /// Whether a username is already in use (case-insensitive).
    async fn username_exists(&self, username: &str) -> Result<bool, Error>;
}
