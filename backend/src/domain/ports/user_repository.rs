//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for user identity storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all registered users.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch one user by external identifier.
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch one user by exact username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user inside its own transaction and return the
    /// persisted row.
    async fn register(&self, new_user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Case-insensitive check whether a username is already taken.
    ///
    /// Read-only and outside any transaction; failures propagate as-is.
    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError>;
}
