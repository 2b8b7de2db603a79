//! Driving port for user-facing queries.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, User};

/// Domain use-case port for listing and fetching users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return all registered users.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Fetch one user by external identifier.
    async fn get_user(&self, uuid: Uuid) -> Result<Option<User>, Error>;
}
