//! Driving port for state read use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, StateRecord};

/// Domain use-case port for state queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatesQuery: Send + Sync {
    /// List all states ordered by name, each with its owning country.
    async fn list_states(&self) -> Result<Vec<StateRecord>, Error>;

    /// Fetch one state (with its owning country) by external identifier.
    async fn get_state(&self, uuid: Uuid) -> Result<Option<StateRecord>, Error>;

    /// Whether a state name is already in use (case-insensitive).
    async fn state_name_exists(&self, name: &str) -> Result<bool, Error>;
}
