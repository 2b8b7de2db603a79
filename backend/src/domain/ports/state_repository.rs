//! Port abstraction for standalone state persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{StateDraft, StateRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by state repository adapters.
    pub enum StatePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "state repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "state repository query failed: {message}",
        /// A dependent record blocked the mutation.
        Dependency { message: String } => "state mutation blocked by a dependent record: {message}",
    }
}

/// Port for standalone state storage.
///
/// Mutations own their transaction scope; a `None` result means the state
/// (or, for inserts, the owning country the draft names) does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// List all states ordered by name, each with its owning country.
    async fn list(&self) -> Result<Vec<StateRecord>, StatePersistenceError>;

    /// Fetch one state (with its owning country) by external identifier.
    async fn find_by_uuid(&self, uuid: Uuid)
    -> Result<Option<StateRecord>, StatePersistenceError>;

    /// Insert a new state row under the country the draft names.
    ///
    /// Returns `Ok(None)` when no country with the draft's uuid exists.
    async fn insert(
        &self,
        draft: &StateDraft,
    ) -> Result<Option<StateRecord>, StatePersistenceError>;

    /// Replace the persisted row identified by `uuid` with the submitted
    /// fields.
    ///
    /// Returns `Ok(None)` when the state or the named country is absent.
    async fn update(
        &self,
        uuid: Uuid,
        submitted: &StateDraft,
    ) -> Result<Option<StateRecord>, StatePersistenceError>;

    /// Delete a state by external identifier.
    ///
    /// Returns the removed record, or `Ok(None)` when absent.
    async fn delete_by_uuid(
        &self,
        uuid: Uuid,
    ) -> Result<Option<StateRecord>, StatePersistenceError>;

    /// Case-insensitive check whether a state name is already taken.
    async fn name_exists(&self, name: &str) -> Result<bool, StatePersistenceError>;
}
