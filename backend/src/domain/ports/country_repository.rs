//! Port abstraction for country persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Country;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by country repository adapters.
    pub enum CountryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "country repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "country repository query failed: {message}",
    }
}

/// Port for country aggregate storage.
///
/// The mutating operations own the transaction scope for the duration of
/// one call: either the full parent+states delta lands atomically or the
/// transaction rolls back and the error surfaces to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// List all countries ordered by name, without their states.
    async fn list(&self) -> Result<Vec<Country>, CountryPersistenceError>;

    /// Fetch one aggregate (with states) by external identifier.
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Country>, CountryPersistenceError>;

    /// Insert a new aggregate and return it with server-assigned ids.
    async fn insert(&self, country: &Country) -> Result<Country, CountryPersistenceError>;

    /// Reconcile the submitted aggregate against the persisted rows and
    /// save the whole delta in one transaction.
    ///
    /// Returns `Ok(None)` when no country with the given uuid exists.
    async fn reconcile_and_save(
        &self,
        uuid: Uuid,
        submitted: &Country,
    ) -> Result<Option<Country>, CountryPersistenceError>;

    /// Delete an aggregate by external identifier.
    ///
    /// Returns the removed aggregate, or `Ok(None)` when absent.
    async fn delete_by_uuid(&self, uuid: Uuid) -> Result<Option<Country>, CountryPersistenceError>;

    /// Case-insensitive check whether a country name is already taken.
    ///
    /// Read-only and outside any transaction; failures propagate as-is.
    async fn name_exists(&self, name: &str) -> Result<bool, CountryPersistenceError>;
}
