//! Driving port for country mutations.
//!
//! All operations return the envelope: a populated element on success, or
//! diagnostics (and the caught fault, when one exists) on failure. No
//! fault escapes these calls as a raw error.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Country, Outcome};

/// Domain use-case port for country mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountriesCommand: Send + Sync {
    /// Insert a new country aggregate.
    async fn create_country(&self, draft: Country) -> Outcome<Country>;

    /// Reconcile and save a submitted aggregate against the persisted
    /// rows identified by `uuid`.
    async fn update_country(&self, uuid: Uuid, submitted: Country) -> Outcome<Country>;

    /// Delete a country aggregate by external identifier.
    async fn delete_country(&self, uuid: Uuid) -> Outcome<Country>;
}
