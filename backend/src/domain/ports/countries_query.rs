//! Driving port for country read use-cases.
//!
//! Inbound adapters call this port to read aggregates without importing
//! outbound persistence concerns; handler tests substitute a mock.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Country, Error};

/// Domain use-case port for country queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountriesQuery: Send + Sync {
    /// List all countries ordered by name.
    async fn list_countries(&self) -> Result<Vec<Country>, Error>;

    /// Fetch one country (with states) by external identifier.
    async fn get_country(&self, uuid: Uuid) -> Result<Option<Country>, Error>;

    /// Whether a country name is already in use (case-insensitive).
    async fn country_name_exists(&self, name: &str) -> Result<bool, Error>;
}
