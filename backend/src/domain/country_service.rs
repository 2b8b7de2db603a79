//! Country use-case service: the single point where persistence faults
//! are converted into result envelopes.
//!
//! The repository owns the transaction; by the time a call returns here
//! the delta has either committed in full or rolled back. This service
//! translates that outcome: success wraps the refreshed aggregate,
//! failure wraps a fixed diagnostic plus the caught fault, and the fault
//! is reported to the logging collaborator. Read-only queries bypass the
//! envelope entirely.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::ports::{
    CountriesCommand, CountriesQuery, CountryPersistenceError, CountryRepository,
};
use crate::domain::{Country, Error, Outcome};

/// Country service implementing the driving ports over a repository.
#[derive(Clone)]
pub struct CountryService<R> {
    repository: Arc<R>,
}

impl<R> CountryService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: CountryPersistenceError) -> Error {
    match error {
        CountryPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("country repository unavailable: {message}"))
        }
        CountryPersistenceError::Query { message } => {
            Error::internal(format!("country repository error: {message}"))
        }
    }
}

/// Convert a caught repository fault into a failure envelope with a fixed
/// diagnostic, logging it on the way through.
fn fault_envelope<T>(diagnostic: &str, error: CountryPersistenceError) -> Outcome<T> {
    let cause = map_persistence_error(error);
    error!(cause = %cause, "{diagnostic}");
    Outcome::failure_with_cause(diagnostic, cause)
}

#[async_trait]
impl<R: CountryRepository> CountriesQuery for CountryService<R> {
    async fn list_countries(&self) -> Result<Vec<Country>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }

    async fn get_country(&self, uuid: Uuid) -> Result<Option<Country>, Error> {
        self.repository
            .find_by_uuid(uuid)
            .await
            .map_err(map_persistence_error)
    }

    async fn country_name_exists(&self, name: &str) -> Result<bool, Error> {
        self.repository
            .name_exists(name)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R: CountryRepository> CountriesCommand for CountryService<R> {
    async fn create_country(&self, draft: Country) -> Outcome<Country> {
        match self.repository.insert(&draft).await {
            Ok(created) => Outcome::success(created),
            Err(err) => {
                fault_envelope("an error occurred while inserting the new country record", err)
            }
        }
    }

    async fn update_country(&self, uuid: Uuid, submitted: Country) -> Outcome<Country> {
        match self.repository.reconcile_and_save(uuid, &submitted).await {
            Ok(Some(refreshed)) => Outcome::success(refreshed),
            Ok(None) => Outcome::failure(format!("no country found with uuid {uuid}")),
            Err(err) => {
                fault_envelope("an error occurred while modifying the country record", err)
            }
        }
    }

    async fn delete_country(&self, uuid: Uuid) -> Outcome<Country> {
        match self.repository.delete_by_uuid(uuid).await {
            Ok(Some(removed)) => {
                info!(%uuid, "country record removed");
                Outcome::success_with_message(
                    removed,
                    format!("the country record {uuid} has been removed"),
                )
            }
            Ok(None) => Outcome::failure(format!("no country found with uuid {uuid}")),
            Err(err) => {
                fault_envelope("an error occurred while deleting the country record", err)
            }
        }
    }
}
