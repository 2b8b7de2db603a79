//! State use-case service for the standalone states resource.
//!
//! Mirrors the country service: the repository owns the transaction, and
//! this service translates the result into envelopes. A mutation blocked
//! by a dependent record surfaces as a conflict cause so the HTTP layer
//! answers 409 rather than 500.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::ports::{StatePersistenceError, StateRepository, StatesCommand, StatesQuery};
use crate::domain::{Error, Outcome, StateDraft, StateRecord};

/// State service implementing the driving ports over a repository.
#[derive(Clone)]
pub struct StateService<R> {
    repository: Arc<R>,
}

impl<R> StateService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: StatePersistenceError) -> Error {
    match error {
        StatePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("state repository unavailable: {message}"))
        }
        StatePersistenceError::Query { message } => {
            Error::internal(format!("state repository error: {message}"))
        }
        StatePersistenceError::Dependency { message } => {
            Error::conflict(format!("a dependent record blocks the change: {message}"))
        }
    }
}

/// Convert a caught repository fault into a failure envelope with a fixed
/// diagnostic, logging it on the way through.
fn fault_envelope<T>(diagnostic: &str, error: StatePersistenceError) -> Outcome<T> {
    let cause = map_persistence_error(error);
    error!(cause = %cause, "{diagnostic}");
    Outcome::failure_with_cause(diagnostic, cause)
}

#[async_trait]
impl<R: StateRepository> StatesQuery for StateService<R> {
    async fn list_states(&self) -> Result<Vec<StateRecord>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }

    async fn get_state(&self, uuid: Uuid) -> Result<Option<StateRecord>, Error> {
        self.repository
            .find_by_uuid(uuid)
            .await
            .map_err(map_persistence_error)
    }

    async fn state_name_exists(&self, name: &str) -> Result<bool, Error> {
        self.repository
            .name_exists(name)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R: StateRepository> StatesCommand for StateService<R> {
    async fn create_state(&self, draft: StateDraft) -> Outcome<StateRecord> {
        let country_uuid = draft.country_uuid();
        match self.repository.insert(&draft).await {
            Ok(Some(created)) => Outcome::success(created),
            Ok(None) => Outcome::failure(format!("no country found with uuid {country_uuid}")),
            Err(err) => {
                fault_envelope("an error occurred while inserting the new state record", err)
            }
        }
    }

    async fn update_state(&self, uuid: Uuid, submitted: StateDraft) -> Outcome<StateRecord> {
        match self.repository.update(uuid, &submitted).await {
            Ok(Some(refreshed)) => Outcome::success(refreshed),
            Ok(None) => Outcome::failure(format!("no state found with uuid {uuid}")),
            Err(err) => fault_envelope("an error occurred while modifying the state record", err),
        }
    }

    async fn delete_state(&self, uuid: Uuid) -> Outcome<StateRecord> {
        match self.repository.delete_by_uuid(uuid).await {
            Ok(Some(removed)) => {
                info!(%uuid, "state record removed");
                Outcome::success_with_message(
                    removed,
                    format!("the state record {uuid} has been removed"),
                )
            }
            Ok(None) => Outcome::failure(format!("no state found with uuid {uuid}")),
            Err(err) => fault_envelope("an error occurred while deleting the state record", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockStateRepository;
    use crate::domain::{CountryRef, State};
    use rstest::rstest;

    fn sample_record() -> StateRecord {
        let state = State::new(4, Uuid::new_v4(), "Aragon", 300).expect("valid state");
        let country = CountryRef {
            id: 3,
            uuid: Uuid::new_v4(),
            name: "Freedonia".into(),
        };
        StateRecord::new(state, country)
    }

    fn sample_draft() -> StateDraft {
        StateDraft::new("Aragon", 300, Uuid::new_v4()).expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn create_wraps_the_new_record_on_commit() {
        let record = sample_record();
        let mut repo = MockStateRepository::new();
        let created = record.clone();
        repo.expect_insert().return_once(move |_| Ok(Some(created)));

        let service = StateService::new(Arc::new(repo));
        let outcome = service.create_state(sample_draft()).await;

        assert!(!outcome.failed());
        assert_eq!(outcome.element(), Some(&record));
    }

    #[rstest]
    #[tokio::test]
    async fn create_under_an_unknown_country_fails_without_cause() {
        let mut repo = MockStateRepository::new();
        repo.expect_insert().return_once(|_| Ok(None));

        let service = StateService::new(Arc::new(repo));
        let draft = sample_draft();
        let country_uuid = draft.country_uuid();
        let outcome = service.create_state(draft).await;

        assert!(outcome.failed());
        assert!(outcome.cause().is_none());
        assert!(outcome.messages()[0].contains(&country_uuid.to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn update_fault_becomes_a_failure_envelope_with_cause() {
        let mut repo = MockStateRepository::new();
        repo.expect_update()
            .return_once(|_, _| Err(StatePersistenceError::query("deadlock detected")));

        let service = StateService::new(Arc::new(repo));
        let outcome = service.update_state(Uuid::new_v4(), sample_draft()).await;

        assert!(outcome.failed());
        assert_eq!(
            outcome.messages(),
            ["an error occurred while modifying the state record"]
        );
        let cause = outcome.cause().expect("cause set for caught faults");
        assert_eq!(cause.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_blocked_by_a_dependency_carries_a_conflict_cause() {
        let mut repo = MockStateRepository::new();
        repo.expect_delete_by_uuid().return_once(|_| {
            Err(StatePersistenceError::dependency(
                "rows reference this record",
            ))
        });

        let service = StateService::new(Arc::new(repo));
        let outcome = service.delete_state(Uuid::new_v4()).await;

        assert!(outcome.failed());
        assert_eq!(outcome.cause().map(Error::code), Some(ErrorCode::Conflict));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_success_carries_a_confirmation_message() {
        let record = sample_record();
        let uuid = record.state().uuid();
        let mut repo = MockStateRepository::new();
        repo.expect_delete_by_uuid()
            .return_once(move |_| Ok(Some(record)));

        let service = StateService::new(Arc::new(repo));
        let outcome = service.delete_state(uuid).await;

        assert!(!outcome.failed());
        assert!(outcome.messages()[0].contains(&uuid.to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_unknown_uuid_fails_without_cause() {
        let mut repo = MockStateRepository::new();
        repo.expect_delete_by_uuid().return_once(|_| Ok(None));

        let service = StateService::new(Arc::new(repo));
        let outcome = service.delete_state(Uuid::new_v4()).await;

        assert!(outcome.failed());
        assert!(outcome.cause().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn name_exists_faults_map_to_service_unavailable() {
        let mut repo = MockStateRepository::new();
        repo.expect_name_exists()
            .return_once(|_| Err(StatePersistenceError::connection("pool exhausted")));

        let service = StateService::new(Arc::new(repo));
        let err = service.state_name_exists("Aragon").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
