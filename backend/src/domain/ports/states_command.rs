//! Driving port for state mutations.
//!
//! All operations return the envelope: a populated element on success, or
//! diagnostics (and the caught fault, when one exists) on failure.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Outcome, StateDraft, StateRecord};

/// Domain use-case port for state mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatesCommand: Send + Sync {
    /// Insert a new state under the country the draft names.
    async fn create_state(&self, draft: StateDraft) -> Outcome<StateRecord>;

    /// Replace the state identified by `uuid` with the submitted fields,
    /// reparenting it when the draft names a different country.
    async fn update_state(&self, uuid: Uuid, submitted: StateDraft) -> Outcome<StateRecord>;

    /// Delete a state by external identifier.
    async fn delete_state(&self, uuid: Uuid) -> Outcome<StateRecord>;
}
