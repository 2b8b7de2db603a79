//! Country aggregate and its dependent states.
//!
//! A country owns its states: the collection has no lifecycle of its own
//! and is reconciled as a unit whenever the aggregate is saved.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors for country and state fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoValidationError {
    EmptyName,
    NegativePopulation,
}

impl fmt::Display for GeoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NegativePopulation => write!(f, "population must not be negative"),
        }
    }
}

impl std::error::Error for GeoValidationError {}

fn validate_fields(name: &str, population: i32) -> Result<(), GeoValidationError> {
    if name.trim().is_empty() {
        return Err(GeoValidationError::EmptyName);
    }
    if population < 0 {
        return Err(GeoValidationError::NegativePopulation);
    }
    Ok(())
}

/// A dependent state row owned by a [`Country`].
///
/// ## Invariants
/// - `name` is non-empty, `population` is non-negative.
/// - `id == State::PENDING_ID` marks a row not yet persisted; any other id
///   refers to an existing row and is fully replaced on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    id: i32,
    uuid: Uuid,
    name: String,
    population: i32,
}

impl State {
    /// Surrogate id value of a state that has not been persisted yet.
    pub const PENDING_ID: i32 = 0;

    /// Validate and construct a state.
    pub fn new(
        id: i32,
        uuid: Uuid,
        name: impl Into<String>,
        population: i32,
    ) -> Result<Self, GeoValidationError> {
        let name = name.into();
        validate_fields(&name, population)?;
        Ok(Self {
            id,
            uuid,
            name,
            population,
        })
    }

    /// Construct a state that is pending insertion, with a fresh uuid.
    pub fn pending(name: impl Into<String>, population: i32) -> Result<Self, GeoValidationError> {
        Self::new(Self::PENDING_ID, Uuid::new_v4(), name, population)
    }

    /// Surrogate identifier; [`Self::PENDING_ID`] until persisted.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Opaque external identifier, immutable once assigned.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// State name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resident population.
    pub fn population(&self) -> i32 {
        self.population
    }

    /// Whether this state still awaits its first insert.
    pub fn is_pending_insert(&self) -> bool {
        self.id == Self::PENDING_ID
    }
}

/// Submitted fields for a state addressed as a standalone resource.
///
/// The owning country is named by uuid; resolution to a persisted row
/// happens in the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDraft {
    name: String,
    population: i32,
    country_uuid: Uuid,
}

impl StateDraft {
    /// Validate and construct a draft.
    pub fn new(
        name: impl Into<String>,
        population: i32,
        country_uuid: Uuid,
    ) -> Result<Self, GeoValidationError> {
        let name = name.into();
        validate_fields(&name, population)?;
        Ok(Self {
            name,
            population,
            country_uuid,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population(&self) -> i32 {
        self.population
    }

    /// External identifier of the owning country.
    pub fn country_uuid(&self) -> Uuid {
        self.country_uuid
    }
}

/// Identifying fields of a state's owning country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRef {
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
}

/// A state viewed as a standalone resource, attached to its owning country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    state: State,
    country: CountryRef,
}

impl StateRecord {
    pub fn new(state: State, country: CountryRef) -> Self {
        Self { state, country }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn country(&self) -> &CountryRef {
        &self.country
    }
}

/// Parent aggregate: a country together with its owned states.
///
/// ## Invariants
/// - `name` is unique across countries (case-insensitive, enforced by the
///   persistence layer) and non-empty.
/// - State ordering carries no semantic meaning; uniqueness is by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    id: i32,
    uuid: Uuid,
    name: String,
    population: i32,
    states: Vec<State>,
}

impl Country {
    /// Validate and construct a country aggregate.
    pub fn new(
        id: i32,
        uuid: Uuid,
        name: impl Into<String>,
        population: i32,
        states: Vec<State>,
    ) -> Result<Self, GeoValidationError> {
        let name = name.into();
        validate_fields(&name, population)?;
        Ok(Self {
            id,
            uuid,
            name,
            population,
            states,
        })
    }

    /// Server-assigned surrogate identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Opaque external identifier, immutable once assigned.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Country name, unique case-insensitively.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resident population.
    pub fn population(&self) -> i32 {
        self.population
    }

    /// The owned state collection.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Consume the aggregate, yielding its states.
    pub fn into_states(self) -> Vec<State> {
        self.states
    }
}
