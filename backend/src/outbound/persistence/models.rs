//! Diesel row types mapping between the schema and domain aggregates.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::{CountryPersistenceError, UserPersistenceError};
use crate::domain::{Country, State, User};

use super::schema::{countries, states, users};

/// Queryable row for countries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = countries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CountryRow {
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub population: i32,
}

impl CountryRow {
    /// Rebuild the domain aggregate from this row and its state rows.
    ///
    /// Every state row must belong to this country; a mismatched
    /// `country_id` means the caller loaded the wrong rows.
    pub(crate) fn into_country(
        self,
        state_rows: Vec<StateRow>,
    ) -> Result<Country, CountryPersistenceError> {
        let mut result_states = Vec::with_capacity(state_rows.len());
        for row in state_rows {
            if row.country_id != self.id {
                return Err(CountryPersistenceError::query(format!(
                    "state {} belongs to country {}, not {}",
                    row.uuid, row.country_id, self.id
                )));
            }
            result_states.push(row.into_state()?);
        }
        Country::new(self.id, self.uuid, self.name, self.population, result_states)
            .map_err(|err| CountryPersistenceError::query(err.to_string()))
    }
}

/// Insertable row for a new country.
#[derive(Debug, Insertable)]
#[diesel(table_name = countries)]
pub(crate) struct NewCountryRow<'a> {
    pub uuid: Uuid,
    pub name: &'a str,
    pub population: i32,
}

/// Changeset applied to the parent row during reconciliation.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = countries)]
pub(crate) struct CountryUpdate<'a> {
    pub name: &'a str,
    pub population: i32,
}

/// Queryable row for states.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = states)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StateRow {
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub population: i32,
    pub country_id: i32,
}

impl StateRow {
    pub(crate) fn into_state(self) -> Result<State, CountryPersistenceError> {
        State::new(self.id, self.uuid, self.name, self.population)
            .map_err(|err| CountryPersistenceError::query(err.to_string()))
    }
}

/// Insertable row for a state marked as a pending insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = states)]
pub(crate) struct NewStateRow<'a> {
    pub uuid: Uuid,
    pub name: &'a str,
    pub population: i32,
    pub country_id: i32,
}

/// Full-replace changeset for a state marked as an update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = states)]
pub(crate) struct StateUpdate<'a> {
    pub name: &'a str,
    pub population: i32,
    pub country_id: i32,
}

/// Queryable row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub uuid: Uuid,
    pub username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, UserPersistenceError> {
        if self.password_salt.is_empty() {
            return Err(UserPersistenceError::query(format!(
                "user {} row carries an empty password salt",
                self.uuid
            )));
        }
        Ok(User {
            id: self.id,
            uuid: self.uuid,
            username: self.username,
            password_hash: self.password_hash,
            password_salt: self.password_salt,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            email: self.email,
            registered_at: self.registered_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable row for a registration.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub uuid: Uuid,
    pub username: &'a str,
    pub password_hash: &'a [u8],
    pub password_salt: &'a [u8],
    pub first_name: &'a str,
    pub middle_name: Option<&'a str>,
    pub last_name: &'a str,
    pub email: &'a str,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn country_row_rebuilds_the_aggregate() {
        let row = CountryRow {
            id: 1,
            uuid: Uuid::new_v4(),
            name: "Freedonia".into(),
            population: 1200,
        };
        let state_rows = vec![StateRow {
            id: 2,
            uuid: Uuid::new_v4(),
            name: "Sylvania".into(),
            population: 300,
            country_id: 1,
        }];

        let country = row.into_country(state_rows).expect("valid aggregate");
        assert_eq!(country.states().len(), 1);
        assert_eq!(country.name(), "Freedonia");
    }

    #[rstest]
    fn state_rows_of_another_country_are_rejected() {
        let row = CountryRow {
            id: 1,
            uuid: Uuid::new_v4(),
            name: "Freedonia".into(),
            population: 1200,
        };
        let state_rows = vec![StateRow {
            id: 2,
            uuid: Uuid::new_v4(),
            name: "Sylvania".into(),
            population: 300,
            country_id: 9,
        }];

        let err = row.into_country(state_rows).unwrap_err();
        assert!(matches!(err, CountryPersistenceError::Query { .. }));
    }

    #[rstest]
    fn corrupt_rows_surface_as_query_errors() {
        let row = CountryRow {
            id: 1,
            uuid: Uuid::new_v4(),
            name: String::new(),
            population: 0,
        };
        let err = row.into_country(vec![]).unwrap_err();
        assert!(matches!(err, CountryPersistenceError::Query { .. }));
    }

    #[rstest]
    fn user_rows_with_empty_salt_are_rejected() {
        let row = UserRow {
            id: 1,
            uuid: Uuid::new_v4(),
            username: "ada".into(),
            password_hash: vec![1],
            password_salt: vec![],
            first_name: "Ada".into(),
            middle_name: None,
            last_name: "Lovelace".into(),
            email: "ada@example.net".into(),
            registered_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(row.into_user().is_err());
    }
}
