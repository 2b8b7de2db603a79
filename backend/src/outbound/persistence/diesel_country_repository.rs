//! PostgreSQL-backed `CountryRepository` implementation using Diesel ORM.
//!
//! This adapter owns the unit-of-work transaction for country mutations:
//! the parent field update and every reconciliation mark are applied in
//! one `transaction` scope, so either the whole delta commits or the
//! rollback discards all of it. Dropping the transaction future (caller
//! cancellation) never commits.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CountryPersistenceError, CountryRepository};
use crate::domain::{Country, ReconcilePlan};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CountryRow, CountryUpdate, NewCountryRow, NewStateRow, StateRow, StateUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{countries, states};

diesel::define_sql_function! {
    /// SQL `lower()` for case-insensitive name comparison.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Diesel-backed implementation of the country repository port.
#[derive(Clone)]
pub struct DieselCountryRepository {
    pool: DbPool,
}

impl DieselCountryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> CountryPersistenceError {
    map_basic_pool_error(error, CountryPersistenceError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> CountryPersistenceError {
    map_basic_diesel_error(
        error,
        CountryPersistenceError::query,
        CountryPersistenceError::connection,
    )
}

async fn load_aggregate_rows(
    conn: &mut diesel_async::AsyncPgConnection,
    parent_id: i32,
) -> Result<(CountryRow, Vec<StateRow>), diesel::result::Error> {
    let parent: CountryRow = countries::table
        .find(parent_id)
        .select(CountryRow::as_select())
        .first(conn)
        .await?;
    let state_rows: Vec<StateRow> = states::table
        .filter(states::country_id.eq(parent_id))
        .select(StateRow::as_select())
        .load(conn)
        .await?;
    Ok((parent, state_rows))
}

#[async_trait]
impl CountryRepository for DieselCountryRepository {
    async fn list(&self) -> Result<Vec<Country>, CountryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CountryRow> = countries::table
            .order(countries::name.asc())
            .select(CountryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row.into_country(Vec::new()))
            .collect()
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Country>, CountryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CountryRow> = countries::table
            .filter(countries::uuid.eq(uuid))
            .select(CountryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(parent) = row else {
            return Ok(None);
        };

        let state_rows: Vec<StateRow> = states::table
            .filter(states::country_id.eq(parent.id))
            .select(StateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        parent.into_country(state_rows).map(Some)
    }

    async fn insert(&self, country: &Country) -> Result<Country, CountryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let draft = country.clone();

        let (parent, state_rows) = conn
            .transaction::<(CountryRow, Vec<StateRow>), diesel::result::Error, _>(|conn| {
                async move {
                    let parent: CountryRow = diesel::insert_into(countries::table)
                        .values(NewCountryRow {
                            uuid: draft.uuid(),
                            name: draft.name(),
                            population: draft.population(),
                        })
                        .returning(CountryRow::as_returning())
                        .get_result(conn)
                        .await?;

                    // A freshly inserted aggregate treats every submitted
                    // state as new, whatever id the caller supplied.
                    for state in draft.states() {
                        diesel::insert_into(states::table)
                            .values(NewStateRow {
                                uuid: state.uuid(),
                                name: state.name(),
                                population: state.population(),
                                country_id: parent.id,
                            })
                            .execute(conn)
                            .await?;
                    }

                    load_aggregate_rows(conn, parent.id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        parent.into_country(state_rows)
    }

    async fn reconcile_and_save(
        &self,
        uuid: Uuid,
        submitted: &Country,
    ) -> Result<Option<Country>, CountryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let submission = submitted.clone();

        let rows = conn
            .transaction::<Option<(CountryRow, Vec<StateRow>)>, diesel::result::Error, _>(
                |conn| {
                    async move {
                        let parent: Option<CountryRow> = countries::table
                            .filter(countries::uuid.eq(uuid))
                            .select(CountryRow::as_select())
                            .first(conn)
                            .await
                            .optional()?;
                        let Some(parent) = parent else {
                            return Ok(None);
                        };

                        let current_ids: Vec<i32> = states::table
                            .filter(states::country_id.eq(parent.id))
                            .select(states::id)
                            .load(conn)
                            .await?;

                        let name = submission.name().to_owned();
                        let population = submission.population();
                        let plan = ReconcilePlan::diff(&current_ids, submission.into_states());

                        for state in plan.inserts() {
                            diesel::insert_into(states::table)
                                .values(NewStateRow {
                                    uuid: state.uuid(),
                                    name: state.name(),
                                    population: state.population(),
                                    country_id: parent.id,
                                })
                                .execute(conn)
                                .await?;
                        }

                        for state in plan.updates() {
                            let affected = diesel::update(states::table.find(state.id()))
                                .set(StateUpdate {
                                    name: state.name(),
                                    population: state.population(),
                                    country_id: parent.id,
                                })
                                .execute(conn)
                                .await?;
                            // An update mark against a row that no longer
                            // exists fails the whole batch at commit time.
                            if affected == 0 {
                                return Err(diesel::result::Error::NotFound);
                            }
                        }

                        let delete_ids = plan.delete_ids();
                        if !delete_ids.is_empty() {
                            diesel::delete(
                                states::table.filter(states::id.eq_any(delete_ids.iter().copied())),
                            )
                            .execute(conn)
                            .await?;
                        }

                        diesel::update(countries::table.find(parent.id))
                            .set(CountryUpdate {
                                name: &name,
                                population,
                            })
                            .execute(conn)
                            .await?;

                        load_aggregate_rows(conn, parent.id).await.map(Some)
                    }
                    .scope_boxed()
                },
            )
            .await
            .map_err(map_diesel_error)?;

        match rows {
            Some((parent, state_rows)) => parent.into_country(state_rows).map(Some),
            None => Ok(None),
        }
    }

    async fn delete_by_uuid(&self, uuid: Uuid) -> Result<Option<Country>, CountryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction::<Option<(CountryRow, Vec<StateRow>)>, diesel::result::Error, _>(
                |conn| {
                    async move {
                        let parent: Option<CountryRow> = countries::table
                            .filter(countries::uuid.eq(uuid))
                            .select(CountryRow::as_select())
                            .first(conn)
                            .await
                            .optional()?;
                        let Some(parent) = parent else {
                            return Ok(None);
                        };

                        let state_rows: Vec<StateRow> = states::table
                            .filter(states::country_id.eq(parent.id))
                            .select(StateRow::as_select())
                            .load(conn)
                            .await?;

                        diesel::delete(states::table.filter(states::country_id.eq(parent.id)))
                            .execute(conn)
                            .await?;
                        diesel::delete(countries::table.find(parent.id))
                            .execute(conn)
                            .await?;

                        Ok(Some((parent, state_rows)))
                    }
                    .scope_boxed()
                },
            )
            .await
            .map_err(map_diesel_error)?;

        match rows {
            Some((parent, state_rows)) => parent.into_country(state_rows).map(Some),
            None => Ok(None),
        }
    }

    async fn name_exists(&self, name: &str) -> Result<bool, CountryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<i32> = countries::table
            .filter(lower(countries::name).eq(name.to_lowercase()))
            .select(countries::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(found.is_some())
    }
}
