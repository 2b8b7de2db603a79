//! PostgreSQL-backed `StateRepository` implementation using Diesel ORM.
//!
//! Standalone state mutations resolve the owning country inside the same
//! transaction as the row change, so a concurrent country removal rolls
//! the whole mutation back instead of leaving an orphaned row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{StatePersistenceError, StateRepository};
use crate::domain::{CountryRef, State, StateDraft, StateRecord};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CountryRow, NewStateRow, StateRow, StateUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{countries, states};

diesel::define_sql_function! {
    /// SQL `lower()` for case-insensitive name comparison.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Diesel-backed implementation of the state repository port.
#[derive(Clone)]
pub struct DieselStateRepository {
    pool: DbPool,
}

impl DieselStateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StatePersistenceError {
    map_basic_pool_error(error, StatePersistenceError::connection)
}

/// Map Diesel errors to domain repository errors. Foreign-key violations
/// surface as dependency errors so the service can answer with a conflict.
fn map_diesel_error(error: diesel::result::Error) -> StatePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = &error {
        return StatePersistenceError::dependency(info.message().to_owned());
    }
    map_basic_diesel_error(
        error,
        StatePersistenceError::query,
        StatePersistenceError::connection,
    )
}

fn build_record(
    state_row: StateRow,
    country_row: CountryRow,
) -> Result<StateRecord, StatePersistenceError> {
    let state = State::new(
        state_row.id,
        state_row.uuid,
        state_row.name,
        state_row.population,
    )
    .map_err(|err| StatePersistenceError::query(err.to_string()))?;
    let country = CountryRef {
        id: country_row.id,
        uuid: country_row.uuid,
        name: country_row.name,
    };
    Ok(StateRecord::new(state, country))
}

async fn find_country_by_uuid(
    conn: &mut diesel_async::AsyncPgConnection,
    uuid: Uuid,
) -> Result<Option<CountryRow>, diesel::result::Error> {
    countries::table
        .filter(countries::uuid.eq(uuid))
        .select(CountryRow::as_select())
        .first(conn)
        .await
        .optional()
}

#[async_trait]
impl StateRepository for DieselStateRepository {
    async fn list(&self) -> Result<Vec<StateRecord>, StatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(StateRow, CountryRow)> = states::table
            .inner_join(countries::table)
            .order(states::name.asc())
            .select((StateRow::as_select(), CountryRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(state_row, country_row)| build_record(state_row, country_row))
            .collect()
    }

    async fn find_by_uuid(
        &self,
        uuid: Uuid,
    ) -> Result<Option<StateRecord>, StatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(StateRow, CountryRow)> = states::table
            .inner_join(countries::table)
            .filter(states::uuid.eq(uuid))
            .select((StateRow::as_select(), CountryRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some((state_row, country_row)) => build_record(state_row, country_row).map(Some),
            None => Ok(None),
        }
    }

    async fn insert(
        &self,
        draft: &StateDraft,
    ) -> Result<Option<StateRecord>, StatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let draft = draft.clone();

        let rows = conn
            .transaction::<Option<(StateRow, CountryRow)>, diesel::result::Error, _>(|conn| {
                async move {
                    let Some(parent) = find_country_by_uuid(conn, draft.country_uuid()).await?
                    else {
                        return Ok(None);
                    };

                    let row: StateRow = diesel::insert_into(states::table)
                        .values(NewStateRow {
                            uuid: Uuid::new_v4(),
                            name: draft.name(),
                            population: draft.population(),
                            country_id: parent.id,
                        })
                        .returning(StateRow::as_returning())
                        .get_result(conn)
                        .await?;

                    Ok(Some((row, parent)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match rows {
            Some((state_row, country_row)) => build_record(state_row, country_row).map(Some),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        uuid: Uuid,
        submitted: &StateDraft,
    ) -> Result<Option<StateRecord>, StatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let submission = submitted.clone();

        let rows = conn
            .transaction::<Option<(StateRow, CountryRow)>, diesel::result::Error, _>(|conn| {
                async move {
                    let current: Option<StateRow> = states::table
                        .filter(states::uuid.eq(uuid))
                        .select(StateRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(current) = current else {
                        return Ok(None);
                    };

                    let Some(parent) = find_country_by_uuid(conn, submission.country_uuid()).await?
                    else {
                        return Ok(None);
                    };

                    let row: StateRow = diesel::update(states::table.find(current.id))
                        .set(StateUpdate {
                            name: submission.name(),
                            population: submission.population(),
                            country_id: parent.id,
                        })
                        .returning(StateRow::as_returning())
                        .get_result(conn)
                        .await?;

                    Ok(Some((row, parent)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match rows {
            Some((state_row, country_row)) => build_record(state_row, country_row).map(Some),
            None => Ok(None),
        }
    }

    async fn delete_by_uuid(
        &self,
        uuid: Uuid,
    ) -> Result<Option<StateRecord>, StatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction::<Option<(StateRow, CountryRow)>, diesel::result::Error, _>(|conn| {
                async move {
                    let row: Option<(StateRow, CountryRow)> = states::table
                        .inner_join(countries::table)
                        .filter(states::uuid.eq(uuid))
                        .select((StateRow::as_select(), CountryRow::as_select()))
                        .first(conn)
                        .await
                        .optional()?;
                    let Some((state_row, country_row)) = row else {
                        return Ok(None);
                    };

                    diesel::delete(states::table.find(state_row.id))
                        .execute(conn)
                        .await?;

                    Ok(Some((state_row, country_row)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match rows {
            Some((state_row, country_row)) => build_record(state_row, country_row).map(Some),
            None => Ok(None),
        }
    }

    async fn name_exists(&self, name: &str) -> Result<bool, StatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<i32> = states::table
            .filter(lower(states::name).eq(name.to_lowercase()))
            .select(states::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(found.is_some())
    }
}
