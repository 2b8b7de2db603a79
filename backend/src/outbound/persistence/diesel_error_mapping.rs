//! Shared Diesel error mapping for repositories with basic query
//! semantics.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error
/// constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Captures the repeated mapping used by repositories where `NotFound`
/// and query-builder failures should map to query errors.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(String) -> E,
    C: Fn(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(kind, info) => {
            query(format!("database error ({kind:?}): {}", info.message()))
        }
        other => query(format!("database error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CountryPersistenceError;
    use rstest::rstest;

    fn map(error: diesel::result::Error) -> CountryPersistenceError {
        map_basic_diesel_error(
            error,
            CountryPersistenceError::query,
            CountryPersistenceError::connection,
        )
    }

    #[rstest]
    fn not_found_maps_to_a_query_error() {
        assert!(matches!(
            map(diesel::result::Error::NotFound),
            CountryPersistenceError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err: CountryPersistenceError = map_basic_pool_error(
            PoolError::checkout("timed out"),
            CountryPersistenceError::connection,
        );
        assert!(matches!(err, CountryPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }
}
