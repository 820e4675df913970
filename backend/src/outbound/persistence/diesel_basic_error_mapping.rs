//! Shared Diesel error mapping for repositories with connection/query error
//! variants.

use tracing::error;

use super::pool::PoolError;

/// Map a pool failure onto a repository's connection variant.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = error.into_message();
    error!(%message, "database connection checkout failed");
    connection(message)
}

/// Map a Diesel failure onto a repository's query or connection variant.
///
/// Full driver detail is logged here; the returned error carries a short
/// category message only.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    operation: &'static str,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            error!(?kind, message = info.message(), operation, "database statement failed");
        }
        other => error!(error = %other, operation, "database statement failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection(format!("{operation}: connection closed"))
        }
        DieselError::NotFound => query(format!("{operation}: record not found")),
        DieselError::DeserializationError(_) => query(format!("{operation}: unreadable row")),
        _ => query(format!("{operation}: database error")),
    }
}
