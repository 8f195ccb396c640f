//! Diesel and pool error mapping shared by every repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Pool failures mean the database is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RepositoryError::connection(message)
}

/// Map Diesel failures. Unique violations keep the constraint name so the
/// domain can name the colliding field.
pub(crate) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::duplicate(info.constraint_name().unwrap_or("unknown"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}

/// A stored row that no longer satisfies domain invariants.
pub(crate) fn corrupt_row(entity: &str, detail: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::query(format!("stored {entity} row is invalid: {detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_without_constraint_is_still_a_duplicate() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ));

        assert_eq!(err, RepositoryError::duplicate("unknown"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));

        assert!(matches!(err, RepositoryError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_failures_are_query_errors(#[case] error: DieselError) {
        assert!(matches!(map_diesel_error(error), RepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_checkout_failures_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));

        assert_eq!(err, RepositoryError::connection("timed out"));
    }
}
