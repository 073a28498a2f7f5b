//! Diesel and pool error mapping for the guest repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::GuestRepositoryError;

use super::pool::PoolError;

/// Every pool failure means the store is unreachable from the caller's view.
pub(super) fn map_pool_error(error: PoolError) -> GuestRepositoryError {
    debug!(%error, "guest store checkout failed");
    GuestRepositoryError::connection(error.message())
}

/// Map Diesel errors, keeping driver detail out of the returned message.
pub(super) fn map_diesel_error(error: DieselError) -> GuestRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            GuestRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => GuestRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => GuestRepositoryError::query("database query error"),
        DieselError::DeserializationError(_) => {
            GuestRepositoryError::query("unreadable guest row")
        }
        _ => GuestRepositoryError::query("database error"),
    }
}

/// Whether the error is a primary-key clash on insert.
pub(super) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
