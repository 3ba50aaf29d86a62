//! Mapping from pool and Diesel failures to user persistence errors.

use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors without leaking driver detail into the message.
///
/// A closed connection is a connection failure; everything else is a query
/// failure.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
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
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("relation \"users\" is gone")))
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            UserPersistenceError::connection("timed out")
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, UserPersistenceError::query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        UserPersistenceError::connection("database connection error")
    )]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation),
        UserPersistenceError::query("database error")
    )]
    fn diesel_failures_hide_driver_detail(
        #[case] error: DieselError,
        #[case] expected: UserPersistenceError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }
}
