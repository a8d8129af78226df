use thiserror::Error;

use crate::db::traits::UserApiError;

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Database migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("Could not create new user account: {0}")]
    AccountCreationError(String),
    #[error("Username {0} is already taken")]
    UsernameTaken(String),
}

impl From<SqliteDatabaseError> for UserApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::UsernameTaken(name) => UserApiError::UserAlreadyExists(name),
            e => UserApiError::DatabaseError(e.to_string()),
        }
    }
}
