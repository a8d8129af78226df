use thiserror::Error;

use crate::db_types::{NewUserAccount, UserAccount};

#[derive(Debug, Clone, Error)]
pub enum UserApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("User {0} already exists")]
    UserAlreadyExists(String),
}

impl From<sqlx::Error> for UserApiError {
    fn from(e: sqlx::Error) -> Self {
        UserApiError::DatabaseError(e.to_string())
    }
}

/// The `UserManagement` trait defines behaviour for persisting and fetching user credentials.
///
/// Accounts are created at registration and read at login. They are never mutated or deleted by the engine.
#[allow(async_fn_in_trait)]
pub trait UserManagement {
    /// Stores a new account and returns its id. If the username is taken, [`UserApiError::UserAlreadyExists`] is
    /// returned and nothing is written.
    async fn create_user(&self, user: NewUserAccount) -> Result<i64, UserApiError>;

    /// Fetches the account with the given username. If no such account exists, `None` is returned.
    async fn fetch_user_by_username(&self, username: &str) -> Result<Option<UserAccount>, UserApiError>;

    async fn fetch_user_by_id(&self, id: i64) -> Result<Option<UserAccount>, UserApiError>;

    /// Checks whether an account exists for the given username.
    ///
    /// The default implementation calls [`fetch_user_by_username`](UserManagement::fetch_user_by_username).
    async fn user_exists(&self, username: &str) -> Result<bool, UserApiError> {
        Ok(self.fetch_user_by_username(username).await?.is_some())
    }
}
