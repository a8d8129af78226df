use thiserror::Error;

use crate::{
    auth::{PasswordHashError, TokenError},
    db::traits::UserApiError,
};

#[derive(Debug, Clone, Error)]
pub enum CredentialApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("User {0} already exists")]
    UserAlreadyExists(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Password hashing failed")]
    HashingFailure,
    #[error("Could not issue a session token. {0}")]
    TokenFailure(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserApiError> for CredentialApiError {
    fn from(e: UserApiError) -> Self {
        match e {
            UserApiError::UserAlreadyExists(name) => CredentialApiError::UserAlreadyExists(name),
            UserApiError::DatabaseError(s) => CredentialApiError::DatabaseError(s),
        }
    }
}

impl From<PasswordHashError> for CredentialApiError {
    fn from(_: PasswordHashError) -> Self {
        CredentialApiError::HashingFailure
    }
}

impl From<TokenError> for CredentialApiError {
    fn from(e: TokenError) -> Self {
        CredentialApiError::TokenFailure(e.to_string())
    }
}
