//! Registration, password checks and session token issuance.

use std::{fmt::Debug, sync::Arc};

use log::*;

use crate::{
    auth::{PasswordHasher, TokenCodec},
    db::traits::UserManagement,
    db_types::{NewUserAccount, UserAccount},
    engine_api::errors::CredentialApiError,
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: String,
    pub user: UserAccount,
}

/// `CredentialApi` ties a user store to a password hasher and a session token codec.
///
/// Argon2 is deliberately slow, so hashing and verification run on the blocking thread pool rather than on the
/// async executor.
pub struct CredentialApi<B, H> {
    db: B,
    hasher: Arc<H>,
    codec: Arc<dyn TokenCodec>,
}

impl<B: Debug, H: Debug> Debug for CredentialApi<B, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialApi ({:?}, {:?})", self.db, self.hasher)
    }
}

impl<B, H> CredentialApi<B, H>
where
    B: UserManagement,
    H: PasswordHasher + 'static,
{
    pub fn new(db: B, hasher: Arc<H>, codec: Arc<dyn TokenCodec>) -> Self {
        Self { db, hasher, codec }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    /// Creates a new account and returns its id. The plaintext password is hashed before it goes anywhere near the
    /// database. Whitespace around the username is stripped.
    pub async fn register(&self, username: &str, password: &str) -> Result<i64, CredentialApiError> {
        let username = username.trim();
        check_required(username, password)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CredentialApiError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if self.db.user_exists(username).await? {
            debug!("🧑️ Registration refused. {username} already exists");
            return Err(CredentialApiError::UserAlreadyExists(username.to_string()));
        }
        let password_hash = self.hash_password(password).await?;
        let id = self.db.create_user(NewUserAccount::new(username.to_string(), password_hash)).await?;
        info!("🧑️ Registered new user {username} with id {id}");
        Ok(id)
    }

    /// Returns the account if `password` matches the stored hash for `username`.
    ///
    /// An unknown user and a wrong password give the same [`CredentialApiError::InvalidCredentials`] error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserAccount, CredentialApiError> {
        let username = username.trim();
        check_required(username, password)?;
        let Some(user) = self.db.fetch_user_by_username(username).await? else {
            debug!("🧑️ Login attempt for unknown user {username}");
            return Err(CredentialApiError::InvalidCredentials);
        };
        if self.verify_password(password, &user.password_hash).await? {
            Ok(user)
        } else {
            debug!("🧑️ Wrong password for {username}");
            Err(CredentialApiError::InvalidCredentials)
        }
    }

    /// Authenticates the user and issues a session token asserting their username.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, CredentialApiError> {
        let user = self.authenticate(username, password).await?;
        let token = self.codec.issue(&user.username)?;
        info!("🧑️ {} logged in", user.username);
        Ok(LoginGrant { token, user })
    }

    /// Fetches the account for an authenticated subject. Returns `None` if it has since disappeared.
    pub async fn account_for(&self, username: &str) -> Result<Option<UserAccount>, CredentialApiError> {
        let user = self.db.fetch_user_by_username(username).await?;
        Ok(user)
    }

    async fn hash_password(&self, password: &str) -> Result<String, CredentialApiError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password)).await.map_err(|e| {
            error!("🧑️ Password hashing task did not complete. {e}");
            CredentialApiError::HashingFailure
        })??;
        Ok(hashed)
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, CredentialApiError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hashed = hashed.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hashed)).await.map_err(|e| {
            error!("🧑️ Password verification task did not complete. {e}");
            CredentialApiError::HashingFailure
        })
    }
}

fn check_required(username: &str, password: &str) -> Result<(), CredentialApiError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(CredentialApiError::InvalidInput("Username and password are required".to_string()));
    }
    Ok(())
}
