//! Data types stored in, and returned from, the user account database.
use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------     UserAccount       ---------------------------------------------------------
/// A registered user. `password_hash` is an opaque PHC string and must never be sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn profile(&self) -> UserProfile {
        UserProfile { id: self.id, username: self.username.clone(), created_at: self.created_at }
    }
}

//--------------------------------------     NewUserAccount    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    pub username: String,
    pub password_hash: String,
}

impl NewUserAccount {
    pub fn new<S: Into<String>>(username: S, password_hash: S) -> Self {
        Self { username: username.into(), password_hash: password_hash.into() }
    }
}

impl Display for NewUserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NewUserAccount({})", self.username)
    }
}

//--------------------------------------     UserProfile       ---------------------------------------------------------
/// The client-safe view of a [`UserAccount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
