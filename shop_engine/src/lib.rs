//! Shop Engine
//!
//! This library contains the credential and session logic for the storefront backend. It knows nothing about HTTP.
//!
//! The library is divided into three main sections:
//! 1. Credential primitives ([`mod@auth`]). Argon2id password hashing and HS256 session tokens, each behind a trait so
//!    that the server and tests can swap in their own implementations.
//! 2. Database management and control ([`mod@db`]). SQLite is the supported backend. You should never need to access
//!    the database directly. Instead, use the public API provided by the engine. The exception is the data types used
//!    in the database. These are defined in the `db_types` module and are public.
//! 3. The engine public API ([`mod@engine_api`]). Registration, login and account lookup for authenticated users.
pub mod auth;
mod db;

pub mod db_types;
mod engine_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError, SQLITE_DB_URL};
pub use db::traits::{UserApiError, UserManagement};
pub use engine_api::{
    credential_api::{CredentialApi, LoginGrant, MIN_PASSWORD_LENGTH},
    errors::CredentialApiError,
};
