//! # Shop engine public API
//!
//! The `engine_api` module exposes the programmatic API for account registration and login.
//!
//! * [`credential_api`] registers users, checks their passwords, and issues session tokens for them.
//!
//! # API usage
//!
//! An API instance is created by supplying a database backend that implements the backend traits the API needs, along
//! with the hasher and token codec it should use.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shop_engine::{auth::{Argon2Hasher, HmacTokenCodec}, CredentialApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! let api = CredentialApi::new(db, Arc::new(Argon2Hasher::default()), Arc::new(HmacTokenCodec::new(&secret)));
//! let id = api.register("alice", "correct horse").await?;
//! let grant = api.login("alice", "correct horse").await?;
//! ```

pub mod credential_api;
pub mod errors;
