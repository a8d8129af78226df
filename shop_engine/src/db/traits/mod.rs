//! #  Database management and control.
//!
//! This module defines the interface contracts that user-storage *backends* must satisfy.
//!
//! * [`UserManagement`] stores credentials (a unique username plus an opaque password hash) and looks them up again.
//!   The engine never reads or writes the plaintext password through this trait.
//!
//! The SQLite backend in [`crate::db::sqlite`] is the only implementation shipped with the engine, but any store that
//! implements the trait can be handed to [`crate::CredentialApi`].
mod user_management;

pub use user_management::{UserApiError, UserManagement};
