//! # Credentials and session tokens
//!
//! The credential primitives of the engine. Nothing in here touches the database or HTTP.
//!
//! * [`PasswordHasher`] turns plaintext passwords into salted, adaptive hashes and verifies candidates against them.
//!   [`Argon2Hasher`] is the default implementation.
//! * [`TokenCodec`] issues and verifies stateless, signed, expiring session tokens. [`HmacTokenCodec`] produces
//!   compact `header.payload.signature` tokens signed with HMAC-SHA256.
//! * [`Clock`] is the time source for token issuance and expiry. Production code uses [`SystemClock`]; tests use
//!   [`FixedClock`] to pin the current instant.
//!
//! Both capability traits are object safe and `Send + Sync`, so a single instance can be shared between all HTTP
//! workers behind an `Arc`.
mod clock;
mod password;
mod token;

pub use clock::{Clock, FixedClock, SystemClock};
pub use password::{Argon2Hasher, HashingCost, PasswordHashError, PasswordHasher};
pub use token::{HmacTokenCodec, SessionClaims, TokenCodec, TokenError, DEFAULT_TOKEN_TTL};
