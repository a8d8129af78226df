use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm,
    Argon2,
    Params,
    Version,
};
use log::*;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PasswordHashError {
    #[error("The password hashing work factor is invalid. {0}")]
    InvalidCost(String),
    #[error("Password could not be hashed.")]
    HashingFailure,
}

/// One-way, salted password hashing.
///
/// Implementations must salt every call to [`hash`](PasswordHasher::hash) independently, so hashing the same
/// plaintext twice gives two different strings. [`verify`](PasswordHasher::verify) never fails on a mismatch; it
/// simply returns `false`.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    fn verify(&self, plaintext: &str, hashed: &str) -> bool;
}

/// The Argon2 work factor. These values are startup configuration, never user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingCost {
    /// The cheapest cost Argon2 accepts. Only suitable for tests.
    pub fn minimal() -> Self {
        Self { memory_kib: Params::MIN_M_COST, iterations: Params::MIN_T_COST, parallelism: Params::MIN_P_COST }
    }
}

/// Argon2id hasher producing PHC-formatted strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
///
/// The parameters are embedded in every hash, so raising the [`HashingCost`] later does not break verification of
/// hashes created under the old cost.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Argon2Hasher(m={}, t={}, p={})", self.params.m_cost(), self.params.t_cost(), self.params.p_cost())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self { params: Params::default() }
    }
}

impl Argon2Hasher {
    pub fn new(cost: HashingCost) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2().hash_password(plaintext.as_bytes(), &salt).map(|h| h.to_string()).map_err(|e| {
            error!("🔑️ Password hashing failed. {e}");
            PasswordHashError::HashingFailure
        })
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        let parsed = match PasswordHash::new(hashed) {
            Ok(p) => p,
            Err(e) => {
                warn!("🔑️ Stored password hash could not be parsed. {e}");
                return false;
            },
        };
        self.argon2().verify_password(plaintext.as_bytes(), &parsed).is_ok()
    }
}
