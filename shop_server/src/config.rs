use std::{env, fmt::Display, str::FromStr};

use chrono::Duration;
use log::*;
use shop_common::{helpers::parse_boolean_flag, Secret};
use shop_engine::{auth::HashingCost, SQLITE_DB_URL};

const DEFAULT_SHOP_HOST: &str = "127.0.0.1";
const DEFAULT_SHOP_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
/// Used when `SHOP_JWT_SECRET` is not set. Anyone who has read this source file can forge session tokens for a server
/// running with it.
pub const INSECURE_DEFAULT_SECRET: &str = "change-me-in-production-this-is-not-a-secret";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// If true, a missing database file is created at start-up.
    pub create_database: bool,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SHOP_HOST.to_string(),
            port: DEFAULT_SHOP_PORT,
            database_url: SQLITE_DB_URL.to_string(),
            create_database: true,
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("SHOP_HOST").ok().unwrap_or_else(|| DEFAULT_SHOP_HOST.into());
        let port = parse_env_value("SHOP_PORT", env::var("SHOP_PORT").ok(), DEFAULT_SHOP_PORT);
        let database_url = env::var("SHOP_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ SHOP_DATABASE_URL is not set. Using the default, {SQLITE_DB_URL}.");
            SQLITE_DB_URL.to_string()
        });
        let create_database = parse_boolean_flag(env::var("SHOP_CREATE_DATABASE").ok(), true);
        let auth = AuthConfig::from_env();
        Self { host, port, database_url, create_database, auth }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The shared secret used to sign and verify session tokens.
    pub jwt_secret: Secret<String>,
    pub token_ttl: Duration,
    pub hashing_cost: HashingCost,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn_insecure_secret();
        Self {
            jwt_secret: Secret::new(INSECURE_DEFAULT_SECRET.to_string()),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            hashing_cost: HashingCost::default(),
        }
    }
}

impl AuthConfig {
    /// Reads each setting on its own. A missing or invalid value falls back to its default without affecting the
    /// others. Only an unset or empty `SHOP_JWT_SECRET` selects the insecure default secret.
    pub fn from_env() -> Self {
        let jwt_secret = match env::var("SHOP_JWT_SECRET") {
            Ok(s) if !s.trim().is_empty() => s,
            Ok(_) => {
                error!("🪛️ SHOP_JWT_SECRET is empty.");
                warn_insecure_secret();
                INSECURE_DEFAULT_SECRET.to_string()
            },
            Err(_) => {
                warn_insecure_secret();
                INSECURE_DEFAULT_SECRET.to_string()
            },
        };
        let mut ttl_hours =
            parse_env_value("SHOP_TOKEN_TTL_HOURS", env::var("SHOP_TOKEN_TTL_HOURS").ok(), DEFAULT_TOKEN_TTL_HOURS);
        if ttl_hours <= 0 {
            error!(
                "🪛️ SHOP_TOKEN_TTL_HOURS must be positive, but was {ttl_hours}. Using the default, \
                 {DEFAULT_TOKEN_TTL_HOURS}, instead."
            );
            ttl_hours = DEFAULT_TOKEN_TTL_HOURS;
        }
        let default_cost = HashingCost::default();
        let hashing_cost = HashingCost {
            memory_kib: parse_env_value(
                "SHOP_HASH_MEMORY_KIB",
                env::var("SHOP_HASH_MEMORY_KIB").ok(),
                default_cost.memory_kib,
            ),
            iterations: parse_env_value(
                "SHOP_HASH_ITERATIONS",
                env::var("SHOP_HASH_ITERATIONS").ok(),
                default_cost.iterations,
            ),
            parallelism: parse_env_value(
                "SHOP_HASH_PARALLELISM",
                env::var("SHOP_HASH_PARALLELISM").ok(),
                default_cost.parallelism,
            ),
        };
        Self { jwt_secret: Secret::new(jwt_secret), token_ttl: Duration::hours(ttl_hours), hashing_cost }
    }

    pub fn is_insecure(&self) -> bool {
        self.jwt_secret.reveal() == INSECURE_DEFAULT_SECRET
    }
}

fn warn_insecure_secret() {
    warn!(
        "🚨️🚨️🚨️ SHOP_JWT_SECRET has not been set. Session tokens are being signed with a well-known default secret. \
         DO NOT operate in production like this, since anyone can forge a session token. 🚨️🚨️🚨️"
    );
}

/// Parses an optional environment value, falling back to `default` (with a log message) when it is missing or invalid.
fn parse_env_value<T>(name: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match value {
        None => {
            debug!("🪛️ {name} is not set. Using the default value of {default}.");
            default
        },
        Some(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
    }
}
