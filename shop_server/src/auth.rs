use std::sync::Arc;

use actix_web::{
    dev::Payload,
    error::ErrorInternalServerError,
    http::header::{HeaderMap, AUTHORIZATION},
    FromRequest,
    HttpMessage,
    HttpRequest,
};
use futures::future::{ready, Ready};
use log::*;
use shop_engine::auth::{Argon2Hasher, HmacTokenCodec, SystemClock, TokenCodec};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

const BEARER: &str = "Bearer";

/// The verified subject of a session token.
///
/// The session gate puts this into the request extensions once the token has been verified. Handlers behind the gate
/// take it as an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub subject: String,
}

impl AuthenticatedIdentity {
    pub fn new<S: Into<String>>(subject: S) -> Self {
        Self { subject: subject.into() }
    }
}

impl FromRequest for AuthenticatedIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<AuthenticatedIdentity>().cloned().ok_or_else(|| {
            warn!("🔐️ No authenticated identity found in request extensions. Is the route behind the session gate?");
            ErrorInternalServerError("No authenticated identity found in request extensions")
        });
        ready(identity)
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
///
/// An absent or blank header is a missing credential. Anything else that is not a bearer credential with a non-empty
/// token is malformed. The scheme name is matched case-insensitively.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingCredential)?;
    let value = value.to_str().map_err(|_| AuthError::MalformedCredential)?.trim();
    if value.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MalformedCredential)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER) || token.is_empty() {
        return Err(AuthError::MalformedCredential);
    }
    Ok(token)
}

/// Builds the one token codec the whole server shares.
pub fn build_token_codec(config: &AuthConfig) -> Arc<dyn TokenCodec> {
    if config.is_insecure() {
        warn!("🔐️ Session tokens are signed with the built-in default secret. Set SHOP_JWT_SECRET.");
    }
    Arc::new(HmacTokenCodec::with_clock(&config.jwt_secret, config.token_ttl, Arc::new(SystemClock)))
}

pub fn build_password_hasher(config: &AuthConfig) -> Result<Argon2Hasher, ServerError> {
    let hasher = Argon2Hasher::new(config.hashing_cost)
        .map_err(|e| ServerError::ConfigurationError(format!("Invalid password hashing cost. {e}")))?;
    debug!("🔐️ Password hasher configured: {hasher:?}");
    Ok(hasher)
}
