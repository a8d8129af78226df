use std::{fmt::Debug, sync::Arc};

use chrono::Duration;
use hmac::{Hmac, Mac};
use log::*;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use shop_common::Secret;
use thiserror::Error;

use crate::auth::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::hours(24);
const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";
const SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Session token could not be encoded. {0}")]
    EncodingFailure(String),
    #[error("Session token is not in the correct format.")]
    MalformedToken,
    #[error("Session token signature is invalid.")]
    BadSignature,
    #[error("Session token has expired.")]
    Expired,
}

/// Issues and verifies stateless session tokens.
pub trait TokenCodec: Send + Sync {
    /// Create a signed token asserting `subject`.
    fn issue(&self, subject: &str) -> Result<String, TokenError>;

    /// Check the token's integrity and expiry and return the subject it asserts.
    fn verify(&self, token: &str) -> Result<String, TokenError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TokenHeader {
    alg: String,
    typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self { alg: ALGORITHM.to_string(), typ: TOKEN_TYPE.to_string() }
    }
}

/// The payload of a session token. Timestamps are unix epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub subject: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// HS256 session tokens: `base64url(header).base64url(claims).base64url(hmac_sha256(secret, header.claims))`.
///
/// The signature is checked before any field of the payload is looked at, expiry included.
pub struct HmacTokenCodec {
    key: Secret<Vec<u8>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Debug for HmacTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HmacTokenCodec(key: {}, ttl: {}s)", self.key, self.ttl.num_seconds())
    }
}

impl HmacTokenCodec {
    /// A codec using the system clock and the default 24-hour time-to-live.
    pub fn new(secret: &Secret<String>) -> Self {
        Self::with_clock(secret, DEFAULT_TOKEN_TTL, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &Secret<String>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let key = Secret::new(secret.reveal().as_bytes().to_vec());
        Self { key, ttl, clock }
    }

    /// Build the claims for a fresh token at the current instant.
    pub fn claims_for(&self, subject: &str) -> SessionClaims {
        let issued_at = self.clock.unix_timestamp();
        SessionClaims { subject: subject.to_string(), issued_at, expires_at: issued_at + self.ttl.num_seconds() }
    }

    /// Sign and serialize arbitrary claims. `issue` is a thin wrapper around this.
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        let header = serde_json::to_vec(&TokenHeader::default())
            .map_err(|e| TokenError::EncodingFailure(format!("header: {e}")))?;
        let payload =
            serde_json::to_vec(claims).map_err(|e| TokenError::EncodingFailure(format!("payload: {e}")))?;
        let signing_input = format!("{}{SEPARATOR}{}", encode_segment(&header), encode_segment(&payload));
        let signature = self.mac(&signing_input)?.finalize().into_bytes();
        Ok(format!("{signing_input}{SEPARATOR}{}", encode_segment(&signature)))
    }

    /// Verify the token and return its claims.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let parts = token.split(SEPARATOR).collect::<Vec<&str>>();
        let [header, payload, signature] = parts.as_slice() else {
            trace!("🎫️ Token has {} segments instead of 3", parts.len());
            return Err(TokenError::MalformedToken);
        };
        let signature = decode_segment(signature).map_err(|_| TokenError::BadSignature)?;
        let signing_input = &token[..header.len() + payload.len() + 1];
        self.mac(signing_input)?.verify_slice(&signature).map_err(|_| TokenError::BadSignature)?;

        let header: TokenHeader = decode_json(header)?;
        if header.alg != ALGORITHM {
            debug!("🎫️ Token signed with unsupported algorithm {}", header.alg);
            return Err(TokenError::MalformedToken);
        }
        let claims: SessionClaims = decode_json(payload)?;
        let now = self.clock.unix_timestamp();
        if now > claims.expires_at {
            trace!("🎫️ Token for {} expired at {} (now {now})", claims.subject, claims.expires_at);
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    fn mac(&self, signing_input: &str) -> Result<HmacSha256, TokenError> {
        let mut mac = HmacSha256::new_from_slice(self.key.reveal())
            .map_err(|e| TokenError::EncodingFailure(format!("signing key: {e}")))?;
        mac.update(signing_input.as_bytes());
        Ok(mac)
    }
}

impl TokenCodec for HmacTokenCodec {
    fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let claims = self.claims_for(subject);
        let token = self.encode(&claims)?;
        debug!("🎫️ Issued session token for {subject}, valid until {}", claims.expires_at);
        Ok(token)
    }

    fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.subject)
    }
}

fn encode_segment(bytes: &[u8]) -> String {
    base64::encode_config(bytes, base64::URL_SAFE_NO_PAD)
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    base64::decode_config(segment, base64::URL_SAFE_NO_PAD)
}

fn decode_json<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = decode_segment(segment).map_err(|_| TokenError::MalformedToken)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        trace!("🎫️ Token segment is not valid JSON. {e}");
        TokenError::MalformedToken
    })
}
