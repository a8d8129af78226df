use std::sync::Arc;

use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use shop_common::Secret;
use shop_engine::{
    auth::{Argon2Hasher, FixedClock, HashingCost, HmacTokenCodec, PasswordHasher},
    db_types::UserAccount,
};

pub const NOW: i64 = 1_717_000_000;

pub fn test_secret() -> Secret<String> {
    Secret::new("endpoint-test-secret-do-not-reuse".to_string())
}

/// A codec whose clock is pinned at [`NOW`], with the default 24-hour TTL.
pub fn fixed_codec() -> (HmacTokenCodec, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::from_timestamp(NOW));
    let codec = HmacTokenCodec::with_clock(&test_secret(), chrono::Duration::hours(24), clock.clone());
    (codec, clock)
}

pub fn test_hasher() -> Argon2Hasher {
    Argon2Hasher::new(HashingCost::minimal()).unwrap()
}

pub fn created_at() -> DateTime<Utc> {
    Utc.timestamp_opt(NOW - 3600, 0).unwrap()
}

pub fn account(id: i64, username: &str, password: &str) -> UserAccount {
    UserAccount {
        id,
        username: username.to_string(),
        password_hash: test_hasher().hash(password).unwrap(),
        created_at: created_at(),
    }
}

/// Sends the request to an app built from `configure` and returns the status and body. Errors raised by middleware
/// are rendered the same way the server would render them.
pub async fn send<F>(configure: F, req: TestRequest) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = test::init_service(App::new().configure(configure)).await;
    debug!("Making request");
    match test::try_call_service(&app, req.to_request()).await {
        Ok(res) => {
            let status = res.status();
            let body = test::read_body(res).await;
            (status, String::from_utf8_lossy(&body).into_owned())
        },
        Err(e) => {
            let res = e.error_response();
            let status = res.status();
            let body = res.into_body().try_into_bytes().unwrap();
            (status, String::from_utf8_lossy(&body).into_owned())
        },
    }
}
