use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig, HttpResponse};
use chrono::Duration;
use shop_engine::auth::{HmacTokenCodec, SystemClock, TokenCodec};

use super::{helpers::*, mocks::CountingCodec};
use crate::{auth::AuthenticatedIdentity, middleware::SessionGateFactory};

#[derive(Default)]
struct HandlerCalls(AtomicUsize);

async fn whoami(identity: AuthenticatedIdentity, calls: web::Data<HandlerCalls>) -> HttpResponse {
    calls.0.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().body(identity.subject)
}

async fn ungated(identity: AuthenticatedIdentity) -> HttpResponse {
    HttpResponse::Ok().body(identity.subject)
}

fn configure_app(codec: Arc<dyn TokenCodec>, calls: web::Data<HandlerCalls>) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(calls).service(
            web::scope("/api").wrap(SessionGateFactory::new(codec)).route("/whoami", web::get().to(whoami)),
        );
        cfg.route("/open/whoami", web::get().to(ungated));
    }
}

struct Gate {
    codec: HmacTokenCodec,
    clock: Arc<shop_engine::auth::FixedClock>,
}

impl Gate {
    fn new() -> Self {
        let (codec, clock) = fixed_codec();
        Self { codec, clock }
    }

    /// Sends a request with the given Authorization header (or none) through a gate backed by a counting codec.
    /// Returns the status, body, codec verification count and handler invocation count.
    async fn request(self, authorization: Option<&str>) -> (StatusCode, String, usize, usize) {
        let (codec, verifications) = CountingCodec::new(self.codec);
        let calls = web::Data::new(HandlerCalls::default());
        let mut req = TestRequest::get().uri("/api/whoami");
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }
        let (status, body) = send(configure_app(Arc::new(codec), calls.clone()), req).await;
        (status, body, verifications.load(Ordering::SeqCst), calls.0.load(Ordering::SeqCst))
    }
}

#[actix_web::test]
async fn valid_token_reaches_the_handler() {
    let _ = env_logger::try_init();
    let gate = Gate::new();
    let token = gate.codec.issue("alice").unwrap();
    let (status, body, verifications, calls) = gate.request(Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "alice");
    assert_eq!(verifications, 1);
    assert_eq!(calls, 1);
}

#[actix_web::test]
async fn lowercase_scheme_is_accepted() {
    let _ = env_logger::try_init();
    let gate = Gate::new();
    let token = gate.codec.issue("alice").unwrap();
    let (status, body, _, _) = gate.request(Some(&format!("bearer {token}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "alice");
}

#[actix_web::test]
async fn expired_token_never_reaches_the_handler() {
    let _ = env_logger::try_init();
    let gate = Gate::new();
    let token = gate.codec.issue("alice").unwrap();
    gate.clock.advance(Duration::hours(24) + Duration::seconds(1));
    let (status, body, verifications, calls) = gate.request(Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Unauthorized: invalid or expired token"}"#);
    assert_eq!(verifications, 1);
    assert_eq!(calls, 0);
}

#[actix_web::test]
async fn token_is_accepted_until_the_last_second() {
    let _ = env_logger::try_init();
    let gate = Gate::new();
    let token = gate.codec.issue("alice").unwrap();
    gate.clock.advance(Duration::hours(24));
    let (status, _, _, calls) = gate.request(Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(calls, 1);
}

#[actix_web::test]
async fn forged_token_gets_the_generic_message() {
    let _ = env_logger::try_init();
    let gate = Gate::new();
    let other = HmacTokenCodec::with_clock(
        &shop_common::Secret::new("not-the-server-secret".to_string()),
        Duration::hours(24),
        Arc::new(SystemClock),
    );
    let token = other.issue("mallory").unwrap();
    let (status, body, verifications, calls) = gate.request(Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Unauthorized: invalid or expired token"}"#);
    assert_eq!(verifications, 1);
    assert_eq!(calls, 0);
}

#[actix_web::test]
async fn garbage_token_gets_the_generic_message() {
    let _ = env_logger::try_init();
    for token in ["not.two.dots.four.parts", "a.b.c", "nodots"] {
        let (status, body, verifications, calls) = Gate::new().request(Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{token}");
        assert_eq!(body, r#"{"error":"Unauthorized: invalid or expired token"}"#);
        assert_eq!(verifications, 1);
        assert_eq!(calls, 0);
    }
}

#[actix_web::test]
async fn missing_header_is_rejected_before_the_codec() {
    let _ = env_logger::try_init();
    let (status, body, verifications, calls) = Gate::new().request(None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Unauthorized: missing credential"}"#);
    assert_eq!(verifications, 0);
    assert_eq!(calls, 0);
}

#[actix_web::test]
async fn empty_header_is_rejected_before_the_codec() {
    let _ = env_logger::try_init();
    let (status, body, verifications, calls) = Gate::new().request(Some("")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Unauthorized: missing credential"}"#);
    assert_eq!(verifications, 0);
    assert_eq!(calls, 0);
}

#[actix_web::test]
async fn other_schemes_are_rejected_before_the_codec() {
    let _ = env_logger::try_init();
    for value in ["Basic xyz", "Bearer", "Bearer    ", "Token abc"] {
        let (status, body, verifications, calls) = Gate::new().request(Some(value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{value}");
        assert_eq!(body, r#"{"error":"Unauthorized: malformed credential"}"#, "{value}");
        assert_eq!(verifications, 0);
        assert_eq!(calls, 0);
    }
}

#[actix_web::test]
async fn identity_outside_the_gate_is_a_server_error() {
    let _ = env_logger::try_init();
    let (codec, _) = fixed_codec();
    let calls = web::Data::new(HandlerCalls::default());
    let req = TestRequest::get().uri("/open/whoami");
    let (status, _) = send(configure_app(Arc::new(codec), calls), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
