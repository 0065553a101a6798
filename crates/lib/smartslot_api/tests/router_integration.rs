//! Router integration tests — build the full router and drive it with
//! `tower::ServiceExt::oneshot`. No database is required: every request
//! here is resolved by middleware or validation before the pool is
//! touched (the pool is lazy and points nowhere).

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use smartslot_api::{AppState, config::ApiConfig, router};
use smartslot_core::auth::jwt::issue_access_token;
use smartslot_core::models::auth::TokenPayload;

const ACCESS_SECRET: &str = "integration-access-secret-0123456789abcdef";
const REFRESH_SECRET: &str = "integration-refresh-secret-0123456789abcdef";

fn test_app() -> axum::Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(50))
        .connect_lazy("postgres://127.0.0.1:1/unreachable")
        .expect("lazy pool");
    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: "postgres://127.0.0.1:1/unreachable".into(),
        access_token_secret: ACCESS_SECRET.into(),
        refresh_token_secret: REFRESH_SECRET.into(),
        cors_allowed_origins: vec!["*".into()],
        llm: None,
    };
    router(AppState::new(pool, config, None))
}

fn bearer(role: &str) -> String {
    let payload = TokenPayload {
        user_id: "11111111-2222-3333-4444-555555555555".into(),
        email: "tester@example.com".into(),
        role: role.into(),
    };
    let token = issue_access_token(&payload, ACCESS_SECRET.as_bytes()).expect("token");
    format!("Bearer {token}")
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn health_is_public_and_reports_quota() {
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-ratelimit-limit"], "100");
    assert!(resp.headers().contains_key("x-ratelimit-remaining"));
    assert!(resp.headers().contains_key("x-ratelimit-reset"));

    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn sixth_auth_request_in_window_is_rate_limited() {
    let app = test_app();

    for i in 1..=5 {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/refresh")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header("x-forwarded-for", "198.51.100.7")
                    .body(Body::from(r#"{"refreshToken": "garbage"}"#))
                    .unwrap(),
            )
            .await
            .expect("request");
        // Bad token, but the limiter let it through.
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "request {i}");
    }

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-forwarded-for", "198.51.100.7")
                .body(Body::from(r#"{"refreshToken": "garbage"}"#))
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(resp.headers()["x-ratelimit-limit"], "5");
    assert_eq!(resp.headers()["x-ratelimit-remaining"], "0");

    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert!(json["error"]["message"].is_string());
}

#[tokio::test]
async fn other_addresses_keep_their_own_quota() {
    let app = test_app();

    for _ in 0..6 {
        let _ = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/refresh")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header("x-forwarded-for", "203.0.113.1")
                    .body(Body::from(r#"{"refreshToken": "garbage"}"#))
                    .unwrap(),
            )
            .await
            .expect("request");
    }

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-forwarded-for", "203.0.113.2")
                .body(Body::from(r#"{"refreshToken": "garbage"}"#))
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_token_is_rejected_with_envelope() {
    let app = test_app();
    let resp = app
        .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["message"], "Missing authorization header");
}

#[tokio::test]
async fn wrong_scheme_is_rejected() {
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/tasks")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwdw==")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/tasks")
                .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(resp).await;
    assert_eq!(json["error"]["message"], "Invalid token");
}

#[tokio::test]
async fn non_admin_cannot_reach_admin_routes() {
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/admin/users")
                .header(header::AUTHORIZATION, bearer("staff"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn regular_user_cannot_mutate_resources() {
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/resources")
                .header(header::AUTHORIZATION, bearer("user"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Room A"}"#))
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unconfigured_llm_rejects_ai_requests() {
    let app = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai/reason")
                .header(header::AUTHORIZATION, bearer("user"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"prompt": "anything"}"#))
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["error"]["message"], "No LLM provider configured");
}
