//! Per-address rate limiting middleware.
//!
//! Two fixed-window limiters live in `AppState`: a strict one for the
//! authentication endpoints and a general one for the whole API. Standard
//! rate-limit headers are attached to every response, allowed or rejected.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;

use smartslot_core::ratelimit::{FixedWindowLimiter, RateLimitDecision};

use crate::AppState;
use crate::error::AppError;

/// Resolve the client address: first `x-forwarded-for` hop, then the
/// socket address recorded by the listener.
pub fn client_addr(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        && let Some(first) = forwarded.split(',').next()
    {
        let first = first.trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// General API limiter (100 requests / 60 s per address).
pub async fn general_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state.api_limiter, request, next).await
}

/// Authentication limiter (5 requests / 60 s per address).
pub async fn auth_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state.auth_limiter, request, next).await
}

async fn enforce(limiter: &FixedWindowLimiter, request: Request, next: Next) -> Response {
    let key = client_addr(&request);
    let decision = limiter.check(&key);

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        AppError::RateLimited.into_response()
    };

    apply_headers(&mut response, &decision);
    response
}

fn apply_headers(response: &mut Response, decision: &RateLimitDecision) {
    let headers = response.headers_mut();
    // An inner, stricter limiter already reported its quota; keep it.
    if headers.contains_key("x-ratelimit-limit") {
        return;
    }
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert(
        "x-ratelimit-reset",
        HeaderValue::from(decision.reset_secs.max(0) as u64),
    );
}
