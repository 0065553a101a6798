//! Role guard middleware.
//!
//! Must be layered inside the authentication middleware: it reads the
//! claims `require_auth` attached to the request. Ordering is the
//! router's obligation, not enforced here.

use std::future::Future;
use std::pin::Pin;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;

/// Build a middleware check that only admits the given roles.
///
/// A request with no claims fails 401; a claim outside `allowed` fails
/// 403; otherwise the request proceeds unchanged.
pub fn require_role(
    allowed: &'static [&'static str],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
+ Clone
+ Send {
    move |request, next| Box::pin(check_role(allowed, request, next))
}

async fn check_role(
    allowed: &'static [&'static str],
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("Missing authentication context".into()))?;

    if !allowed.contains(&user.0.role.as_str()) {
        return Err(AppError::Forbidden("Insufficient role".into()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::{Router, middleware::from_fn};
    use tower::ServiceExt;

    use smartslot_core::models::auth::TokenClaims;

    use super::*;

    fn claims(role: &str) -> TokenClaims {
        TokenClaims {
            sub: "11111111-2222-3333-4444-555555555555".into(),
            email: "test@example.com".into(),
            role: role.into(),
            exp: 4_102_444_800,
            iat: 0,
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/guarded", get(|| async { "ok" }))
            .layer(from_fn(require_role(&["admin"])))
    }

    #[tokio::test]
    async fn missing_claims_yield_unauthenticated() {
        let req = HttpRequest::builder()
            .uri("/guarded")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.expect("request");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("parse JSON");
        assert_eq!(json["success"], false);
        assert!(json["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn wrong_role_yields_forbidden() {
        let mut req = HttpRequest::builder()
            .uri("/guarded")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(AuthenticatedUser(claims("staff")));
        let resp = app().oneshot(req).await.expect("request");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn allowed_role_passes_through() {
        let mut req = HttpRequest::builder()
            .uri("/guarded")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(AuthenticatedUser(claims("admin")));
        let resp = app().oneshot(req).await.expect("request");
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
