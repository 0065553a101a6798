//! # smartslot_api
//!
//! HTTP API library for SmartSlot.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{delete, get, patch, post};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use smartslot_core::llm::LlmClient;
use smartslot_core::ratelimit::FixedWindowLimiter;

use crate::config::ApiConfig;
use crate::handlers::{admin, ai, appointments, auth, health, resources, slots, tasks};
use crate::middleware::{auth as auth_mw, rate_limit, role};

/// Requests allowed per window on the authentication endpoints.
pub const AUTH_RATE_LIMIT: u32 = 5;

/// Requests allowed per window across the whole API.
pub const API_RATE_LIMIT: u32 = 100;

/// Rate-limit window length.
pub const RATE_LIMIT_WINDOW_SECS: i64 = 60;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// LLM client; `None` when no provider is configured.
    pub llm: Option<LlmClient>,
    /// Limiter for the authentication endpoints.
    pub auth_limiter: FixedWindowLimiter,
    /// Limiter for the whole API.
    pub api_limiter: FixedWindowLimiter,
}

impl AppState {
    /// Build state with the default limiter configurations.
    pub fn new(pool: PgPool, config: ApiConfig, llm: Option<LlmClient>) -> Self {
        Self {
            pool,
            config,
            llm,
            auth_limiter: FixedWindowLimiter::new(AUTH_RATE_LIMIT, RATE_LIMIT_WINDOW_SECS),
            api_limiter: FixedWindowLimiter::new(API_RATE_LIMIT, RATE_LIMIT_WINDOW_SECS),
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `smartslot_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    smartslot_core::migrate::migrate(pool).await
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = if config.cors_allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .cors_allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    // Authentication routes carry their own stricter limiter.
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/refresh", post(auth::refresh_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::auth_rate_limit,
        ));

    // Protected routes (require auth)
    let protected = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/tasks",
            get(tasks::list_tasks_handler).post(tasks::create_task_handler),
        )
        .route(
            "/tasks/{id}",
            get(tasks::get_task_handler)
                .patch(tasks::update_task_handler)
                .delete(tasks::delete_task_handler),
        )
        .route("/resources", get(resources::list_resources_handler))
        .route("/resources/{id}", get(resources::get_resource_handler))
        .route("/resources/{id}/slots", get(slots::list_slots_handler))
        .route("/slots/{id}", get(slots::get_slot_handler))
        .route(
            "/appointments",
            get(appointments::list_appointments_handler)
                .post(appointments::book_appointment_handler),
        )
        .route(
            "/appointments/{id}",
            get(appointments::get_appointment_handler),
        )
        .route(
            "/appointments/{id}/cancel",
            post(appointments::cancel_appointment_handler),
        )
        .route("/ai/reason", post(ai::reason_handler))
        .route("/ai/audit", post(ai::audit_handler))
        .route("/ai/refactor", post(ai::refactor_handler))
        .route("/ai/workflow", post(ai::workflow_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_mw::require_auth,
        ));

    // Resource/slot mutations: staff or admin.
    let staff = Router::new()
        .route("/resources", post(resources::create_resource_handler))
        .route(
            "/resources/{id}",
            patch(resources::update_resource_handler)
                .delete(resources::delete_resource_handler),
        )
        .route("/resources/{id}/slots", post(slots::create_slot_handler))
        .route("/slots/{id}", delete(slots::delete_slot_handler))
        .layer(axum::middleware::from_fn(role::require_role(&[
            "admin", "staff",
        ])))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_mw::require_auth,
        ));

    // User management: admin only.
    let admin_routes = Router::new()
        .route("/admin/users", get(admin::list_users_handler))
        .route(
            "/admin/users/{id}",
            delete(admin::delete_user_handler),
        )
        .route("/admin/users/{id}/role", patch(admin::set_role_handler))
        .layer(axum::middleware::from_fn(role::require_role(&["admin"])))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_mw::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(auth_routes)
        .merge(protected)
        .merge(staff)
        .merge(admin_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::general_rate_limit,
        ))
        .layer(cors)
        .with_state(state)
}
