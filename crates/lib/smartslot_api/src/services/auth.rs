//! Authentication service — login/register/refresh flows delegating to
//! `smartslot_core::auth`.

use sqlx::PgPool;
use tracing::info;

use smartslot_core::auth::jwt::{self, ACCESS_TOKEN_EXPIRY_SECS};
use smartslot_core::auth::{password, queries};
use smartslot_core::models::auth::{TokenPayload, User};

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::TokenResponse;

/// Build a `TokenResponse` for a user, signing a fresh token pair.
fn issue_response(user: User, config: &ApiConfig) -> AppResult<TokenResponse> {
    let payload = TokenPayload {
        user_id: user.id.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
    };
    let pair = jwt::issue_token_pair(
        &payload,
        config.access_token_secret.as_bytes(),
        config.refresh_token_secret.as_bytes(),
    )?;
    Ok(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        token_type: "Bearer".to_string(),
        user,
    })
}

/// Authenticate with email + password.
pub async fn login(
    pool: &PgPool,
    email: &str,
    pass: &str,
    config: &ApiConfig,
) -> AppResult<TokenResponse> {
    let row = queries::find_user_by_email(pool, email).await?;

    // Same generic error for unknown email and wrong password.
    let (user_id, name, pw_hash, role) = match row {
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
        Some(r) => r,
    };

    if !password::verify_password(pass, &pw_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    issue_response(
        User {
            id: user_id,
            email: email.to_string(),
            name,
            role,
        },
        config,
    )
}

/// Register a new user account. The first user gets the admin role.
pub async fn register(
    pool: &PgPool,
    email: &str,
    pass: &str,
    name: Option<&str>,
    config: &ApiConfig,
) -> AppResult<TokenResponse> {
    if pass.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("Invalid email address".into()));
    }

    if queries::email_exists(pool, email).await? {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let role = if queries::user_count(pool).await? == 0 {
        info!(email, "first user granted admin role");
        "admin"
    } else {
        "user"
    };

    let pw_hash = password::hash_password(pass)?;
    let user_id = queries::create_user(pool, email, name, &pw_hash, role).await?;

    issue_response(
        User {
            id: user_id,
            email: email.to_string(),
            name: name.map(|n| n.to_string()),
            role: role.to_string(),
        },
        config,
    )
}

/// Exchange a refresh token for a fresh token pair.
///
/// The user row is re-read so a role change takes effect here rather
/// than persisting for the life of old claims.
pub async fn refresh(
    pool: &PgPool,
    refresh_token: &str,
    config: &ApiConfig,
) -> AppResult<TokenResponse> {
    let claims = jwt::verify_refresh_token(refresh_token, config.refresh_token_secret.as_bytes())?;

    let user = queries::get_user_by_id(pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

    issue_response(user, config)
}
