//! JWT token issuance and verification.
//!
//! Access and refresh tokens are both HS256 JWTs carrying the same claim
//! set but signed with distinct secrets and lifetimes. Validity is decided
//! entirely by signature and embedded expiry; there is no server-side
//! session record.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::AuthError;
use crate::models::auth::{TokenClaims, TokenPair, TokenPayload};

/// Access token lifetime: 15 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 15 * 60;

/// Refresh token lifetime: 7 days.
pub const REFRESH_TOKEN_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

fn issue(payload: &TokenPayload, secret: &[u8], lifetime_secs: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: payload.user_id.clone(),
        email: payload.email.clone(),
        role: payload.role.clone(),
        exp: (now + Duration::seconds(lifetime_secs)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

fn verify(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidSignature,
        })
}

/// Issue a signed access token (HS256, 15 min expiry).
pub fn issue_access_token(payload: &TokenPayload, secret: &[u8]) -> Result<String, AuthError> {
    issue(payload, secret, ACCESS_TOKEN_EXPIRY_SECS)
}

/// Issue a signed refresh token (HS256, 7 day expiry, distinct secret).
pub fn issue_refresh_token(payload: &TokenPayload, secret: &[u8]) -> Result<String, AuthError> {
    issue(payload, secret, REFRESH_TOKEN_EXPIRY_SECS)
}

/// Issue an access + refresh token pair for the same payload.
pub fn issue_token_pair(
    payload: &TokenPayload,
    access_secret: &[u8],
    refresh_secret: &[u8],
) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access_token: issue_access_token(payload, access_secret)?,
        refresh_token: issue_refresh_token(payload, refresh_secret)?,
    })
}

/// Verify an access token, returning the claims on success.
///
/// Fails with [`AuthError::Expired`] when the embedded expiry has elapsed
/// and [`AuthError::InvalidSignature`] for any other verification failure.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    verify(token, secret)
}

/// Verify a refresh token against the refresh secret. Same contract as
/// [`verify_access_token`].
pub fn verify_refresh_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    verify(token, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_SECRET: &[u8] = b"test-access-secret-test-access-secret";
    const REFRESH_SECRET: &[u8] = b"test-refresh-secret-test-refresh-secret";

    fn payload() -> TokenPayload {
        TokenPayload {
            user_id: "11111111-2222-3333-4444-555555555555".into(),
            email: "alice@example.com".into(),
            role: "staff".into(),
        }
    }

    #[test]
    fn access_token_round_trip_preserves_payload() {
        let token = issue_access_token(&payload(), ACCESS_SECRET).expect("issue");
        let claims = verify_access_token(&token, ACCESS_SECRET).expect("verify");
        assert_eq!(claims.sub, payload().user_id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "staff");
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_SECS);
    }

    #[test]
    fn refresh_token_carries_seven_day_expiry() {
        let token = issue_refresh_token(&payload(), REFRESH_SECRET).expect("issue");
        let claims = verify_refresh_token(&token, REFRESH_SECRET).expect("verify");
        assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_EXPIRY_SECS);
    }

    #[test]
    fn secrets_are_not_interchangeable() {
        let pair = issue_token_pair(&payload(), ACCESS_SECRET, REFRESH_SECRET).expect("pair");

        let err = verify_refresh_token(&pair.access_token, REFRESH_SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));

        let err = verify_access_token(&pair.refresh_token, ACCESS_SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn elapsed_expiry_is_reported_as_expired() {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: "u1".into(),
            email: "old@example.com".into(),
            role: "user".into(),
            exp: (now - Duration::hours(1)).timestamp(),
            iat: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(ACCESS_SECRET),
        )
        .expect("encode");

        let err = verify_access_token(&token, ACCESS_SECRET).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn garbage_token_is_invalid_signature() {
        let err = verify_access_token("not-a-jwt", ACCESS_SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }
}
