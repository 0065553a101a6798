//! API server configuration.

use smartslot_core::llm::LlmConfig;
use thiserror::Error;

/// Minimum accepted length for token-signing secrets.
pub const MIN_SECRET_LEN: usize = 32;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("{0} must be at least {MIN_SECRET_LEN} bytes")]
    SecretTooShort(String),

    #[error("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ")]
    SecretsIdentical,
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Secret signing access tokens.
    pub access_token_secret: String,
    /// Secret signing refresh tokens. Must differ from the access secret.
    pub refresh_token_secret: String,
    /// Allowed CORS origins; `*` allows any.
    pub cors_allowed_origins: Vec<String>,
    /// LLM provider settings; `None` leaves the `/ai/*` routes unconfigured.
    pub llm: Option<LlmConfig>,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                 | Default                                    |
    /// |--------------------------|--------------------------------------------|
    /// | `HOST` / `PORT`          | `127.0.0.1` / `8080`                       |
    /// | `DATABASE_URL`           | `postgres://localhost:5432/smartslot`      |
    /// | `ACCESS_TOKEN_SECRET`    | required, ≥ 32 bytes                       |
    /// | `REFRESH_TOKEN_SECRET`   | required, ≥ 32 bytes, ≠ access secret      |
    /// | `CORS_ALLOWED_ORIGINS`   | `*`                                        |
    /// | `LLM_API_URL` / `_KEY` / `LLM_MODEL` | unset → `/ai/*` unconfigured   |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT").unwrap_or_else(|_| "8080".into());

        let access_token_secret = require_secret(
            "ACCESS_TOKEN_SECRET",
            std::env::var("ACCESS_TOKEN_SECRET").ok(),
        )?;
        let refresh_token_secret = require_secret(
            "REFRESH_TOKEN_SECRET",
            std::env::var("REFRESH_TOKEN_SECRET").ok(),
        )?;
        if access_token_secret == refresh_token_secret {
            return Err(ConfigError::SecretsIdentical);
        }

        let llm = std::env::var("LLM_API_URL").ok().map(|api_url| LlmConfig {
            api_url,
            api_key: std::env::var("LLM_API_KEY").ok(),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
        });

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/smartslot".into()),
            access_token_secret,
            refresh_token_secret,
            cors_allowed_origins: parse_origins(
                &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into()),
            ),
            llm,
        })
    }
}

/// Reject missing or too-short signing secrets.
fn require_secret(name: &str, value: Option<String>) -> Result<String, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::Missing(name.to_string()))?;
    if value.len() < MIN_SECRET_LEN {
        return Err(ConfigError::SecretTooShort(name.to_string()));
    }
    Ok(value)
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_is_rejected() {
        assert!(matches!(
            require_secret("ACCESS_TOKEN_SECRET", None),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn short_secret_is_rejected() {
        assert!(matches!(
            require_secret("ACCESS_TOKEN_SECRET", Some("short".into())),
            Err(ConfigError::SecretTooShort(_))
        ));
    }

    #[test]
    fn long_secret_is_accepted() {
        let secret = "0123456789abcdef0123456789abcdef";
        assert_eq!(
            require_secret("ACCESS_TOKEN_SECRET", Some(secret.into())).unwrap(),
            secret
        );
    }

    #[test]
    fn origin_list_is_split_and_trimmed() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example ,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
    }
}
