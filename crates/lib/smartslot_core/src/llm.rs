//! LLM completion client.
//!
//! Posts chat-completion requests to a configured OpenAI-compatible
//! endpoint with retry (max 3 attempts, exponential backoff).

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{Duration, sleep};
use tracing::warn;

const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Errors from the LLM provider boundary.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Response parse error: {0}")]
    Parse(String),
}

/// Connection settings for the completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Full URL of the chat-completions endpoint.
    pub api_url: String,
    /// Bearer token for the provider, if it requires one.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for one configured completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Build a client, validating the endpoint URL up front.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let parsed: url::Url = config
            .api_url
            .parse()
            .map_err(|_| LlmError::Config(format!("invalid LLM endpoint: {}", config.api_url)))?;
        let host = parsed.host_str().unwrap_or("");
        let is_safe = parsed.scheme() == "https"
            || host == "localhost"
            || host == "127.0.0.1"
            || host == "::1";
        if !is_safe {
            return Err(LlmError::Config(
                "LLM endpoint must use HTTPS or localhost".into(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    /// Send one prompt and return the completion text.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error = None;

        for attempt in 0..MAX_RETRY_ATTEMPTS {
            let mut builder = self.client.post(&self.config.api_url).json(&request);
            if let Some(key) = &self.config.api_key {
                builder = builder.header("Authorization", format!("Bearer {key}"));
            }

            match builder.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let data: ChatResponse = resp.json().await.map_err(|e| {
                            LlmError::Provider(format!("completion response parse error: {e}"))
                        })?;
                        return data
                            .choices
                            .into_iter()
                            .next()
                            .map(|c| c.message.content)
                            .ok_or_else(|| {
                                LlmError::Provider("completion returned no choices".into())
                            });
                    }
                    let body = resp.text().await.unwrap_or_else(|_| "<no body>".into());
                    let err = LlmError::Provider(format!("completion failed: {status} {body}"));
                    // Client errors will not improve on retry.
                    if status.is_client_error() {
                        return Err(err);
                    }
                    last_error = Some(err);
                }
                Err(e) => {
                    last_error = Some(LlmError::Provider(format!("completion request failed: {e}")));
                }
            }

            if attempt + 1 < MAX_RETRY_ATTEMPTS {
                let backoff = Duration::from_secs(2u64.pow(attempt + 1));
                warn!(attempt = attempt + 1, "LLM request failed, retrying");
                sleep(backoff).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            LlmError::Provider(format!("completion failed after {MAX_RETRY_ATTEMPTS} attempts"))
        }))
    }
}

/// Extract and deserialize the JSON document from completion text.
///
/// Models often wrap their answer in prose or a code fence; take the span
/// from the first opening brace/bracket to the last closing one.
pub fn parse_json_response<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let trimmed = text.trim();
    let start = trimmed
        .find(['{', '['])
        .ok_or_else(|| LlmError::Parse("no JSON document in completion".into()))?;
    let end = trimmed
        .rfind(['}', ']'])
        .ok_or_else(|| LlmError::Parse("no JSON document in completion".into()))?;
    if end < start {
        return Err(LlmError::Parse("no JSON document in completion".into()));
    }
    serde_json::from_str(&trimmed[start..=end])
        .map_err(|e| LlmError::Parse(format!("completion JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, PartialEq, Debug)]
    struct Doc {
        answer: String,
    }

    #[test]
    fn parses_bare_json() {
        let doc: Doc = parse_json_response(r#"{"answer": "yes"}"#).expect("parse");
        assert_eq!(doc.answer, "yes");
    }

    #[test]
    fn parses_fenced_json() {
        let text = "Here you go:\n```json\n{\"answer\": \"yes\"}\n```\n";
        let doc: Doc = parse_json_response(text).expect("parse");
        assert_eq!(doc.answer, "yes");
    }

    #[test]
    fn rejects_text_without_json() {
        let err = parse_json_response::<Doc>("no structured data here").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn client_rejects_non_https_endpoint() {
        let err = LlmClient::new(LlmConfig {
            api_url: "http://example.com/v1/chat/completions".into(),
            api_key: None,
            model: "m".into(),
        })
        .unwrap_err();
        assert!(matches!(err, LlmError::Config(_)));
    }

    #[test]
    fn client_accepts_localhost_endpoint() {
        assert!(
            LlmClient::new(LlmConfig {
                api_url: "http://localhost:11434/v1/chat/completions".into(),
                api_key: None,
                model: "m".into(),
            })
            .is_ok()
        );
    }
}
