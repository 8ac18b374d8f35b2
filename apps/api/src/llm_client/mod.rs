//! LLM client: the single point of entry for all text-generation API calls in Jobwise.
//!
//! No other module talks to the remote API directly. Services depend on the
//! [`TextGenerator`] trait so they can be exercised without the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Anything that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the model's text reply. An empty string means the model produced no text.
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub max_retries: u32,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API. One request per prompt; 429 and 5xx responses are
/// retried with exponential backoff only when `max_retries > 0`. Transport errors are not.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Makes a raw call to the messages endpoint, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: &self.settings.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let attempts = self.settings.max_retries + 1;
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(6)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            // Transport failures, timeouts included, are returned without retrying.
            let response = self
                .client
                .post(&self.settings.api_url)
                .header("x-api-key", &self.settings.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await?;

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(if status.as_u16() == 429 {
                    LlmError::RateLimited {
                        retries: self.settings.max_retries,
                    }
                } else {
                    LlmError::Api {
                        status: status.as_u16(),
                        message: body,
                    }
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let llm_response: LlmResponse =
                serde_json::from_str(&body).map_err(|e| LlmError::Malformed(e.to_string()))?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.settings.max_retries,
        }))
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        Ok(response.text().unwrap_or_default().to_string())
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, max_retries: u32) -> LlmClient {
        LlmClient::new(LlmSettings {
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            api_url: format!("{}/v1/messages", server.uri()),
            max_retries,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn text_reply(text: &str) -> serde_json::Value {
        json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 12, "output_tokens": 34}
        })
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        let input = "```json\n{\"key\": 1}";
        assert_eq!(strip_json_fences(input), "{\"key\": 1}");
    }

    #[tokio::test]
    async fn test_generate_returns_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Hello there")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server, 0)
            .generate("prompt", "system")
            .await
            .unwrap();
        assert_eq!(text, "Hello there");
    }

    #[tokio::test]
    async fn test_generate_without_text_block_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [],
                "usage": {"input_tokens": 1, "output_tokens": 0}
            })))
            .mount(&server)
            .await;

        let text = client_for(&server, 0)
            .generate("prompt", "system")
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_success_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, 0)
            .generate("prompt", "system")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_reply("too late"))
                    .set_delay(Duration::from_secs(2)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new(LlmSettings {
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            api_url: format!("{}/v1/messages", server.uri()),
            max_retries: 3,
            timeout: Duration::from_millis(200),
        })
        .unwrap();

        let err = client.generate("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_client_error_surfaces_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server, 3)
            .generate("prompt", "system")
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid x-api-key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_without_retries_is_single_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server, 0)
            .generate("prompt", "system")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_retried_when_enabled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("recovered")))
            .mount(&server)
            .await;

        let text = client_for(&server, 1)
            .generate("prompt", "system")
            .await
            .unwrap();
        assert_eq!(text, "recovered");
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client_for(&server, 0)
            .generate("prompt", "system")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::RateLimited { retries: 0 }));
    }
}
