//! OpenAI-compatible chat client implementation.
//!
//! Works with: ModelScope inference, OpenAI, OpenRouter, Ollama, vLLM, and
//! any other endpoint exposing `/chat/completions`.
//!
//! The client issues exactly one non-streaming completion per call. Extended
//! reasoning is disabled on every request (`enable_thinking: false`) — the
//! pipeline wants a short JSON answer, not a thinking trace.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use techtide_core::error::LlmError;
use techtide_core::llm::{ChatClient, ChatRequest};
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An OpenAI-compatible chat-completion client.
///
/// This covers the vast majority of hosted LLM endpoints since most expose
/// an OpenAI-compatible `/chat/completions` route.
pub struct OpenAiCompatClient {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Create a new OpenAI-compatible client.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::with_timeout(name, base_url, api_key, model, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Create a ModelScope inference client (convenience constructor).
    pub fn modelscope(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(
            "modelscope",
            "https://api-inference.modelscope.cn/v1",
            api_key,
            model,
        )
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatClient for OpenAiCompatClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> std::result::Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "stream": false,
            "enable_thinking": false,
        });

        debug!(client = %self.name, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(e.to_string())
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(LlmError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(LlmError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "LLM endpoint returned error");
            return Err(LlmError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| LlmError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ApiError {
                status_code: 200,
                message: "No choices in response".into(),
            })?;

        // Blank content is a valid response; the pipeline decides what it means.
        Ok(choice.message.content.unwrap_or_default())
    }
}

// --- OpenAI-compatible API types ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let client = OpenAiCompatClient::new(
            "test",
            "https://example.com/v1",
            "sk-test",
            "test-model",
        );
        assert_eq!(client.name(), "test");
        assert_eq!(client.base_url, "https://example.com/v1");
        assert_eq!(client.model(), "test-model");
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let client =
            OpenAiCompatClient::new("test", "https://example.com/v1/", "sk-test", "m");
        assert_eq!(client.base_url, "https://example.com/v1");
    }

    #[test]
    fn modelscope_constructor() {
        let client = OpenAiCompatClient::modelscope("ms-token", "deepseek-ai/DeepSeek-V3.2");
        assert_eq!(client.name(), "modelscope");
        assert!(client.base_url.contains("modelscope"));
    }

    #[test]
    fn parse_completion_response() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{
                "id": "chatcmpl-01",
                "model": "deepseek-ai/DeepSeek-V3.2",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "[{\"index\":1}]"}}
                ],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
            }"#,
        )
        .unwrap();

        assert_eq!(resp.choices.len(), 1);
        assert_eq!(
            resp.choices[0].message.content.as_deref(),
            Some("[{\"index\":1}]")
        );
    }

    #[test]
    fn parse_response_with_null_content() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap();
        assert!(resp.choices[0].message.content.is_none());
    }
}
