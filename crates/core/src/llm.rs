//! ChatClient trait — the abstraction over chat-completion backends.
//!
//! The pipeline treats the model as a single bounded call: one system
//! persona, one user prompt, text back or a typed failure. No streaming,
//! no tool use, no retries — a failed call degrades immediately.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// One chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The system persona message
    pub system: String,

    /// The user prompt
    pub user: String,

    /// Sampling temperature (low for near-deterministic output)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Hard cap on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    800
}

impl ChatRequest {
    /// Create a request with the default sampling parameters.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// The chat-completion contract consumed by the pipeline.
///
/// Implementations wrap a concrete endpoint (OpenAI-compatible, proxy, test
/// stub). `complete` returns the raw assistant text; an empty or blank body
/// is a valid `Ok` — the caller decides what emptiness means.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// A human-readable name for this client (e.g., "modelscope").
    fn name(&self) -> &str;

    /// Send one non-streaming completion request.
    async fn complete(&self, request: ChatRequest) -> std::result::Result<String, LlmError>;
}
