//! Chat-completion client implementations for techtide.
//!
//! All clients implement the `techtide_core::ChatClient` trait. The factory
//! below is the only place that decides whether the model is usable at all —
//! downstream code holds an `Option<Arc<dyn ChatClient>>` and never inspects
//! credentials itself.

use std::sync::Arc;
use std::time::Duration;

use techtide_config::LlmConfig;
use techtide_core::ChatClient;

pub mod openai_compat;

pub use openai_compat::OpenAiCompatClient;

/// Build a chat client from configuration.
///
/// Returns `None` when the credential is absent, blank, or the shipped
/// placeholder — the recommendation pipeline then runs on its degraded path
/// with zero network I/O.
pub fn client_from_config(config: &LlmConfig) -> Option<Arc<dyn ChatClient>> {
    if !config.is_configured() {
        tracing::warn!("LLM credential absent or placeholder; running without the model");
        return None;
    }
    let api_key = config.api_key.clone()?;
    Some(Arc::new(OpenAiCompatClient::with_timeout(
        "openai-compat",
        &config.base_url,
        api_key,
        &config.model,
        Duration::from_secs(config.timeout_secs),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_yields_no_client() {
        let config = LlmConfig::default();
        assert!(client_from_config(&config).is_none());
    }

    #[test]
    fn configured_yields_client() {
        let config = LlmConfig {
            api_key: Some("ms-0123456789".into()),
            ..LlmConfig::default()
        };
        let client = client_from_config(&config).expect("client");
        assert_eq!(client.name(), "openai-compat");
    }
}
