//! Model client implementations.
//!
//! [`build_model_chain`] assembles the configured chain: one Gemini client
//! shared across every model identifier in `config.models`.

pub mod gemini;

use std::time::Duration;

use goalcoach_core::llm::box_client::BoxModelClient;
use goalcoach_core::llm::chain::ModelChain;
use goalcoach_types::config::FeedbackConfig;
use goalcoach_types::llm::LlmError;

use self::gemini::GeminiClient;

/// Build the model chain described by `config`.
pub fn build_model_chain(config: &FeedbackConfig) -> Result<ModelChain, LlmError> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let client = GeminiClient::new(&config.base_url, config.auth_style, timeout)?;

    tracing::debug!(
        models = ?config.models,
        auth_style = %config.auth_style,
        timeout_secs = config.request_timeout_secs,
        "model chain configured"
    );

    Ok(ModelChain::new(
        BoxModelClient::new(client),
        config.models.clone(),
        timeout,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_model_chain_from_defaults() {
        let chain = build_model_chain(&FeedbackConfig::default()).unwrap();
        assert_eq!(chain.client_name(), "gemini");
        assert_eq!(chain.models()[0], "gemini-2.5-flash");
        assert_eq!(chain.per_call_timeout(), Duration::from_secs(15));
    }
}
