//! ModelClient trait definition.
//!
//! This is the core abstraction every generative-AI API client implements.
//! One client serves many models on the same API; the model identifier is
//! chosen per call by the [`ModelChain`](super::chain::ModelChain).

use secrecy::SecretString;

use goalcoach_types::llm::{GenerationRequest, LlmError};

/// Trait for generative-AI API backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in goalcoach-infra (e.g., `GeminiClient`).
pub trait ModelClient: Send + Sync {
    /// Human-readable API name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Generate text with `model`, returning the extracted response text.
    ///
    /// Implementations map HTTP status codes to [`LlmError`] variants so the
    /// chain can classify failures without inspecting messages.
    fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
        credential: &SecretString,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
