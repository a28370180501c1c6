//! Ordered model resolution chain.
//!
//! Tries each configured model identifier in order against one API client,
//! stopping at the first non-empty response. Transient errors (model
//! unavailable, model not found, per-call timeout, empty response) advance
//! to the next model; every other error stops the chain immediately.
//!
//! No retries within a model and no backoff: the chain is short (3-4
//! models) and each attempt is bounded by its own timeout.

use std::time::{Duration, Instant};

use secrecy::SecretString;
use tracing::{Instrument, info_span};

use goalcoach_types::llm::{ChainAttempt, ErrorClass, GenerationRequest, LlmError};

use super::box_client::BoxModelClient;

/// Result of a successful pass through the chain.
#[derive(Debug)]
pub struct ChainOutcome {
    /// Extracted response text (never blank).
    pub text: String,
    /// Identifier of the model that produced it.
    pub model: String,
    /// Every attempt made, in order, ending with the successful one.
    pub attempts: Vec<ChainAttempt>,
}

/// The chain was exhausted or broken by a non-transient error.
#[derive(Debug, thiserror::Error)]
#[error("{last_error}")]
pub struct ChainFailure {
    /// The error that ended the chain.
    pub last_error: LlmError,
    pub attempts: Vec<ChainAttempt>,
}

/// Routes a generation request through an ordered list of models.
pub struct ModelChain {
    client: BoxModelClient,
    models: Vec<String>,
    per_call_timeout: Duration,
}

impl ModelChain {
    pub fn new(client: BoxModelClient, models: Vec<String>, per_call_timeout: Duration) -> Self {
        Self {
            client,
            models,
            per_call_timeout,
        }
    }

    /// Configured model identifiers, in attempt order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    pub fn per_call_timeout(&self) -> Duration {
        self.per_call_timeout
    }

    /// Send a generation request through the chain.
    ///
    /// Returns the first non-empty text and the model that produced it, or
    /// the last encountered error once the chain is exhausted or broken.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        credential: &SecretString,
    ) -> Result<ChainOutcome, ChainFailure> {
        if self.models.is_empty() {
            return Err(ChainFailure {
                last_error: LlmError::InvalidRequest("no models configured".to_string()),
                attempts: Vec::new(),
            });
        }

        let mut attempts = Vec::with_capacity(self.models.len());
        let mut last_error: Option<LlmError> = None;

        for model in &self.models {
            let span = info_span!(
                "gen_ai.generate",
                gen_ai.system = self.client.name(),
                gen_ai.request.model = %model,
                gen_ai.request.max_tokens = request.max_output_tokens,
                gen_ai.request.temperature = request.temperature,
            );

            let start = Instant::now();
            let result = self
                .attempt(model, request, credential)
                .instrument(span)
                .await;
            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(text) => {
                    tracing::info!(model = %model, latency_ms, "model attempt succeeded");
                    attempts.push(ChainAttempt {
                        model: model.clone(),
                        error: None,
                        error_class: None,
                        latency_ms,
                    });
                    return Ok(ChainOutcome {
                        text,
                        model: model.clone(),
                        attempts,
                    });
                }
                Err(err) => {
                    let class = err.class();
                    attempts.push(ChainAttempt {
                        model: model.clone(),
                        error: Some(err.to_string()),
                        error_class: Some(class),
                        latency_ms,
                    });

                    if class != ErrorClass::Transient {
                        tracing::error!(
                            model = %model,
                            error = %err,
                            class = %class,
                            "non-transient model error, stopping chain"
                        );
                        return Err(ChainFailure {
                            last_error: err,
                            attempts,
                        });
                    }

                    tracing::warn!(
                        model = %model,
                        error = %err,
                        latency_ms,
                        "model unavailable, trying next in chain"
                    );
                    last_error = Some(err);
                }
            }
        }

        Err(ChainFailure {
            last_error: last_error.unwrap_or_else(|| {
                LlmError::InvalidRequest("no models configured".to_string())
            }),
            attempts,
        })
    }

    /// One bounded call. Elapsed timeouts and blank text become transient errors.
    async fn attempt(
        &self,
        model: &str,
        request: &GenerationRequest,
        credential: &SecretString,
    ) -> Result<String, LlmError> {
        let call = self.client.generate(model, request, credential);
        match tokio::time::timeout(self.per_call_timeout, call).await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(LlmError::EmptyResponse),
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(LlmError::Timeout {
                after_ms: self.per_call_timeout.as_millis() as u64,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::ModelClient;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Mock client ---

    #[derive(Clone)]
    enum Behavior {
        Reply(&'static str),
        Status(u16),
        Transport,
        Hang,
    }

    struct MockClient {
        behaviors: HashMap<String, Behavior>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockClient {
        fn new(behaviors: &[(&str, Behavior)]) -> (Self, Arc<Mutex<Vec<String>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let client = Self {
                behaviors: behaviors
                    .iter()
                    .map(|(m, b)| (m.to_string(), b.clone()))
                    .collect(),
                calls: Arc::clone(&calls),
            };
            (client, calls)
        }
    }

    impl ModelClient for MockClient {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(
            &self,
            model: &str,
            _request: &GenerationRequest,
            _credential: &SecretString,
        ) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(model.to_string());
            let behavior = self
                .behaviors
                .get(model)
                .cloned()
                .unwrap_or(Behavior::Status(404));
            match behavior {
                Behavior::Reply(text) => Ok(text.to_string()),
                Behavior::Status(status) => {
                    Err(LlmError::from_status(status, model, format!("status {status}")))
                }
                Behavior::Transport => Err(LlmError::Transport("connection refused".to_string())),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn chain_with(behaviors: &[(&str, Behavior)]) -> (ModelChain, Arc<Mutex<Vec<String>>>) {
        let (client, calls) = MockClient::new(behaviors);
        let models = behaviors.iter().map(|(m, _)| m.to_string()).collect();
        let chain = ModelChain::new(BoxModelClient::new(client), models, Duration::from_secs(15));
        (chain, calls)
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "Give feedback".to_string(),
            temperature: 0.7,
            max_output_tokens: 400,
        }
    }

    fn key() -> SecretString {
        SecretString::from("test-key-not-real")
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_first_model_success_short_circuits() {
        let (chain, calls) = chain_with(&[
            ("primary", Behavior::Reply("Primary feedback")),
            ("secondary", Behavior::Reply("Secondary feedback")),
        ]);

        let outcome = chain.generate(&request(), &key()).await.unwrap();

        assert_eq!(outcome.model, "primary");
        assert_eq!(outcome.text, "Primary feedback");
        assert_eq!(outcome.attempts.len(), 1);
        assert_eq!(*calls.lock().unwrap(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_unavailable_and_not_found_advance() {
        let (chain, calls) = chain_with(&[
            ("a", Behavior::Status(503)),
            ("b", Behavior::Status(404)),
            ("c", Behavior::Reply("Third time lucky")),
        ]);

        let outcome = chain.generate(&request(), &key()).await.unwrap();

        assert_eq!(outcome.model, "c");
        assert_eq!(outcome.attempts.len(), 3);
        assert!(!outcome.attempts[0].succeeded());
        assert_eq!(outcome.attempts[0].error_class, Some(ErrorClass::Transient));
        assert!(outcome.attempts[2].succeeded());
        assert_eq!(*calls.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_fatal_error_stops_chain() {
        let (chain, calls) = chain_with(&[
            ("a", Behavior::Status(500)),
            ("b", Behavior::Reply("never reached")),
        ]);

        let failure = chain.generate(&request(), &key()).await.unwrap_err();

        assert!(matches!(
            failure.last_error,
            LlmError::Http { status: 500, .. }
        ));
        assert_eq!(*calls.lock().unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_auth_error_stops_chain() {
        let (chain, calls) = chain_with(&[
            ("a", Behavior::Status(401)),
            ("b", Behavior::Reply("never reached")),
        ]);

        let failure = chain.generate(&request(), &key()).await.unwrap_err();

        assert!(matches!(failure.last_error, LlmError::AuthenticationFailed));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_request_is_input_invalid_and_stops() {
        let (chain, calls) = chain_with(&[
            ("a", Behavior::Status(400)),
            ("b", Behavior::Reply("never reached")),
        ]);

        let failure = chain.generate(&request(), &key()).await.unwrap_err();

        assert_eq!(failure.last_error.class(), ErrorClass::InputInvalid);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_stops_chain() {
        let (chain, _calls) = chain_with(&[
            ("a", Behavior::Transport),
            ("b", Behavior::Reply("never reached")),
        ]);

        let failure = chain.generate(&request(), &key()).await.unwrap_err();
        assert!(matches!(failure.last_error, LlmError::Transport(_)));
        assert_eq!(failure.attempts.len(), 1);
    }

    #[tokio::test]
    async fn test_all_unavailable_returns_last_error() {
        let (chain, calls) = chain_with(&[
            ("a", Behavior::Status(503)),
            ("b", Behavior::Status(503)),
            ("c", Behavior::Status(404)),
        ]);

        let failure = chain.generate(&request(), &key()).await.unwrap_err();

        assert!(
            matches!(failure.last_error, LlmError::ModelNotFound { ref model } if model == "c"),
            "expected last model's error, got: {}",
            failure.last_error
        );
        assert_eq!(failure.attempts.len(), 3);
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_reply_counts_as_empty_and_advances() {
        let (chain, _calls) = chain_with(&[
            ("a", Behavior::Reply("   ")),
            ("b", Behavior::Reply("Real feedback")),
        ]);

        let outcome = chain.generate(&request(), &key()).await.unwrap();

        assert_eq!(outcome.model, "b");
        assert_eq!(
            outcome.attempts[0].error.as_deref(),
            Some("model returned an empty response")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_advances_to_next_model() {
        let (chain, calls) = chain_with(&[
            ("slow", Behavior::Hang),
            ("fast", Behavior::Reply("On time")),
        ]);

        let outcome = chain.generate(&request(), &key()).await.unwrap();

        assert_eq!(outcome.model, "fast");
        assert_eq!(
            outcome.attempts[0].error.as_deref(),
            Some("request timed out after 15000ms")
        );
        assert_eq!(*calls.lock().unwrap(), vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_empty_model_list_is_invalid_request() {
        let (client, calls) = MockClient::new(&[]);
        let chain = ModelChain::new(BoxModelClient::new(client), Vec::new(), Duration::from_secs(15));

        let failure = chain.generate(&request(), &key()).await.unwrap_err();

        assert_eq!(failure.last_error.class(), ErrorClass::InputInvalid);
        assert!(failure.attempts.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }
}
