//! Feedback resolver -- the orchestrator.
//!
//! `Received -> ValidatingInput -> {Rejected | CheckingCredential}
//!  -> {FallbackImmediate | AttemptingProviders}
//!  -> {ProviderSucceeded | AllProvidersFailed -> Fallback} -> Returned`
//!
//! Every path terminates. Only caller misuse (missing goal, or a user with
//! no credential in strict mode) is returned as an error; provider failures
//! are absorbed by the rule-based generator.

use goalcoach_types::error::FeedbackError;
use goalcoach_types::feedback::{FeedbackRequest, FeedbackResult, PROVIDER_UNAVAILABLE_NOTE};
use goalcoach_types::llm::GenerationRequest;

use crate::credential::CredentialResolver;
use crate::llm::chain::ModelChain;

use super::context::format_context;
use super::prompt::build_feedback_prompt;
use super::rules::rule_based_feedback;

/// Generation parameters sent with every model attempt.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 400,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// Reject a request that names a `userId` when no credential resolves,
    /// instead of falling back.
    pub strict_user_credentials: bool,
}

/// Resolves a [`FeedbackRequest`] into a [`FeedbackResult`].
///
/// Stateless across requests; share it behind an `Arc`.
pub struct FeedbackResolver {
    chain: ModelChain,
    credentials: CredentialResolver,
    generation: GenerationSettings,
    options: ResolverOptions,
}

impl FeedbackResolver {
    pub fn new(
        chain: ModelChain,
        credentials: CredentialResolver,
        generation: GenerationSettings,
        options: ResolverOptions,
    ) -> Self {
        Self {
            chain,
            credentials,
            generation,
            options,
        }
    }

    pub fn chain(&self) -> &ModelChain {
        &self.chain
    }

    pub fn credentials(&self) -> &CredentialResolver {
        &self.credentials
    }

    pub fn generation(&self) -> &GenerationSettings {
        &self.generation
    }

    /// Resolve feedback for one goal.
    pub async fn resolve(&self, request: &FeedbackRequest) -> Result<FeedbackResult, FeedbackError> {
        if request.is_goal_missing() {
            tracing::debug!("rejecting feedback request without goal text");
            return Err(FeedbackError::MissingInput);
        }
        let goal_text = request.goal_text.trim();

        let credential = self
            .credentials
            .resolve(request.api_key.as_deref(), request.user_id.as_deref())
            .await;

        let Some(credential) = credential else {
            if let (true, Some(user_id)) =
                (self.options.strict_user_credentials, request.user_id.as_deref())
            {
                tracing::info!(user_id, "no credential for user, rejecting");
                return Err(FeedbackError::NoCredentialAvailable {
                    user_id: user_id.to_string(),
                });
            }
            tracing::info!("no credential available, using rule-based feedback");
            return Ok(FeedbackResult::fallback(rule_based_feedback(goal_text), None));
        };

        tracing::debug!(source = %credential.source, "credential resolved");

        let context_block = format_context(request.context.as_ref());
        let generation = GenerationRequest {
            prompt: build_feedback_prompt(goal_text, &context_block),
            temperature: self.generation.temperature,
            max_output_tokens: self.generation.max_output_tokens,
        };

        match self.chain.generate(&generation, &credential.secret).await {
            Ok(outcome) => {
                tracing::info!(
                    model = %outcome.model,
                    attempts = outcome.attempts.len(),
                    "feedback generated by model"
                );
                Ok(FeedbackResult::from_model(outcome.text, outcome.model))
            }
            Err(failure) => {
                tracing::warn!(
                    error = %failure.last_error,
                    class = %failure.last_error.class(),
                    attempts = failure.attempts.len(),
                    "all model attempts failed, using rule-based feedback"
                );
                Ok(FeedbackResult::fallback(
                    rule_based_feedback(goal_text),
                    Some(PROVIDER_UNAVAILABLE_NOTE.to_string()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::rules::{ACTION_SUGGESTION, GUIDING_QUESTIONS, MEASURABLE_SUGGESTION};
    use crate::llm::box_client::BoxModelClient;
    use crate::llm::client::ModelClient;
    use goalcoach_types::feedback::FeedbackProvider;
    use goalcoach_types::llm::LlmError;
    use secrecy::{ExposeSecret, SecretString};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct Recorded {
        models: Vec<String>,
        prompts: Vec<String>,
        credentials: Vec<String>,
    }

    struct MockClient {
        replies: HashMap<String, Result<&'static str, u16>>,
        recorded: Arc<Mutex<Recorded>>,
    }

    impl ModelClient for MockClient {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(
            &self,
            model: &str,
            request: &GenerationRequest,
            credential: &SecretString,
        ) -> Result<String, LlmError> {
            {
                let mut rec = self.recorded.lock().unwrap();
                rec.models.push(model.to_string());
                rec.prompts.push(request.prompt.clone());
                rec.credentials.push(credential.expose_secret().to_string());
            }
            match self.replies.get(model) {
                Some(Ok(text)) => Ok(text.to_string()),
                Some(Err(status)) => Err(LlmError::from_status(*status, model, String::new())),
                None => Err(LlmError::from_status(404, model, String::new())),
            }
        }
    }

    fn resolver_with(
        replies: &[(&str, Result<&'static str, u16>)],
        default_key: Option<&str>,
        options: ResolverOptions,
    ) -> (FeedbackResolver, Arc<Mutex<Recorded>>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let client = MockClient {
            replies: replies.iter().map(|(m, r)| (m.to_string(), *r)).collect(),
            recorded: Arc::clone(&recorded),
        };
        let models = replies.iter().map(|(m, _)| m.to_string()).collect();
        let chain = ModelChain::new(BoxModelClient::new(client), models, Duration::from_secs(15));
        let credentials =
            CredentialResolver::new(default_key.map(|k| SecretString::from(k.to_string())), None);
        let resolver =
            FeedbackResolver::new(chain, credentials, GenerationSettings::default(), options);
        (resolver, recorded)
    }

    fn two_models() -> Vec<(&'static str, Result<&'static str, u16>)> {
        vec![
            ("model-a", Ok("Feedback from A")),
            ("model-b", Ok("Feedback from B")),
        ]
    }

    #[tokio::test]
    async fn test_missing_goal_rejected_without_calls() {
        let (resolver, recorded) = resolver_with(&two_models(), Some("key"), Default::default());

        for goal in ["", "   "] {
            let err = resolver.resolve(&FeedbackRequest::new(goal)).await.unwrap_err();
            assert!(matches!(err, FeedbackError::MissingInput));
        }
        assert!(recorded.lock().unwrap().models.is_empty());
    }

    #[tokio::test]
    async fn test_no_credential_falls_back_without_calls() {
        let (resolver, recorded) = resolver_with(&two_models(), None, Default::default());

        let result = resolver.resolve(&FeedbackRequest::new("do stuff")).await.unwrap();

        assert_eq!(result.provider, FeedbackProvider::Fallback);
        assert!(result.error_note.is_none());
        let parts: Vec<&str> = result.feedback_text.split("\n\n").collect();
        assert_eq!(parts[0], ACTION_SUGGESTION);
        assert_eq!(parts[1], MEASURABLE_SUGGESTION);
        assert_eq!(&parts[2..], &GUIDING_QUESTIONS);
        assert!(recorded.lock().unwrap().models.is_empty());
    }

    #[tokio::test]
    async fn test_specific_goal_without_credential_has_no_advisories() {
        let (resolver, _) = resolver_with(&two_models(), None, Default::default());

        let result = resolver
            .resolve(&FeedbackRequest::new("Build a 3-page portfolio site by 6 PM"))
            .await
            .unwrap();

        assert!(result.provider.is_fallback());
        assert_eq!(
            result.feedback_text.split("\n\n").collect::<Vec<_>>(),
            GUIDING_QUESTIONS.to_vec()
        );
    }

    #[tokio::test]
    async fn test_first_model_success_is_attributed() {
        let (resolver, recorded) = resolver_with(&two_models(), Some("key"), Default::default());

        let result = resolver
            .resolve(&FeedbackRequest::new("Finish the flexbox lab"))
            .await
            .unwrap();

        assert_eq!(result.provider, FeedbackProvider::Model("model-a".to_string()));
        assert_eq!(result.feedback_text, "Feedback from A");
        assert!(result.error_note.is_none());
        assert_eq!(recorded.lock().unwrap().models, vec!["model-a"]);
    }

    #[tokio::test]
    async fn test_transient_failure_attributes_second_model() {
        let (resolver, _) = resolver_with(
            &[("model-a", Err(503)), ("model-b", Ok("Feedback from B"))],
            Some("key"),
            Default::default(),
        );

        let result = resolver.resolve(&FeedbackRequest::new("read")).await.unwrap();
        assert_eq!(result.provider, FeedbackProvider::Model("model-b".to_string()));
    }

    #[tokio::test]
    async fn test_all_unavailable_falls_back_with_note() {
        let (resolver, recorded) = resolver_with(
            &[("a", Err(503)), ("b", Err(503)), ("c", Err(503))],
            Some("key"),
            Default::default(),
        );

        let result = resolver.resolve(&FeedbackRequest::new("do stuff")).await.unwrap();

        assert!(result.provider.is_fallback());
        assert_eq!(result.error_note.as_deref(), Some(PROVIDER_UNAVAILABLE_NOTE));
        assert!(!result.feedback_text.is_empty());
        assert_eq!(recorded.lock().unwrap().models.len(), 3);
    }

    #[tokio::test]
    async fn test_fatal_failure_falls_back_immediately() {
        let (resolver, recorded) = resolver_with(
            &[("a", Err(500)), ("b", Ok("never"))],
            Some("key"),
            Default::default(),
        );

        let result = resolver.resolve(&FeedbackRequest::new("do stuff")).await.unwrap();

        assert!(result.provider.is_fallback());
        assert!(result.error_note.is_some());
        assert_eq!(recorded.lock().unwrap().models, vec!["a"]);
    }

    #[tokio::test]
    async fn test_explicit_key_and_context_reach_the_client() {
        let (resolver, recorded) = resolver_with(&two_models(), Some("default"), Default::default());

        let request = FeedbackRequest::new("Create a todo app")
            .with_api_key("request-key")
            .with_context(json!({"topic": "React state"}));
        resolver.resolve(&request).await.unwrap();

        let rec = recorded.lock().unwrap();
        assert_eq!(rec.credentials, vec!["request-key"]);
        assert!(rec.prompts[0].contains("Create a todo app"));
        assert!(rec.prompts[0].contains("- Topic: React state"));
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_user_without_credential() {
        let options = ResolverOptions {
            strict_user_credentials: true,
        };
        let (resolver, recorded) = resolver_with(&two_models(), None, options);

        let err = resolver
            .resolve(&FeedbackRequest::new("read").with_user_id("stu-9"))
            .await
            .unwrap_err();

        assert!(matches!(err, FeedbackError::NoCredentialAvailable { ref user_id } if user_id == "stu-9"));
        assert!(recorded.lock().unwrap().models.is_empty());
    }

    #[tokio::test]
    async fn test_strict_mode_without_user_still_falls_back() {
        let options = ResolverOptions {
            strict_user_credentials: true,
        };
        let (resolver, _) = resolver_with(&two_models(), None, options);

        let result = resolver.resolve(&FeedbackRequest::new("read")).await.unwrap();
        assert!(result.provider.is_fallback());
    }

    #[tokio::test]
    async fn test_feedback_never_empty_for_non_empty_goals() {
        let (resolver, _) = resolver_with(&[("a", Err(404))], Some("key"), Default::default());

        for goal in ["x", "Learn", "finish 3 pages", "🙂"] {
            let result = resolver.resolve(&FeedbackRequest::new(goal)).await.unwrap();
            assert!(!result.feedback_text.trim().is_empty(), "goal {goal:?}");
        }
    }
}
