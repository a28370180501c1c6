//! Goal-feedback request/result types.
//!
//! Both shapes are request-scoped: created per call, consumed by the caller,
//! never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Provider label used when the rule-based generator produced the text.
pub const FALLBACK_PROVIDER: &str = "fallback";

/// Note attached to a fallback result when every model attempt failed.
pub const PROVIDER_UNAVAILABLE_NOTE: &str = "AI service temporarily unavailable";

/// A request for feedback on one student goal.
///
/// Field names follow the dashboard's JSON contract (`goalText`, `apiKey`,
/// `userId`, `context`). `goal_text` reads as empty when omitted, null or not
/// a string, so the resolver, not the deserializer, reports a missing goal.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default, deserialize_with = "lenient_goal")]
    pub goal_text: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Curriculum context: a JSON object or a JSON-encoded string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl FeedbackRequest {
    pub fn new(goal_text: impl Into<String>) -> Self {
        Self {
            goal_text: goal_text.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    /// True when the goal is absent or whitespace only.
    pub fn is_goal_missing(&self) -> bool {
        self.goal_text.trim().is_empty()
    }
}

fn lenient_goal<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        _ => String::new(),
    })
}

// The API key never reaches Debug output.
impl fmt::Debug for FeedbackRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackRequest")
            .field("goal_text", &self.goal_text)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .field("context", &self.context)
            .finish()
    }
}

/// Which generator produced the feedback text.
///
/// Serializes as the bare model identifier, or as `"fallback"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedbackProvider {
    /// A model on the generative-AI API, by identifier.
    Model(String),
    /// The deterministic rule-based generator.
    Fallback,
}

impl FeedbackProvider {
    pub fn is_fallback(&self) -> bool {
        matches!(self, FeedbackProvider::Fallback)
    }
}

impl fmt::Display for FeedbackProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackProvider::Model(model) => write!(f, "{model}"),
            FeedbackProvider::Fallback => write!(f, "{FALLBACK_PROVIDER}"),
        }
    }
}

impl From<String> for FeedbackProvider {
    fn from(s: String) -> Self {
        if s == FALLBACK_PROVIDER {
            FeedbackProvider::Fallback
        } else {
            FeedbackProvider::Model(s)
        }
    }
}

impl From<FeedbackProvider> for String {
    fn from(p: FeedbackProvider) -> Self {
        p.to_string()
    }
}

/// The resolved feedback for one request.
///
/// `feedback_text` is never empty: the rule-based generator backs every path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResult {
    pub feedback_text: String,
    pub provider: FeedbackProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_note: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl FeedbackResult {
    /// Result produced by a model.
    pub fn from_model(feedback_text: String, model: impl Into<String>) -> Self {
        Self {
            feedback_text,
            provider: FeedbackProvider::Model(model.into()),
            error_note: None,
            generated_at: Utc::now(),
        }
    }

    /// Result produced by the rule-based generator.
    pub fn fallback(feedback_text: String, error_note: Option<String>) -> Self {
        Self {
            feedback_text,
            provider: FeedbackProvider::Fallback,
            error_note,
            generated_at: Utc::now(),
        }
    }
}
