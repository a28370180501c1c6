//! Model-call types for goalcoach.
//!
//! These model the data shapes for one generation attempt against a model
//! endpoint, and the structured error taxonomy the provider chain uses to
//! decide whether to advance to the next model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-neutral generation request sent for each model attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

/// How the chain treats a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The model is unavailable right now; try the next one.
    Transient,
    /// Stop the chain and surface the error.
    Fatal,
    /// The request itself is malformed; no model will accept it.
    InputInvalid,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::Transient => write!(f, "transient"),
            ErrorClass::Fatal => write!(f, "fatal"),
            ErrorClass::InputInvalid => write!(f, "input_invalid"),
        }
    }
}

/// Errors from a model call.
///
/// Variants are decided at the HTTP boundary from the response status, so
/// classification never depends on message text.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("model not found: {model}")]
    ModelNotFound { model: String },

    #[error("request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl LlmError {
    /// Classify this error for the provider chain.
    ///
    /// 503, 404, per-call timeouts and blank responses advance the chain;
    /// 400 and locally rejected requests are input errors; everything else
    /// stops it.
    pub fn class(&self) -> ErrorClass {
        match self {
            LlmError::ServiceUnavailable(_)
            | LlmError::ModelNotFound { .. }
            | LlmError::Timeout { .. }
            | LlmError::EmptyResponse => ErrorClass::Transient,
            LlmError::BadRequest(_) | LlmError::InvalidRequest(_) => ErrorClass::InputInvalid,
            LlmError::AuthenticationFailed
            | LlmError::RateLimited { .. }
            | LlmError::Http { .. }
            | LlmError::Transport(_)
            | LlmError::Deserialization(_) => ErrorClass::Fatal,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.class() == ErrorClass::Transient
    }

    /// Map a non-success HTTP status to an error.
    pub fn from_status(status: u16, model: &str, body: String) -> Self {
        match status {
            400 => LlmError::BadRequest(body),
            401 | 403 => LlmError::AuthenticationFailed,
            404 => LlmError::ModelNotFound {
                model: model.to_string(),
            },
            429 => LlmError::RateLimited {
                retry_after_ms: None,
            },
            503 => LlmError::ServiceUnavailable(body),
            _ => LlmError::Http {
                status,
                message: body,
            },
        }
    }
}

/// Outcome of a single model attempt, recorded by the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainAttempt {
    pub model: String,
    /// `None` on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_class: Option<ErrorClass>,
    pub latency_ms: u64,
}

impl ChainAttempt {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}
