//! Configuration types for goalcoach.
//!
//! `FeedbackConfig` represents the top-level `config.toml` that controls the
//! model chain, generation parameters, credential sourcing, and the HTTP
//! listener. All fields have sensible defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the credential is attached to outbound model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStyle {
    /// `?key=<credential>` on the request URL.
    QueryParam,
    /// `Authorization: Bearer <credential>` header.
    Bearer,
}

impl fmt::Display for AuthStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStyle::QueryParam => write!(f, "query_param"),
            AuthStyle::Bearer => write!(f, "bearer"),
        }
    }
}

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Model identifiers, tried in order.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Base URL of the generative-AI API (without `/models/...`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_auth_style")]
    pub auth_style: AuthStyle,

    /// Per-call timeout for each model attempt.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Environment variable holding the process-wide default credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Reject requests for a `userId` with no resolvable credential instead
    /// of falling back.
    #[serde(default)]
    pub strict_user_credentials: bool,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-1.5-flash".to_string(),
    ]
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_auth_style() -> AuthStyle {
    AuthStyle::QueryParam
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    400
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            base_url: default_base_url(),
            auth_style: default_auth_style(),
            request_timeout_secs: default_request_timeout_secs(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            api_key_env: default_api_key_env(),
            strict_user_credentials: false,
            server: ServerConfig::default(),
        }
    }
}

/// HTTP listener settings for `gcoach serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
