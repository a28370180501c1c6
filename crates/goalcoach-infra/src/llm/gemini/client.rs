//! GeminiClient -- concrete [`ModelClient`] for the Gemini REST API.
//!
//! Sends `POST {base_url}/models/{model}:generateContent`. The credential is
//! passed per call (it is resolved per request), attached either as the
//! `key` query parameter or as a bearer token, and never logged.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use goalcoach_core::llm::client::ModelClient;
use goalcoach_core::llm::extract::extract_text;
use goalcoach_types::config::AuthStyle;
use goalcoach_types::llm::{GenerationRequest, LlmError};

use super::types::GeminiRequest;

/// Gemini client. One instance serves every model in the chain.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    auth_style: AuthStyle,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(base_url: &str, auth_style: AuthStyle, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_style,
            timeout,
        })
    }

    /// `{base_url}/models/{model}:generateContent`
    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout {
                after_ms: self.timeout.as_millis() as u64,
            }
        } else {
            // without_url keeps a query-param credential out of the message
            LlmError::Transport(err.without_url().to_string())
        }
    }
}

impl ModelClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
        credential: &SecretString,
    ) -> Result<String, LlmError> {
        let body = GeminiRequest::from(request);

        let builder = self.client.post(self.endpoint(model)).json(&body);
        let builder = match self.auth_style {
            AuthStyle::QueryParam => builder.query(&[("key", credential.expose_secret())]),
            AuthStyle::Bearer => builder.bearer_auth(credential.expose_secret()),
        };

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::debug!(model, status = status.as_u16(), "model call returned error status");
            return Err(LlmError::from_status(status.as_u16(), model, error_body));
        }

        let payload: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_error(e)
            } else {
                LlmError::Deserialization(format!("failed to parse response: {}", e.without_url()))
            }
        })?;

        extract_text(&payload).ok_or(LlmError::EmptyResponse)
    }
}
