//! Configuration loader for goalcoach.
//!
//! Reads `config.toml` and deserializes it into [`FeedbackConfig`]. Falls
//! back to defaults when the file is missing or malformed so the service
//! always starts.

use std::path::Path;

use goalcoach_types::config::FeedbackConfig;

/// Load configuration from `path`.
///
/// - Missing file: [`FeedbackConfig::default()`].
/// - Unreadable or unparsable file: logs a warning, returns the default.
/// - An empty `models` list is replaced by the default chain.
pub async fn load_config(path: &Path) -> FeedbackConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return FeedbackConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return FeedbackConfig::default();
        }
    };

    let mut config = match toml::from_str::<FeedbackConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            return FeedbackConfig::default();
        }
    };

    config.models.retain(|m| !m.trim().is_empty());
    if config.models.is_empty() {
        tracing::warn!("{} lists no models, using the default chain", path.display());
        config.models = FeedbackConfig::default().models;
    }

    config
}
