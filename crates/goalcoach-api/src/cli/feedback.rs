//! `gcoach feedback`: resolve feedback for one goal from the terminal.

use anyhow::{Context, Result};
use console::style;
use serde_json::Value;

use goalcoach_types::feedback::FeedbackRequest;

use crate::http::response::FeedbackResponse;
use crate::state::AppState;

/// Parse `--context`: inline JSON, or `@path` to a JSON file.
pub async fn parse_context(arg: &str) -> Result<Value> {
    let raw = match arg.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read context file {path}"))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&raw).context("--context is not valid JSON")
}

pub async fn run_feedback(
    state: &AppState,
    goal: String,
    context: Option<&str>,
    api_key: Option<String>,
    user: Option<String>,
    json: bool,
) -> Result<()> {
    let mut request = FeedbackRequest::new(goal);
    request.api_key = api_key;
    request.user_id = user;
    if let Some(arg) = context {
        request.context = Some(parse_context(arg).await?);
    }

    let result = state.resolver.resolve(&request).await?;
    let response = FeedbackResponse::from(result);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let provider = if response.provider == goalcoach_types::feedback::FALLBACK_PROVIDER {
        style(response.provider.as_str()).yellow()
    } else {
        style(response.provider.as_str()).cyan()
    };

    println!();
    println!("  {} Feedback ({})", style("✎").bold(), provider);
    println!();
    for line in response.feedback.lines() {
        println!("  {line}");
    }
    if let Some(note) = &response.error_note {
        println!();
        println!("  {}", style(note).dim());
    }
    println!();

    Ok(())
}
