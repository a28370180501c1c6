//! Curriculum context formatter.
//!
//! Turns the loosely-typed context payload into the bullet block embedded in
//! the prompt. Never fails: anything unusable becomes the placeholder line.

use serde_json::Value;

use goalcoach_types::context::CurriculumContext;

/// Emitted when there is no usable context.
pub const NO_CONTEXT_PLACEHOLDER: &str = "No additional context provided.";

/// Format a raw context payload (JSON object or JSON-encoded string).
pub fn format_context(raw: Option<&Value>) -> String {
    match raw.and_then(CurriculumContext::from_value) {
        Some(ctx) => format_curriculum(&ctx),
        None => NO_CONTEXT_PLACEHOLDER.to_string(),
    }
}

/// Bullets in fixed order: phase, topic, description, key tags, deliverable.
pub fn format_curriculum(ctx: &CurriculumContext) -> String {
    let mut bullets = Vec::with_capacity(5);

    if let Some(phase) = &ctx.phase {
        bullets.push(format!("- Phase: {phase}"));
    }
    if let Some(topic) = &ctx.topic {
        bullets.push(format!("- Topic: {topic}"));
    }
    if let Some(description) = &ctx.description {
        bullets.push(format!("- Description: {description}"));
    }
    if !ctx.key_tags.is_empty() {
        bullets.push(format!("- Key tags: {}", ctx.key_tags.join(", ")));
    }
    if let Some(deliverable) = &ctx.deliverable {
        bullets.push(format!("- Deliverable: {deliverable}"));
    }

    if bullets.is_empty() {
        NO_CONTEXT_PLACEHOLDER.to_string()
    } else {
        bullets.join("\n")
    }
}
