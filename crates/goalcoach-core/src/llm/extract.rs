//! Response-envelope text extraction.
//!
//! The generative-AI API does not return one fixed envelope: depending on
//! endpoint version and SDK path the text sits under `candidates`, under
//! `output`, or inside a deferred `response` object. Extraction is an ordered
//! list of [`Extractor`]s, each a predicate plus a projector; the first one
//! that matches and projects non-blank text wins. If none does, the raw
//! payload itself is stringified.

use serde_json::Value;

/// One known response shape.
pub struct Extractor {
    pub name: &'static str,
    pub matches: fn(&Value) -> bool,
    pub project: fn(&Value) -> Option<String>,
}

/// Known shapes, in probe order.
pub const EXTRACTORS: &[Extractor] = &[
    Extractor {
        name: "candidates",
        matches: has_candidates,
        project: project_candidates,
    },
    Extractor {
        name: "output",
        matches: has_output,
        project: project_output,
    },
    Extractor {
        name: "deferred_response",
        matches: has_deferred_response,
        project: project_deferred_response,
    },
];

/// Extract response text from a raw payload.
///
/// Returns `None` only when every probe, including the raw-payload
/// stringification, yields blank text.
pub fn extract_text(payload: &Value) -> Option<String> {
    for extractor in EXTRACTORS {
        if !(extractor.matches)(payload) {
            continue;
        }
        if let Some(text) = (extractor.project)(payload).and_then(non_blank) {
            tracing::trace!(shape = extractor.name, "extracted response text");
            return Some(text);
        }
    }

    tracing::debug!("no known response shape matched, using raw payload");
    non_blank(stringify_raw(payload))
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn has_candidates(payload: &Value) -> bool {
    payload
        .get("candidates")
        .and_then(Value::as_array)
        .is_some_and(|c| !c.is_empty())
}

/// `candidates[0].content.parts[*].text`
fn project_candidates(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    Some(text)
}

fn has_output(payload: &Value) -> bool {
    matches!(
        payload.get("output"),
        Some(Value::Array(_)) | Some(Value::String(_))
    )
}

/// `output[*].content[*].text`, `output[*].text`, or a bare `output` string.
fn project_output(payload: &Value) -> Option<String> {
    match payload.get("output")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let mut text = String::new();
            for item in items {
                match item.get("content") {
                    Some(Value::Array(blocks)) => {
                        for block in blocks {
                            if let Some(t) = block.get("text").and_then(Value::as_str) {
                                text.push_str(t);
                            }
                        }
                    }
                    _ => {
                        if let Some(t) = item.get("text").and_then(Value::as_str) {
                            text.push_str(t);
                        }
                    }
                }
            }
            Some(text)
        }
        _ => None,
    }
}

fn has_deferred_response(payload: &Value) -> bool {
    payload.get("response").is_some_and(Value::is_object)
}

/// `response.text`, or a candidates envelope nested under `response`.
fn project_deferred_response(payload: &Value) -> Option<String> {
    let response = payload.get("response")?;
    if let Some(text) = response.get("text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    if has_candidates(response) {
        return project_candidates(response);
    }
    None
}

fn stringify_raw(payload: &Value) -> String {
    match payload {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
