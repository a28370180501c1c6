//! Curriculum context attached to a goal.
//!
//! The dashboard sends context loosely typed: either a JSON object or a
//! JSON-encoded string of one, with any subset of the known fields. Parsing
//! is lenient -- unknown fields are ignored and scalar values of the wrong
//! JSON type are stringified rather than rejected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Curriculum metadata for the student's current learning stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumContext {
    #[serde(default, deserialize_with = "lenient_text")]
    pub phase: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    /// Accepts a single string or a list of strings.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub key_tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub deliverable: Option<String>,
}

impl CurriculumContext {
    /// Read a context from a raw payload.
    ///
    /// A JSON string is decoded first. Returns `None` when the payload is not
    /// (or does not decode to) a JSON object.
    pub fn from_value(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(encoded) => {
                let decoded: Value = serde_json::from_str(encoded).ok()?;
                match decoded {
                    Value::Object(_) => serde_json::from_value(decoded).ok(),
                    _ => None,
                }
            }
            Value::Object(_) => serde_json::from_value(raw.clone()).ok(),
            _ => None,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(&other).into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_object() {
        let ctx = CurriculumContext::from_value(&json!({
            "phase": "Foundations",
            "topic": "Flexbox",
            "keyTags": ["css", "layout"],
        }))
        .unwrap();
        assert_eq!(ctx.phase.as_deref(), Some("Foundations"));
        assert_eq!(ctx.topic.as_deref(), Some("Flexbox"));
        assert_eq!(ctx.key_tags, vec!["css", "layout"]);
        assert!(ctx.description.is_none());
    }

    #[test]
    fn test_from_encoded_string() {
        let encoded = json!({"topic": "Recursion", "keyTags": "algorithms"}).to_string();
        let ctx = CurriculumContext::from_value(&Value::String(encoded)).unwrap();
        assert_eq!(ctx.topic.as_deref(), Some("Recursion"));
        assert_eq!(ctx.key_tags, vec!["algorithms"]);
    }

    #[test]
    fn test_unparseable_string_is_none() {
        assert!(CurriculumContext::from_value(&Value::String("not json".into())).is_none());
        assert!(CurriculumContext::from_value(&Value::String("[1,2]".into())).is_none());
    }

    #[test]
    fn test_non_object_is_none() {
        assert!(CurriculumContext::from_value(&json!(42)).is_none());
        assert!(CurriculumContext::from_value(&json!(["phase"])).is_none());
    }

    #[test]
    fn test_lenient_scalars_and_blanks() {
        let ctx = CurriculumContext::from_value(&json!({
            "phase": 2,
            "topic": "   ",
            "description": {"nested": true},
            "keyTags": ["", "a", 7],
        }))
        .unwrap();
        assert_eq!(ctx.phase.as_deref(), Some("2"));
        assert!(ctx.topic.is_none());
        assert!(ctx.description.is_none());
        assert_eq!(ctx.key_tags, vec!["a", "7"]);
    }

    #[test]
    fn test_unknown_fields_only_has_no_text() {
        let ctx = CurriculumContext::from_value(&json!({"week": 3})).unwrap();
        assert!(ctx.phase.is_none() && ctx.topic.is_none());
        assert!(ctx.key_tags.is_empty());
    }
}
