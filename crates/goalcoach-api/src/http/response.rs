//! Wire shape of a resolved feedback response.

use serde::Serialize;

use goalcoach_types::feedback::FeedbackResult;

/// `{"feedback", "provider", "timestamp", "errorNote"?}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub feedback: String,
    pub provider: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_note: Option<String>,
}

impl From<FeedbackResult> for FeedbackResponse {
    fn from(result: FeedbackResult) -> Self {
        Self {
            feedback: result.feedback_text,
            provider: result.provider.to_string(),
            timestamp: result.generated_at.to_rfc3339(),
            error_note: result.error_note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_result_omits_error_note() {
        let response = FeedbackResponse::from(FeedbackResult::from_model(
            "Nice goal.".to_string(),
            "gemini-2.0-flash",
        ));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["feedback"], "Nice goal.");
        assert_eq!(json["provider"], "gemini-2.0-flash");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
        assert!(json.get("errorNote").is_none());
    }

    #[test]
    fn test_fallback_result_carries_error_note() {
        let response = FeedbackResponse::from(FeedbackResult::fallback(
            "Questions".to_string(),
            Some("AI service temporarily unavailable".to_string()),
        ));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["provider"], "fallback");
        assert_eq!(json["errorNote"], "AI service temporarily unavailable");
    }
}
