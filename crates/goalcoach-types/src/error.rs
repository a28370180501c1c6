use thiserror::Error;

/// Request-level errors from feedback resolution.
///
/// Provider failures never appear here -- they are absorbed by the
/// rule-based fallback. Only caller misuse surfaces.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Missing goalText")]
    MissingInput,

    #[error("No API key found for user {user_id}")]
    NoCredentialAvailable { user_id: String },
}

/// Errors from repository operations (credential store).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_display_matches_wire_message() {
        assert_eq!(FeedbackError::MissingInput.to_string(), "Missing goalText");
    }

    #[test]
    fn test_no_credential_display() {
        let err = FeedbackError::NoCredentialAvailable {
            user_id: "stu-42".to_string(),
        };
        assert_eq!(err.to_string(), "No API key found for user stu-42");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
