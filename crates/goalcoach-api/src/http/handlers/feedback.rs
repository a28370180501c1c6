//! Goal-feedback endpoint.
//!
//! POST /api/generate-feedback
//! POST /api/v1/feedback

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::Instrument;

use goalcoach_types::feedback::FeedbackRequest;

use crate::http::error::AppError;
use crate::http::response::FeedbackResponse;
use crate::state::AppState;

/// Resolve feedback for one goal.
///
/// Always 200 once the goal is present: provider failures come back as
/// rule-based feedback with `provider: "fallback"`.
pub async fn generate_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let Json(request) = payload?;
    let request_id = uuid::Uuid::now_v7();
    let span = tracing::info_span!(
        "feedback_request",
        request_id = %request_id,
        user_id = request.user_id.as_deref().unwrap_or(""),
        has_context = request.context.is_some(),
    );

    let result = state.resolver.resolve(&request).instrument(span).await?;
    Ok(Json(FeedbackResponse::from(result)))
}
