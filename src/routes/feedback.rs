use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::feedback_dto::FeedbackRequest,
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/feedback/analyze",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Structured interview feedback", body = crate::dto::feedback_dto::FeedbackResponse),
        (status = 400, description = "Invalid payload"),
        (status = 502, description = "Language model unavailable")
    )
)]
#[axum::debug_handler]
pub async fn analyze_feedback(
    State(state): State<AppState>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let feedback = state
        .ai_service
        .analyze_feedback(&payload.question, &payload.audio_url)
        .await?;
    Ok(Json(feedback))
}
