use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::question_dto::EvaluateRequest, error::Result, AppState,
};

#[utoipa::path(
    post,
    path = "/api/prefect/evaluate",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Coverage score and feedback", body = crate::models::question::EvaluationResult),
        (status = 400, description = "Empty answer"),
        (status = 422, description = "Question not found or unsupported language/difficulty")
    )
)]
#[axum::debug_handler]
pub async fn evaluate_answer(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let answer = payload.answer.trim();
    let result = match payload.question_id {
        Some(id) => state.evaluation_service.evaluate_by_id(
            id,
            answer,
            &payload.difficulty,
            &payload.language,
        )?,
        None => state.evaluation_service.evaluate(
            &payload.question,
            answer,
            &payload.difficulty,
            &payload.language,
        )?,
    };
    tracing::info!(
        question_id = %result.question_id,
        score = result.score,
        "answer evaluated"
    );
    Ok(Json(result))
}
