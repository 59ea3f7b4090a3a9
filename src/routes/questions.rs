use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::question_dto::{
        CustomQuestion, GenerateQuestionsQuery, GeneratedQuestionsResponse, InterviewQuestion,
        LanguagesResponse, QuestionsRequest, QuestionsResponse, UploadInterviewQuestionsResponse,
        UploadQuestionsResponse,
    },
    error::Result,
    models::question::NewQuestion,
    AppState,
};

const DEFAULT_NUM_QUESTIONS: usize = 3;

#[utoipa::path(
    post,
    path = "/api/prefect/questions",
    request_body = QuestionsRequest,
    responses(
        (status = 200, description = "Random questions from the requested partition", body = QuestionsResponse),
        (status = 422, description = "Unsupported language, unknown difficulty or empty partition")
    )
)]
#[axum::debug_handler]
pub async fn get_questions(
    State(state): State<AppState>,
    Json(payload): Json<QuestionsRequest>,
) -> Result<impl IntoResponse> {
    let questions = state.question_bank.sample(
        &payload.language,
        &payload.difficulty,
        payload.num_questions.unwrap_or(DEFAULT_NUM_QUESTIONS),
    )?;
    Ok(Json(QuestionsResponse { questions }))
}

#[utoipa::path(
    post,
    path = "/api/prefect/questions/upload",
    request_body = Vec<CustomQuestion>,
    responses(
        (status = 200, description = "All questions were added", body = UploadQuestionsResponse),
        (status = 422, description = "A question was rejected; nothing was added")
    )
)]
#[axum::debug_handler]
pub async fn upload_custom_questions(
    State(state): State<AppState>,
    Json(payload): Json<Vec<CustomQuestion>>,
) -> Result<impl IntoResponse> {
    let batch: Vec<NewQuestion> = payload.into_iter().map(NewQuestion::from).collect();
    let questions_added = state.question_bank.insert(batch).map_err(|e| {
        tracing::warn!(error = %e, "custom question upload rejected");
        e
    })?;
    Ok(Json(UploadQuestionsResponse {
        message: format!("Successfully added {} questions", questions_added.len()),
        questions_added,
    }))
}

#[utoipa::path(
    get,
    path = "/api/prefect/languages",
    responses(
        (status = 200, description = "Languages in the bank with question counts", body = LanguagesResponse)
    )
)]
pub async fn list_languages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let languages = state.question_bank.languages()?;
    Ok(Json(LanguagesResponse { languages }))
}

#[utoipa::path(
    post,
    path = "/api/questions/generate",
    params(GenerateQuestionsQuery),
    responses(
        (status = 200, description = "Generated question texts", body = GeneratedQuestionsResponse),
        (status = 502, description = "Language model unavailable")
    )
)]
pub async fn generate_questions(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuestionsQuery>,
) -> Result<impl IntoResponse> {
    let questions = state.ai_service.generate_questions(&query.language).await?;
    tracing::info!(language = %query.language, count = questions.len(), "generated questions");
    Ok(Json(GeneratedQuestionsResponse { questions }))
}

#[utoipa::path(
    post,
    path = "/api/questions/upload",
    request_body = Vec<InterviewQuestion>,
    responses(
        (status = 200, description = "Questions accepted", body = UploadInterviewQuestionsResponse),
        (status = 400, description = "Invalid question format")
    )
)]
pub async fn upload_interview_questions(
    Json(payload): Json<Vec<InterviewQuestion>>,
) -> Result<impl IntoResponse> {
    for question in &payload {
        question.validate()?;
    }
    Ok(Json(UploadInterviewQuestionsResponse {
        message: "Questions uploaded successfully".to_string(),
        accepted: payload.len(),
    }))
}
