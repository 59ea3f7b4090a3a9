use axum::Json;
use utoipa::OpenApi;

use crate::database::bank::LanguageSummary;
use crate::dto::feedback_dto::{FeedbackRequest, FeedbackResponse};
use crate::dto::question_dto::{
    CustomQuestion, EvaluateRequest, GeneratedQuestionsResponse, InterviewQuestion,
    LanguagesResponse, QuestionsRequest, QuestionsResponse, UploadInterviewQuestionsResponse,
    UploadQuestionsResponse,
};
use crate::dto::speech_dto::TranscriptResponse;
use crate::models::question::{Difficulty, EvaluationResult, QuestionRecord};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::questions::get_questions,
        crate::routes::questions::upload_custom_questions,
        crate::routes::questions::list_languages,
        crate::routes::questions::generate_questions,
        crate::routes::questions::upload_interview_questions,
        crate::routes::evaluation::evaluate_answer,
        crate::routes::speech::transcribe_audio,
        crate::routes::feedback::analyze_feedback,
    ),
    components(schemas(
        Difficulty,
        QuestionRecord,
        EvaluationResult,
        LanguageSummary,
        QuestionsRequest,
        QuestionsResponse,
        EvaluateRequest,
        CustomQuestion,
        UploadQuestionsResponse,
        LanguagesResponse,
        InterviewQuestion,
        UploadInterviewQuestionsResponse,
        GeneratedQuestionsResponse,
        TranscriptResponse,
        FeedbackRequest,
        FeedbackResponse,
    ))
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
