use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Language {0} not supported")]
    UnsupportedLanguage(String),

    #[error("Difficulty {0} not found")]
    UnknownDifficulty(String),

    #[error("No questions available for {difficulty} difficulty in {language}")]
    NoQuestionsAvailable { language: String, difficulty: String },

    #[error("Question not found in {difficulty} difficulty level for {language}")]
    QuestionNotFound { language: String, difficulty: String },

    #[error("Invalid question: {0}")]
    InvalidQuestionRecord(String),

    #[error("Question has no key points: {0}")]
    DegenerateQuestion(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl Error {
    /// Stable machine-readable name of the failure, sent alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::BadRequest(_) => "bad_request",
            Error::UnsupportedLanguage(_) => "unsupported_language",
            Error::UnknownDifficulty(_) => "unknown_difficulty",
            Error::NoQuestionsAvailable { .. } => "no_questions_available",
            Error::QuestionNotFound { .. } => "question_not_found",
            Error::InvalidQuestionRecord(_) => "invalid_question_record",
            Error::DegenerateQuestion(_) => "degenerate_question",
            Error::Validation(_) => "validation",
            Error::Json(_) => "json",
            Error::Anyhow(_) | Error::Reqwest(_) | Error::Upstream(_) => "upstream",
            Error::Internal(_) => "internal",
            Error::Multipart(_) => "multipart",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_)
            | Error::Validation(_)
            | Error::Json(_)
            | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::UnsupportedLanguage(_)
            | Error::UnknownDifficulty(_)
            | Error::NoQuestionsAvailable { .. }
            | Error::QuestionNotFound { .. }
            | Error::InvalidQuestionRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Anyhow(_) | Error::Reqwest(_) | Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::DegenerateQuestion(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            Error::Reqwest(err) => format!("External service error: {}", err),
            Error::Config(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": self.kind(), "message": message }));
        (status, body).into_response()
    }
}
