use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::database::bank::LanguageSummary;
use crate::models::language::BASE_LANGUAGE;
use crate::models::question::{NewQuestion, QuestionRecord};

fn default_language() -> String {
    BASE_LANGUAGE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionsRequest {
    pub difficulty: String,
    pub num_questions: Option<usize>,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EvaluateRequest {
    pub question: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub answer: String,
    pub difficulty: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Takes precedence over `question` when present.
    pub question_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomQuestion {
    pub question: String,
    pub key_points: Vec<String>,
    pub difficulty: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl From<CustomQuestion> for NewQuestion {
    fn from(q: CustomQuestion) -> Self {
        NewQuestion {
            language: q.language,
            difficulty: q.difficulty,
            question: q.question,
            key_points: q.key_points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadQuestionsResponse {
    pub message: String,
    pub questions_added: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageSummary>,
}

/// Question typed by an interviewer in the UI; validated but not stored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InterviewQuestion {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub text: String,
    #[validate(custom(function = "crate::utils::validation::interview_locale"))]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadInterviewQuestionsResponse {
    pub message: String,
    pub accepted: usize,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateQuestionsQuery {
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeneratedQuestionsResponse {
    pub questions: Vec<String>,
}
