use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FeedbackRequest {
    /// Transcribed response (or a link to it) handed to the model as-is.
    pub audio_url: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub question: String,
    #[validate(custom(function = "crate::utils::validation::interview_locale"))]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
    pub score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub detailed_analysis: String,
    pub recommendations: Vec<String>,
}
