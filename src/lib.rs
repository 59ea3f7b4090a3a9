pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::database::bank::QuestionBank;
use crate::services::{
    ai_service::AiService, evaluation_service::EvaluationService, speech_service::SpeechService,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

/// Slack on top of the audio limit for multipart framing and text fields.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub question_bank: QuestionBank,
    pub evaluation_service: EvaluationService,
    pub ai_service: AiService,
    pub speech_service: SpeechService,
    pub max_audio_bytes: usize,
}

impl AppState {
    pub fn new(config: &Config, question_bank: QuestionBank) -> error::Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            evaluation_service: EvaluationService::new(question_bank.clone()),
            ai_service: AiService::new(config, http_client.clone()),
            speech_service: SpeechService::new(config, http_client),
            question_bank,
            max_audio_bytes: config.max_audio_bytes,
        })
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let prefect_api = Router::new()
        .route("/api/prefect/questions", post(routes::questions::get_questions))
        .route(
            "/api/prefect/questions/upload",
            post(routes::questions::upload_custom_questions),
        )
        .route("/api/prefect/languages", get(routes::questions::list_languages))
        .route("/api/prefect/evaluate", post(routes::evaluation::evaluate_answer));

    let interview_api = Router::new()
        .route(
            "/api/questions/generate",
            post(routes::questions::generate_questions),
        )
        .route(
            "/api/questions/upload",
            post(routes::questions::upload_interview_questions),
        )
        .route("/api/speech/transcribe", post(routes::speech::transcribe_audio))
        .route("/api/feedback/analyze", post(routes::feedback::analyze_feedback));

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/openapi.json", get(routes::docs::openapi))
        .merge(prefect_api)
        .merge(interview_api)
        .with_state(state)
        .layer(middleware::cors::cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_audio_bytes + BODY_LIMIT_SLACK))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
}
