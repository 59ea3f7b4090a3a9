use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let languages = state.question_bank.languages()?.len();
    let body = json!({
        "status": "ok",
        "languages": languages,
    });
    Ok((StatusCode::OK, Json(body)))
}
