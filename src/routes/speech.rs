use axum::{
    extract::{Multipart, Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::speech_dto::{TranscribeQuery, TranscriptResponse},
    error::{Error, Result},
    services::speech_service::AudioFormat,
    utils::validation::validate,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/speech/transcribe",
    params(TranscribeQuery),
    responses(
        (status = 200, description = "Transcribed text", body = TranscriptResponse),
        (status = 400, description = "Missing, unsupported or oversized audio file"),
        (status = 502, description = "Speech service unavailable")
    )
)]
pub async fn transcribe_audio(
    State(state): State<AppState>,
    Query(query): Query<TranscribeQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    validate(&query)?;

    let mut upload: Option<(AudioFormat, bytes::Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let format = AudioFormat::from_filename(&filename).ok_or_else(|| {
            Error::BadRequest(
                "Invalid file format. Only .webm, .wav, and .mp3 files are supported.".to_string(),
            )
        })?;
        let data = field.bytes().await?;
        upload = Some((format, data));
        break;
    }

    let (format, data) =
        upload.ok_or_else(|| Error::BadRequest("Missing audio file".to_string()))?;
    if data.len() > state.max_audio_bytes {
        return Err(Error::BadRequest(format!(
            "File size too large. Maximum size is {}MB.",
            state.max_audio_bytes / (1024 * 1024)
        )));
    }

    tracing::info!(bytes = data.len(), language = %query.language, "transcribing audio");
    let transcript = state
        .speech_service
        .transcribe(&data, format, &query.language)
        .await?;
    Ok(Json(TranscriptResponse { transcript }))
}
