use std::path::Path;

use anyhow::Context as _;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Webm,
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())?;
        match ext.as_str() {
            "webm" => Some(AudioFormat::Webm),
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            _ => None,
        }
    }

    fn encoding(self) -> &'static str {
        match self {
            AudioFormat::Webm => "WEBM_OPUS",
            AudioFormat::Wav => "LINEAR16",
            AudioFormat::Mp3 => "MP3",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'a str,
    language_code: &'a str,
    audio_channel_count: u8,
    enable_automatic_punctuation: bool,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

/// Google Cloud Speech-to-Text over its REST `speech:recognize` endpoint.
#[derive(Clone)]
pub struct SpeechService {
    client: Client,
    api_base: String,
    api_key: String,
}

impl SpeechService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_base: config.google_speech_api_base.trim_end_matches('/').to_string(),
            api_key: config.google_api_key.clone(),
        }
    }

    pub async fn transcribe(&self, audio: &[u8], format: AudioFormat, language: &str) -> Result<String> {
        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: format.encoding(),
                language_code: language,
                audio_channel_count: 1,
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio {
                content: BASE64.encode(audio),
            },
        };

        let resp = self
            .client
            .post(format!("{}/speech:recognize", self.api_base))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .context("speech recognition request failed")?;

        let status = resp.status();
        let txt = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "speech API returned an error");
            return Err(Error::Upstream(format!(
                "Speech API status {}: {}",
                status.as_u16(),
                txt
            )));
        }

        let parsed: RecognizeResponse =
            serde_json::from_str(&txt).context("speech recognition parse failed")?;
        if parsed.results.is_empty() {
            return Err(Error::BadRequest(
                "Could not transcribe audio. Please ensure clear audio quality.".to_string(),
            ));
        }

        let transcript = parsed
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(transcript.trim().to_string())
    }
}
