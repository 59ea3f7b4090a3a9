use crate::config::Config;
use crate::dto::feedback_dto::FeedbackResponse;
use crate::error::{Error, Result};
use anyhow::Context as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const REFERER: &str = "https://interview-platform.com";
const APP_TITLE: &str = "AI Interview Platform";

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
}

#[derive(Deserialize)]
struct RespChoiceMsg {
    content: Option<String>,
}

#[derive(Deserialize)]
struct RespChoice {
    message: RespChoiceMsg,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<RespChoice>,
}

#[derive(Deserialize, Default)]
struct RawAnalysis {
    score: Option<f64>,
    strengths: Option<Vec<String>>,
    improvements: Option<Vec<String>>,
    detailed_analysis: Option<String>,
    recommendations: Option<Vec<String>>,
}

/// Client for the OpenRouter chat-completions API.
#[derive(Clone)]
pub struct AiService {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl AiService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_base: config.openrouter_api_base.trim_end_matches('/').to_string(),
            api_key: config.openrouter_api_key.clone(),
            model: config.openrouter_model.clone(),
        }
    }

    /// Free-form interview questions, one per non-blank line of the reply.
    /// The result is plain text and never enters the question bank directly.
    pub async fn generate_questions(&self, language: &str) -> Result<Vec<String>> {
        let content = self
            .chat(vec![Msg {
                role: "system",
                content: format!(
                    "You are an expert interviewer. Generate 5 professional interview questions in {}.",
                    language
                ),
            }])
            .await?;
        Ok(split_lines(&content))
    }

    pub async fn analyze_feedback(&self, question: &str, response: &str) -> Result<FeedbackResponse> {
        let content = self
            .chat(vec![
                Msg {
                    role: "system",
                    content: "You are an expert interviewer providing detailed feedback on interview responses. \
                        Reply with a JSON object with fields 'score' (0-10), 'strengths', 'improvements', \
                        'recommendations' (arrays of strings) and 'detailed_analysis' (string)."
                        .to_string(),
                },
                Msg {
                    role: "user",
                    content: format!(
                        "Question: {}\nResponse: {}\nProvide detailed feedback with scores, strengths, improvements, and recommendations.",
                        question, response
                    ),
                },
            ])
            .await?;
        Ok(parse_analysis(&content))
    }

    async fn chat(&self, messages: Vec<Msg<'_>>) -> Result<String> {
        let req = ChatRequest {
            model: &self.model,
            messages,
        };
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&req)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = resp.status();
        let txt = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "OpenRouter returned an error");
            return Err(Error::Upstream(format!(
                "OpenRouter status {}: {}",
                status.as_u16(),
                txt
            )));
        }
        let parsed: ChatResponse =
            serde_json::from_str(&txt).context("chat completion parse failed")?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::Upstream("OpenRouter returned no choices".to_string()))
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Fields the model leaves out are filled with stock feedback; an unparseable
/// reply becomes the detailed analysis verbatim.
fn parse_analysis(content: &str) -> FeedbackResponse {
    let raw: RawAnalysis = match serde_json::from_str(strip_code_fence(content)) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "feedback reply was not JSON, using defaults");
            RawAnalysis {
                detailed_analysis: Some(content.trim().to_string()),
                ..RawAnalysis::default()
            }
        }
    };

    FeedbackResponse {
        score: raw.score.unwrap_or(7.5),
        strengths: raw
            .strengths
            .unwrap_or_else(|| vec!["Clear communication".into(), "Good structure".into()]),
        improvements: raw
            .improvements
            .unwrap_or_else(|| vec!["Could provide more specific examples".into()]),
        detailed_analysis: raw.detailed_analysis.unwrap_or_default(),
        recommendations: raw.recommendations.unwrap_or_else(|| {
            vec![
                "Practice with more specific examples".into(),
                "Focus on pace".into(),
            ]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> AiService {
        let config = Config {
            openrouter_api_base: format!("{}/api/v1", server.uri()),
            openrouter_api_key: "sk-test".into(),
            ..Config::default()
        };
        AiService::new(&config, Client::new())
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
    }

    #[tokio::test]
    async fn generate_questions_splits_reply_into_lines() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("x-title", APP_TITLE))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("1. Tell me about yourself.\n\n2. Why this role?\n")),
            )
            .mount(&server)
            .await;

        let questions = service_for(&server).generate_questions("en").await.unwrap();
        assert_eq!(
            questions,
            vec!["1. Tell me about yourself.", "2. Why this role?"]
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = service_for(&server).generate_questions("en").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn analyze_feedback_reads_json_reply() {
        let server = MockServer::start().await;
        let reply = "```json\n{\"score\": 9, \"strengths\": [\"Concise\"], \"detailed_analysis\": \"Solid.\"}\n```";
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(reply)))
            .mount(&server)
            .await;

        let feedback = service_for(&server)
            .analyze_feedback("Why Rust?", "Safety.")
            .await
            .unwrap();
        assert_eq!(feedback.score, 9.0);
        assert_eq!(feedback.strengths, vec!["Concise"]);
        assert_eq!(feedback.detailed_analysis, "Solid.");
        assert_eq!(feedback.improvements.len(), 1);
    }

    #[test]
    fn plain_text_reply_becomes_detailed_analysis() {
        let feedback = parse_analysis("  Good pacing overall.  ");
        assert_eq!(feedback.detailed_analysis, "Good pacing overall.");
        assert_eq!(feedback.score, 7.5);
        assert_eq!(feedback.recommendations.len(), 2);
    }
}
