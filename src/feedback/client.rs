//! Text-generation collaborator used for AI form analysis.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::config::FeedbackConfig;
use crate::error::AnalysisError;

/// Seam for the external text-generation call.
///
/// The returned future is `'static` so the gate can spawn it and keep
/// processing frames while it is pending.
pub trait AnalysisClient: Send + Sync {
    fn generate(&self, prompt: String) -> BoxFuture<'static, Result<String, AnalysisError>>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
pub fn extract_text(body: &str) -> Result<String, AnalysisError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| AnalysisError::MalformedResponse {
            reason: "response has no candidate text".to_string(),
        })
}

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(config: &FeedbackConfig, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// `None` when no API key is available in config or environment
    pub fn from_config(config: &FeedbackConfig) -> Option<Self> {
        match config.resolve_api_key() {
            Some(key) => Some(Self::new(config, key)),
            None => {
                tracing::info!("[GeminiClient] no API key configured, AI analysis unavailable");
                None
            }
        }
    }

    fn request_body(&self, prompt: String) -> GenerateRequest {
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

impl AnalysisClient for GeminiClient {
    fn generate(&self, prompt: String) -> BoxFuture<'static, Result<String, AnalysisError>> {
        // Key travels in a header so transport errors never echo it
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = self.request_body(prompt);
        let http = self.http.clone();
        let model = self.model.clone();
        let api_key = self.api_key.clone();

        Box::pin(async move {
            tracing::debug!("[GeminiClient] generateContent model={}", model);
            let response = http
                .post(url)
                .header(API_KEY_HEADER, api_key)
                .json(&body)
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AnalysisError::HttpStatus {
                    status: status.as_u16(),
                });
            }
            let text = response.text().await?;
            extract_text(&text)
        })
    }
}
