//! Google Gemini provider.
//!
//! Calls the REST `generateContent` endpoint with the system instruction
//! and a single user content block, and returns the concatenated text parts
//! of the first candidate.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::llm::LlmClient,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    #[serde(default)]
    text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url,
            model,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request<'a>(system: &'a str, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        }
    }

    fn extract_text(response: GenerateContentResponse) -> AppResult<String> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::Llm("Gemini returned no text".to_string()));
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, system: &str, prompt: &str) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Llm("GEMINI_API_KEY is not set".to_string()))?;

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&Self::build_request(system, prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = Self::extract_text(body)?;

        tracing::info!(
            model = %self.model,
            chars = text.len(),
            provider = "gemini",
            "Completion received"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
