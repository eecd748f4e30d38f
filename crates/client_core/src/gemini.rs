//! Direct binding: calls the provider's `generateContent` endpoint with the
//! API credential held by this process.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::domain::{FiveWhysResult, RiskProfile};
use tracing::{debug, error, warn};

use crate::{
    error::{AnalysisError, AnalysisOperation},
    prompts, schema, validation, AnalysisService,
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty when there is none.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate(
        &self,
        operation: AnalysisOperation,
        prompt: &str,
        response_schema: &Value,
    ) -> Result<String, AnalysisError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema,
            },
        };

        debug!(
            operation = operation.name(),
            model = %self.model,
            "sending generateContent request"
        );
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                operation = operation.name(),
                status = status.as_u16(),
                "generateContent request failed"
            );
            return Err(AnalysisError::from_status(status.as_u16(), &body));
        }

        let body = response.text().await?;
        let envelope: GenerateContentResponse = serde_json::from_str(&body).map_err(|err| {
            error!(
                operation = operation.name(),
                raw = %body,
                "failed to parse generateContent envelope: {err}"
            );
            AnalysisError::InvalidFormat { operation }
        })?;
        Ok(envelope.into_text())
    }
}

#[async_trait]
impl AnalysisService for GeminiClient {
    async fn perform_five_whys(&self, concern: &str) -> Result<FiveWhysResult, AnalysisError> {
        let text = self
            .generate(
                AnalysisOperation::FiveWhys,
                &prompts::five_whys_prompt(concern),
                &schema::five_whys_schema(),
            )
            .await?;
        validation::parse_five_whys(&text)
    }

    async fn generate_risk_details(
        &self,
        root_cause: &str,
        original_concern: &str,
    ) -> Result<RiskProfile, AnalysisError> {
        let text = self
            .generate(
                AnalysisOperation::RiskDetails,
                &prompts::risk_details_prompt(root_cause, original_concern),
                &schema::risk_details_schema(),
            )
            .await?;
        validation::parse_risk_profile(&text)
    }
}
