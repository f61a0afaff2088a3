//! Google Gemini fact provider

use super::prompt::{build_prompt, response_schema, system_instruction};
use super::types::{FactRecord, FactRequest, Topic};
use super::{FactProvider, ProviderError};
use crate::config::AppConfig;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DIRECT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini service implementation
pub struct GeminiFactProvider {
    client: Client,
    api_key: Option<String>,
    url: String,
    model: String,
    domains: Vec<String>,
}

impl GeminiFactProvider {
    pub fn new(config: &AppConfig) -> Result<Self, ProviderError> {
        let url = match config.gateway.as_deref() {
            Some(gw) => format!(
                "{}/gemini/v1beta/models/{}:generateContent",
                gw.trim_end_matches('/'),
                config.model
            ),
            None => format!(
                "{DIRECT_BASE_URL}/v1beta/models/{}:generateContent",
                config.model
            ),
        };

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            // Gateway mode handles authentication itself
            api_key: if config.gateway.is_some() {
                None
            } else {
                config.api_key.clone()
            },
            url,
            model: config.model.clone(),
            domains: config.domains.clone(),
        })
    }

    /// Pick the domain to ask about; `Topic::Any` draws uniformly from the configured set
    fn resolve_domain(&self, topic: &Topic) -> Result<String, ProviderError> {
        match topic {
            Topic::Domain(domain) => Ok(domain.clone()),
            Topic::Any => self
                .domains
                .choose(&mut rand::thread_rng())
                .cloned()
                .ok_or_else(|| ProviderError::invalid_request("No domains configured")),
        }
    }

    fn translate_request(&self, domain: &str, request: &FactRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: build_prompt(domain, request.complexity, &request.history),
                }],
            }],
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: system_instruction(),
                }],
            }),
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

/// Classify a transport failure. The URL is dropped so nothing request-specific
/// reaches the log.
fn send_error(e: reqwest::Error) -> ProviderError {
    let e = e.without_url();
    if e.is_timeout() {
        ProviderError::network(format!("Request timeout: {e}"))
    } else if e.is_connect() {
        ProviderError::network(format!("Connection failed: {e}"))
    } else {
        ProviderError::unknown(format!("Request failed: {e}"))
    }
}

/// Turn a non-success status and its body into a classified error
pub(crate) fn normalize_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<GeminiErrorResponse>(body)
        .map_or_else(|_| body.trim().to_string(), |error_resp| error_resp.error.message);
    ProviderError::from_status(status, &message)
}

/// Turn a raw `generateContent` body into a validated record
pub(crate) fn normalize_response(body: &str) -> Result<FactRecord, ProviderError> {
    let resp: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::malformed_reply(format!("Failed to parse response: {e}")))?;

    let candidate = resp
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::malformed_reply("No candidates in response"))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::malformed_reply(format!(
            "No data received (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    let reply: FactReply = serde_json::from_str(text.trim())
        .map_err(|e| ProviderError::malformed_reply(format!("Reply is not a fact object: {e}")))?;

    reply.into_record()
}

#[async_trait]
impl FactProvider for GeminiFactProvider {
    async fn request_fact(&self, request: &FactRequest) -> Result<FactRecord, ProviderError> {
        let domain = self.resolve_domain(&request.topic)?;
        let gemini_request = self.translate_request(&domain, request);

        let mut builder = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        let response = builder.json(&gemini_request).send().await.map_err(send_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("Failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(normalize_error(status.as_u16(), &body));
        }

        normalize_response(&body)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// The structured object the schema asks the model for
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FactReply {
    fact: Option<String>,
    domain: Option<String>,
    emoji: Option<String>,
    presentation_hint: Option<String>,
}

impl FactReply {
    fn into_record(self) -> Result<FactRecord, ProviderError> {
        Ok(FactRecord {
            text: required(self.fact, "fact")?,
            domain: required(self.domain, "domain")?,
            emoji: required(self.emoji, "emoji")?,
            presentation_hint: required(self.presentation_hint, "presentationHint")?,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ProviderError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ProviderError::malformed_reply(format!("Reply is missing `{field}`")))
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
