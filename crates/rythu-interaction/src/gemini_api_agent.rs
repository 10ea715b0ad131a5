//! GeminiApiAgent - REST implementation of [`ChatBackend`] for Gemini.
//!
//! Credentials come from secret.json (or the environment); see [`crate::config`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rythu_core::agent::{ChatBackend, GenerateRequest, GenerateResponse};
use rythu_core::config::{DEFAULT_GEMINI_MODEL, SecretConfig};
use rythu_core::error::DispatchError;
use rythu_core::session::{GroundingChunk, HistoryEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Backend that talks to the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates an agent. A blank or missing key yields an agent that answers
    /// every request with [`DispatchError::NotConfigured`].
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Builds an agent from secret.json contents.
    ///
    /// Model name defaults to `gemini-2.5-flash` if not specified.
    pub fn from_secrets(secrets: &SecretConfig) -> Self {
        Self::new(
            secrets.gemini_api_key().map(str::to_string),
            secrets.gemini_model().unwrap_or(DEFAULT_GEMINI_MODEL),
        )
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at a different endpoint root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateResponse, DispatchError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                DispatchError::transport(
                    err.status().map(|s| s.as_u16()),
                    format!("Gemini API request failed: {}", err.without_url()),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let raw = response.text().await.map_err(|err| {
            DispatchError::transport(None, format!("Failed to read Gemini response: {err}"))
        })?;
        parse_response(&raw)
    }
}

#[async_trait]
impl ChatBackend for GeminiApiAgent {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, DispatchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(DispatchError::NotConfigured);
        };

        let body = GenerateContentRequest::from(&request);
        debug!(
            model = %self.model,
            contents = body.contents.len(),
            search = request.enable_search,
            "Sending Gemini generateContent"
        );
        self.send_request(api_key, &body).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

impl From<&GenerateRequest> for GenerateContentRequest {
    fn from(request: &GenerateRequest) -> Self {
        let system_instruction = (!request.system_instruction.trim().is_empty()).then(|| {
            SystemInstruction {
                parts: vec![Part {
                    text: request.system_instruction.clone(),
                }],
            }
        });
        let tools = if request.enable_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        Self {
            contents: request.contents.iter().map(Content::from).collect(),
            system_instruction,
            tools,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

impl From<&HistoryEntry> for Content {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            role: entry.role.as_str(),
            parts: vec![Part {
                text: entry.content.clone(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn parse_response(raw: &str) -> Result<GenerateResponse, DispatchError> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw).map_err(|err| {
        DispatchError::MalformedResponse(format!("Failed to parse Gemini response: {err}"))
    })?;
    extract_response(parsed)
}

/// Takes the first candidate's text parts, concatenated, plus its grounding
/// chunks in the order returned.
fn extract_response(response: GenerateContentResponse) -> Result<GenerateResponse, DispatchError> {
    let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = block_reason.unwrap_or_else(|| "no candidates".to_string());
        return Err(DispatchError::MalformedResponse(format!(
            "Gemini API returned no candidates ({reason})"
        )));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(DispatchError::MalformedResponse(format!(
            "Gemini API returned no text (finish reason: {reason})"
        )));
    }

    Ok(GenerateResponse {
        text,
        grounding_chunks: candidate
            .grounding_metadata
            .map(|meta| meta.grounding_chunks)
            .unwrap_or_default(),
    })
}

fn map_http_error(status: StatusCode, body: &str) -> DispatchError {
    let (status_text, message) = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            (
                wrapper.error.status.unwrap_or_default(),
                wrapper.error.message.unwrap_or_else(|| body.to_string()),
            )
        })
        .unwrap_or_else(|_| (String::new(), body.to_string()));

    let rejected_key = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || message.contains("API key not valid");
    if rejected_key {
        return DispatchError::InvalidCredential(message);
    }

    let message = if status_text.is_empty() {
        message
    } else {
        format!("{status_text}: {message}")
    };
    DispatchError::transport(Some(status.as_u16()), message)
}
