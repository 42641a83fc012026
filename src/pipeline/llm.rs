//! Gemini interaction: the single point of network I/O in the crate.
//!
//! This module is intentionally thin — all prompt content lives in
//! [`crate::prompts`] so it can change without touching the wire code
//! here.
//!
//! ## No retry, by contract
//!
//! Each user action maps to exactly one outbound call. A failed call is
//! classified into a [`ProviderError`] and surfaced once; the user decides
//! whether to press the button again. This also means a slow model call
//! simply blocks its interaction until the HTTP timeout fires.

use crate::config::AnalyzerConfig;
use crate::error::{InsightError, ProviderError};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
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
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage: Option<UsageMetadata>,
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

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_tokens: u64,
    #[serde(rename = "candidatesTokenCount", default)]
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

// ── Client ───────────────────────────────────────────────────────────────

/// Text-generation client for the Gemini `generateContent` endpoint.
///
/// Constructed once per process and reused across calls — connection
/// pooling lives in the inner `reqwest::Client`, so cloning or rebuilding
/// it per request would throw away keep-alive sockets.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl GeminiClient {
    /// Build a client from the analyzer configuration.
    ///
    /// Resolves the API key (config override, then `GEMINI_API_KEY`, then
    /// `GOOGLE_API_KEY`) and constructs the pooled HTTP client with the
    /// configured timeout.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, InsightError> {
        let api_key = config.resolve_api_key()?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| InsightError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt, get one free-text reply. No retry.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let start = Instant::now();
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Other(format!("request timed out: {e}"))
                } else {
                    ProviderError::Other(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body_text);
            return Err(classify_error(status.as_u16(), &body_text));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Other(format!("malformed response: {e}")))?;

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Gemini call: {} input tokens, {} output tokens, {:?}",
                usage.prompt_tokens,
                usage.completion_tokens,
                start.elapsed()
            );
        }

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::Other(
                "model returned no text candidates".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Map an HTTP status and error body onto the provider taxonomy.
///
/// The body is consulted because Gemini reports both quota exhaustion and
/// transient rate limiting as 429, distinguished only by the message.
fn classify_error(status: u16, body: &str) -> ProviderError {
    let parsed_message = serde_json::from_str::<ApiError>(body)
        .map(|e| (e.error.message, e.error.status))
        .unwrap_or_else(|_| (body.to_string(), String::new()));
    let (message, api_status) = parsed_message;
    let upper = format!("{} {}", message.to_uppercase(), api_status.to_uppercase());

    match status {
        401 | 403 => ProviderError::InvalidCredential,
        400 if upper.contains("API_KEY") || upper.contains("API KEY") => {
            ProviderError::InvalidCredential
        }
        429 if upper.contains("QUOTA") || upper.contains("RESOURCE_EXHAUSTED") => {
            ProviderError::QuotaExceeded
        }
        429 => ProviderError::RateLimited,
        _ => ProviderError::Other(if message.is_empty() {
            format!("HTTP {status}")
        } else {
            message
        }),
    }
}
