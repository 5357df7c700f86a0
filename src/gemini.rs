//! Gemini API client
//!
//! A minimal client for the `generateContent` endpoint. One call sends one
//! prompt and returns the text of the first candidate.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::credentials::ApiKey;

/// Model used for every request
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Public Gemini API host
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on the whole request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Gemini API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn first_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|part| part.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client whose requests are bounded by `timeout`
    ///
    /// # Errors
    ///
    /// * The TLS backend could not be initialised
    pub fn new(timeout: Duration) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ai-commit/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(GeminiError::Client)?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout,
        })
    }

    /// Send requests to another host, e.g. a local stub
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send `prompt` and return the first candidate's text
    ///
    /// `Ok(None)` means the API answered successfully without any text.
    ///
    /// # Arguments
    ///
    /// * `key` - Gemini API key, sent as `x-goog-api-key`
    /// * `prompt` - Complete prompt text
    ///
    /// # Errors
    ///
    /// * Transport failure or timeout
    /// * Non-success HTTP status
    /// * Response body is not a `generateContent` response
    pub async fn generate(&self, key: &ApiKey, prompt: &str) -> Result<Option<String>, GeminiError> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
        };

        let endpoint = self.endpoint();
        info!(model = %self.model, prompt_bytes = prompt.len(), "sending generateContent request");
        debug!(%endpoint, timeout = ?self.timeout, "request details");

        let response = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        debug!(status = status.as_u16(), "received response");

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or(raw);
            return Err(GeminiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|err| match self.classify(err) {
                GeminiError::Request(err) => GeminiError::Decode(err),
                other => other,
            })?;

        Ok(parsed.first_text())
    }

    fn classify(&self, err: reqwest::Error) -> GeminiError {
        if err.is_timeout() {
            GeminiError::Timeout(self.timeout)
        } else {
            GeminiError::Request(err)
        }
    }
}
