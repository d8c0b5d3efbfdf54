//! REST client for the Gemini `generateContent` endpoint.
//!
//! [`GeminiClient`] sends the composed instruction prompt to the model and
//! extracts a runnable Manim script body from the reply. Transport and API
//! errors surface unchanged — a generation failure is fatal for the current
//! request, there is no retry.

use async_trait::async_trait;
use serde::Deserialize;

use animagen_core::prompt::{extract_python_code, format_prompt};

/// Default model used when `GEMINI_MODEL` is unset.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default API base used when `GEMINI_API_BASE` is unset.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini client, loaded once at startup and passed
/// in at construction.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, from `GOOGLE_API_KEY` (required).
    pub api_key: String,
    /// Model name, e.g. `gemini-1.5-flash`.
    pub model: String,
    /// Base URL of the `generativelanguage` API (overridable for tests).
    pub api_base: String,
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Default                                            |
    /// |-------------------|----------------------------------------------------|
    /// | `GOOGLE_API_KEY`  | (required)                                         |
    /// | `GEMINI_MODEL`    | `gemini-1.5-flash`                                 |
    /// | `GEMINI_API_BASE` | `https://generativelanguage.googleapis.com/v1beta` |
    ///
    /// # Panics
    ///
    /// Panics when `GOOGLE_API_KEY` is unset, which is the desired
    /// behaviour — misconfiguration should fail at startup, not on the
    /// first request.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .expect("GOOGLE_API_KEY not found in environment variables");
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let api_base = std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        Self {
            api_key,
            model,
            api_base,
        }
    }
}

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response contained no candidates or no text parts.
    #[error("Gemini response contained no generated text")]
    EmptyResponse,
}

/// Anything that can turn a user prompt into a runnable Manim script body.
///
/// The request pipeline depends on this trait rather than on
/// [`GeminiClient`] directly, so tests can inject a scripted fake.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Generate a Manim script body for the given user prompt.
    async fn generate_scene_code(&self, user_prompt: &str) -> Result<String, GeminiError>;
}

/// HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

// ---------------------------------------------------------------------------
// generateContent response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new client from configuration.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling across components).
    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    /// Call `generateContent` with the fully formatted prompt and return the
    /// raw reply text (all candidate parts concatenated).
    async fn generate_content(&self, formatted_prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        );

        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": formatted_prompt }],
            }],
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        Ok(text)
    }
}

#[async_trait]
impl CodeGenerator for GeminiClient {
    /// Format the user prompt, call the model, and extract the script body
    /// from the reply.
    async fn generate_scene_code(&self, user_prompt: &str) -> Result<String, GeminiError> {
        let formatted = format_prompt(user_prompt);

        tracing::info!(model = %self.config.model, "Calling Gemini API");
        let reply = self.generate_content(&formatted).await?;

        Ok(extract_python_code(&reply))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
