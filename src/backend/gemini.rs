use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace};

use crate::backend::LlmBackend;
use crate::backend::utils::{check_response_status, handle_http_error};
use crate::error::{AtsError, Result};
use crate::schema::Schema;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini models available for analysis.
///
/// The default is pinned to `gemini-2.5-flash-preview-09-2025` so that score
/// behavior doesn't drift when Google moves the `latest` aliases. Any other
/// model name can be supplied through the `Custom` variant or `FromStr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    /// Gemini 2.5 Flash Preview, 2025-09 snapshot (pinned default)
    Gemini25FlashPreview0925,
    /// Gemini 2.5 Pro (latest production Pro model)
    Gemini25Pro,
    /// Gemini 2.5 Flash (latest production Flash model)
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite (smaller, faster variant)
    Gemini25FlashLite,
    /// Gemini Pro Latest (alias for latest Pro model)
    GeminiProLatest,
    /// Gemini Flash Latest (alias for latest Flash model)
    GeminiFlashLatest,
    /// Custom model name (for new models or Gemini-compatible endpoints)
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25FlashPreview0925 => "gemini-2.5-flash-preview-09-2025",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::GeminiProLatest => "gemini-pro-latest",
            Model::GeminiFlashLatest => "gemini-flash-latest",
            Model::Custom(name) => name,
        }
    }

    /// Create a model from a string. This is a convenience method that always
    /// succeeds.
    ///
    /// If the string matches a known model variant, it returns that variant.
    /// Otherwise, it returns `Custom(name)`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-2.5-flash-preview-09-2025" => Model::Gemini25FlashPreview0925,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-pro-latest" => Model::GeminiProLatest,
            "gemini-flash-latest" => Model::GeminiFlashLatest,
            _ => Model::Custom(name),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::from_string(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::from_string(s)
    }
}

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    /// Custom base URL for Gemini-compatible APIs
    /// Defaults to "https://generativelanguage.googleapis.com/v1beta" if not set
    pub base_url: Option<String>,
}

/// Gemini client for structured-output requests.
///
/// Construct once per process and reuse; the underlying `reqwest::Client`
/// holds the connection pool. Sampling temperature defaults to 0.2 for
/// low-variance scoring output.
#[derive(Debug)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

// Gemini API request and response structures
#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
    #[serde(rename = "finishReason", default)]
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client with the provided API key.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is empty.
    #[instrument(name = "gemini_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(AtsError::Unexpected(format!(
                "API key cannot be empty. Use GeminiClient::from_env() to read it from {API_KEY_ENV}."
            )));
        }

        let config = GeminiConfig {
            api_key,
            model: Model::Gemini25FlashPreview0925,
            temperature: 0.2,
            max_tokens: None,
            timeout: None, // Default: no timeout (uses reqwest's default)
            base_url: None, // Default: use official Gemini API
        };

        let client = reqwest::Client::new();

        info!(model = %config.model.as_str(), "Created Gemini client");

        Ok(Self { config, client })
    }

    /// Create a new Gemini client by reading the API key from the
    /// `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`AtsError::MissingCredential`] if `GEMINI_API_KEY` is not
    /// set. This is the fatal-configuration path: no request is attempted
    /// and nothing is retried.
    #[instrument(name = "gemini_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| AtsError::MissingCredential(API_KEY_ENV))?;
        Self::new(api_key)
    }

    /// Set the model to use
    #[instrument(skip(self))]
    pub fn model(mut self, model: Model) -> Self {
        debug!(
            previous_model = ?self.config.model,
            new_model = ?model,
            "Setting Gemini model"
        );
        self.config.model = model;
        self
    }

    /// Set the temperature (0.0 to 1.0, lower = more deterministic)
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.config.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.config.temperature = temp;
        self
    }

    /// Set the maximum tokens to generate
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        // Ensure max_tokens is at least 1 to avoid API errors
        self.config.max_tokens = Some(max.max(1));
        self
    }

    /// Set the timeout for HTTP requests.
    ///
    /// Applies to each HTTP request made by the client, including retried
    /// attempts individually.
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);

        // Rebuild reqwest client with the timeout immediately
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    "Failed to build reqwest client with timeout, using default"
                );
                reqwest::Client::new()
            });

        self
    }

    /// Set a custom base URL for Gemini-compatible APIs.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL without trailing slash (e.g., "http://localhost:1234/v1beta")
    #[instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }
}

#[async_trait]
impl LlmBackend for GeminiClient {
    #[instrument(
        name = "gemini_submit",
        skip(self, system, user, schema),
        fields(
            model = %self.config.model.as_str(),
            user_len = user.len()
        )
    )]
    async fn submit(&self, system: &str, user: &str, schema: &Schema) -> Result<String> {
        debug!("Building Gemini generateContent request");
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: user.to_string(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: system.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
                response_mime_type: "application/json".to_string(),
                response_schema: schema.to_json().clone(),
            },
        };

        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = format!(
            "{}/models/{}:generateContent",
            base_url,
            self.config.model.as_str()
        );
        debug!(url = %url, "Sending request to Gemini API");
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(handle_http_error)?;

        let response = check_response_status(response).await?;

        debug!("Successfully received response from Gemini API");
        let completion: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON envelope from Gemini API");
            e
        })?;

        if completion.candidates.is_empty() {
            error!("Gemini API returned empty candidates array");
            return Err(AtsError::Unexpected(
                "no completion candidates returned".to_string(),
            ));
        }

        let candidate = &completion.candidates[0];
        trace!(finish_reason = %candidate.finish_reason, "Completion finish reason");

        match candidate
            .content
            .parts
            .first()
            .and_then(|p| p.text.as_ref())
        {
            Some(text) => {
                debug!(content_len = text.len(), "Extracted text from response");
                Ok(text.clone())
            }
            None => {
                error!("No text content in Gemini response");
                Err(AtsError::Unexpected(
                    "no text content in response".to_string(),
                ))
            }
        }
    }
}
