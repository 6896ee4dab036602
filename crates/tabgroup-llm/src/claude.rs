//! Claude backend for Anthropic API.
//!
//! Requires the `api` feature and an Anthropic API key.

use crate::backend::{LlmBackend, LlmConfig, LlmError, LlmResult};
use crate::http;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API request.
#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ClaudeMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Claude API response.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(default)]
    text: String,
}

/// Claude backend for Anthropic API.
///
/// # Example
///
/// ```rust,ignore
/// use tabgroup_llm::{ClaudeBackend, LlmThemeNamer};
///
/// let namer = LlmThemeNamer::new(ClaudeBackend::from_env()?);
/// ```
pub struct ClaudeBackend {
    api_key: String,
    config: LlmConfig,
    client: reqwest::Client,
}

impl ClaudeBackend {
    /// Create a new Claude backend.
    pub fn new(api_key: &str) -> LlmResult<Self> {
        Self::with_config(api_key, LlmConfig::claude())
    }

    /// Create with custom config.
    pub fn with_config(api_key: &str, config: LlmConfig) -> LlmResult<Self> {
        Ok(Self {
            api_key: api_key.to_string(),
            client: http::client(config.timeout_secs)?,
            config,
        })
    }

    /// Create from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env() -> LlmResult<Self> {
        let api_key =
            std::env::var("ANTHROPIC_API_KEY").map_err(|_| LlmError::AuthenticationFailed)?;
        Self::new(&api_key)
    }

    /// Set the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.config.model = model.to_string();
        self
    }
}

#[async_trait]
impl LlmBackend for ClaudeBackend {
    fn name(&self) -> &str {
        "claude"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete_with_system(&self, prompt: &str, system: Option<&str>) -> LlmResult<String> {
        let request = ClaudeRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| http::send_error(e, "Anthropic API", self.config.timeout_secs))?;

        if !response.status().is_success() {
            return Err(http::status_error(response, "Anthropic API").await);
        }

        let reply: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        reply
            .content
            .into_iter()
            .map(|block| block.text)
            .find(|text| !text.is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("reply has no text block".to_string()))
    }
}
