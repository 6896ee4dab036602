//! Core LLM backend trait.

use crate::prompt::{clean_theme, parse_entities_json, EntityPrompt, PromptTemplate, ThemePrompt};
use async_trait::async_trait;
use tabgroup_core::capability::Entity;
use tabgroup_core::error::CapabilityError;
use thiserror::Error;

/// LLM-related errors.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Parsing failed: {0}")]
    ParseError(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Timeout after {0} seconds")]
    Timeout(u32),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

impl From<LlmError> for CapabilityError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout(secs) => CapabilityError::Timeout(u64::from(secs) * 1000),
            LlmError::InvalidResponse(msg) | LlmError::ParseError(msg) => {
                CapabilityError::InvalidResponse(msg)
            }
            other => CapabilityError::Unavailable(other.to_string()),
        }
    }
}

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Configuration for LLM requests.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name/identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "default".to_string(),
            max_tokens: 256,
            temperature: 0.0,
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// Create config for Claude.
    pub fn claude() -> Self {
        Self {
            model: "claude-3-haiku-20240307".to_string(),
            ..Self::default()
        }
    }

    /// Create config for Ollama.
    pub fn ollama() -> Self {
        Self {
            model: "llama3.2".to_string(),
            timeout_secs: 60, // Local models can be slower
            ..Self::default()
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set max tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Set timeout.
    pub fn with_timeout(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Core trait for LLM backends.
///
/// Implementors only need to provide raw completion; theme naming and
/// entity extraction are built on top of it with the crate's prompts.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Get the current configuration.
    fn config(&self) -> &LlmConfig;

    /// Generate a completion for a prompt with an optional system prompt.
    async fn complete_with_system(&self, prompt: &str, system: Option<&str>) -> LlmResult<String>;

    /// Generate a completion for a prompt.
    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        self.complete_with_system(prompt, None).await
    }

    /// Short theme label for a set of titles, quotes and whitespace stripped.
    async fn name_theme(&self, titles: &[String]) -> LlmResult<String> {
        let prompt = ThemePrompt::new(titles.to_vec());
        let system = prompt.system_prompt();
        let response = self
            .complete_with_system(&prompt.generate(), system.as_deref())
            .await?;
        Ok(clean_theme(&response))
    }

    /// Extract named entities from text.
    async fn extract_entities(&self, text: &str) -> LlmResult<Vec<Entity>> {
        let prompt = EntityPrompt::new(text);
        let system = prompt.system_prompt();
        let response = self
            .complete_with_system(&prompt.generate(), system.as_deref())
            .await?;

        parse_entities_json(&response).map_err(|e| {
            LlmError::ParseError(format!(
                "Failed to parse entities: {}. Response: {}",
                e, response
            ))
        })
    }

    /// Check if the backend is available.
    async fn health_check(&self) -> LlmResult<bool> {
        match self.complete("ping").await {
            Ok(_) => Ok(true),
            Err(LlmError::ConnectionFailed(_)) | Err(LlmError::AuthenticationFailed) => Ok(false),
            Err(_) => Ok(true),
        }
    }
}

/// A mock backend for testing.
///
/// Answers with the first canned response whose pattern occurs in the
/// prompt, or a generic reply.
pub struct MockBackend {
    config: LlmConfig,
    responses: Vec<(String, String)>,
    offline: bool,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
            responses: Vec::new(),
            offline: false,
        }
    }

    /// A backend whose every call fails with a connection error.
    pub fn unreachable() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    /// Add a canned response for a prompt pattern.
    pub fn with_response(mut self, pattern: &str, response: &str) -> Self {
        self.responses.push((pattern.to_string(), response.to_string()));
        self
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete_with_system(&self, prompt: &str, _system: Option<&str>) -> LlmResult<String> {
        if self.offline {
            return Err(LlmError::ConnectionFailed("mock backend offline".to_string()));
        }
        Ok(self
            .responses
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| "Mock response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let backend = MockBackend::new().with_response("test", "Test response");

        let response = backend.complete("This is a test").await.unwrap();
        assert_eq!(response, "Test response");
        assert_eq!(backend.complete("other").await.unwrap(), "Mock response");
    }

    #[tokio::test]
    async fn test_name_theme_strips_quotes() {
        let backend = MockBackend::new().with_response("Rust Book", "\"Rust Learning\"\n");
        let name = backend
            .name_theme(&["Rust Book".to_string(), "Rustlings".to_string()])
            .await
            .unwrap();
        assert_eq!(name, "Rust Learning");
    }

    #[tokio::test]
    async fn test_extract_entities() {
        let backend = MockBackend::new().with_response(
            "Mozilla",
            r#"[{"name": "Mozilla", "confidence": 0.9}, {"name": "Firefox"}]"#,
        );
        let entities = backend
            .extract_entities("Mozilla ships Firefox")
            .await
            .unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "Mozilla");
        assert_eq!(entities[1].confidence, 1.0);
    }

    #[tokio::test]
    async fn test_extract_entities_parse_error() {
        let backend = MockBackend::new();
        let err = backend.extract_entities("anything").await.unwrap_err();
        assert!(matches!(err, LlmError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(MockBackend::new().health_check().await.unwrap());
        assert!(!MockBackend::unreachable().health_check().await.unwrap());
    }

    #[test]
    fn test_error_maps_to_capability_error() {
        assert!(matches!(
            CapabilityError::from(LlmError::Timeout(5)),
            CapabilityError::Timeout(5000)
        ));
        assert!(matches!(
            CapabilityError::from(LlmError::AuthenticationFailed),
            CapabilityError::Unavailable(_)
        ));
    }

    #[test]
    fn test_config_builders() {
        assert!(LlmConfig::claude().model.contains("claude"));

        let ollama = LlmConfig::ollama().with_temperature(5.0);
        assert!(ollama.model.contains("llama"));
        assert_eq!(ollama.timeout_secs, 60);
        assert_eq!(ollama.temperature, 2.0);
    }
}
