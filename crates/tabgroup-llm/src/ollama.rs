//! Ollama backend for local LLM inference.
//!
//! Requires the `local` feature and a running Ollama instance.

use crate::backend::{LlmBackend, LlmConfig, LlmError, LlmResult};
use crate::http;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Ollama API request.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama API response.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Ollama backend for local LLM inference.
///
/// # Example
///
/// ```rust,ignore
/// use tabgroup_llm::{LlmThemeNamer, OllamaBackend};
///
/// let namer = LlmThemeNamer::new(OllamaBackend::localhost()?);
/// ```
pub struct OllamaBackend {
    endpoint: String,
    config: LlmConfig,
    client: reqwest::Client,
}

impl OllamaBackend {
    /// Create a new Ollama backend for an endpoint.
    pub fn new(endpoint: &str) -> LlmResult<Self> {
        Self::with_config(endpoint, LlmConfig::ollama())
    }

    /// Create with custom config.
    pub fn with_config(endpoint: &str, config: LlmConfig) -> LlmResult<Self> {
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: http::client(config.timeout_secs)?,
            config,
        })
    }

    /// Create with default localhost endpoint.
    pub fn localhost() -> LlmResult<Self> {
        Self::new("http://localhost:11434")
    }

    /// Set the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.config.model = model.to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete_with_system(&self, prompt: &str, system: Option<&str>) -> LlmResult<String> {
        let request = OllamaRequest {
            model: &self.config.model,
            prompt,
            system,
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| http::send_error(e, "Ollama", self.config.timeout_secs))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotFound(format!(
                "{} (try `ollama pull {}`)",
                self.config.model, self.config.model
            )));
        }
        if !response.status().is_success() {
            return Err(http::status_error(response, "Ollama").await);
        }

        let resp: OllamaResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(resp.response)
    }

    async fn health_check(&self) -> LlmResult<bool> {
        let url = format!("{}/api/tags", self.endpoint);

        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_config() {
        let backend = OllamaBackend::new("http://localhost:11434/")
            .unwrap()
            .with_model("mistral");
        assert_eq!(backend.config.model, "mistral");
        assert_eq!(backend.endpoint, "http://localhost:11434");
        assert_eq!(backend.config.timeout_secs, 60);
    }

    #[test]
    fn test_request_serialization() {
        let request = OllamaRequest {
            model: "llama3.2",
            prompt: "hi",
            system: None,
            stream: false,
            options: OllamaOptions {
                temperature: 0.0,
                num_predict: 16,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["options"]["num_predict"], 16);
    }
}
