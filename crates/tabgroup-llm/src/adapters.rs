//! Capability adapters that let any [`LlmBackend`] serve as a theme namer
//! or text analyzer.

use async_trait::async_trait;
use tabgroup_core::capability::{TextAnalysis, TextAnalyzer, ThemeNamer};
use tabgroup_core::error::CapabilityError;
use tracing::debug;

use crate::backend::LlmBackend;

/// Names clusters by asking the backend for a short theme.
pub struct LlmThemeNamer<B> {
    backend: B,
}

impl<B: LlmBackend> LlmThemeNamer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: LlmBackend> ThemeNamer for LlmThemeNamer<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    async fn name_cluster(&self, titles: &[String]) -> Result<String, CapabilityError> {
        let theme = self.backend.name_theme(titles).await?;
        debug!(backend = self.backend.name(), %theme, "theme suggested");
        Ok(theme)
    }
}

/// Text analysis backed by LLM entity extraction.
///
/// Sentiment is left empty; only entities are reported.
pub struct LlmTextAnalyzer<B> {
    backend: B,
}

impl<B: LlmBackend> LlmTextAnalyzer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl<B: LlmBackend> TextAnalyzer for LlmTextAnalyzer<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    async fn analyze(&self, text: &str) -> Result<TextAnalysis, CapabilityError> {
        let entities = self.backend.extract_entities(text).await?;
        Ok(TextAnalysis {
            sentiment: None,
            entities: Some(entities),
        })
    }
}
