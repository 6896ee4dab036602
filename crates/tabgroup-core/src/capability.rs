//! Ports for optional external collaborators.
//!
//! The embedding pipeline and the grouping coordinator both call out to
//! services that may be slow, absent, or wrong. They are modeled as traits
//! selected at construction time, each with a null implementation that is
//! always safe to use.

use crate::error::CapabilityError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sentiment polarity of a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Sum of word valences.
    pub score: f32,
    /// Score divided by token count.
    pub comparative: f32,
}

/// A named entity mentioned in a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
}

impl Entity {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Output of a text-analysis call. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub sentiment: Option<Sentiment>,
    pub entities: Option<Vec<Entity>>,
}

impl TextAnalysis {
    pub fn is_empty(&self) -> bool {
        self.sentiment.is_none() && self.entities.as_ref().map_or(true, |e| e.is_empty())
    }
}

/// Optional text-analysis capability consumed by the embedding pipeline.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Analyze a text. An error means "unavailable for this call".
    async fn analyze(&self, text: &str) -> Result<TextAnalysis, CapabilityError>;
}

/// Analyzer that never has anything to say.
///
/// Returns an empty analysis, so only structural features end up in the
/// auxiliary band.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnalyzer;

#[async_trait]
impl TextAnalyzer for NullAnalyzer {
    fn name(&self) -> &str {
        "null"
    }

    async fn analyze(&self, _text: &str) -> Result<TextAnalysis, CapabilityError> {
        Ok(TextAnalysis::default())
    }
}

/// Theme-naming collaborator: turns member titles into a short label.
#[async_trait]
pub trait ThemeNamer: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Produce a short theme for a cluster given its members' titles.
    async fn name_cluster(&self, titles: &[String]) -> Result<String, CapabilityError>;
}

/// Namer used when no naming service is configured.
///
/// Always answers with an empty name, which makes callers use their
/// deterministic fallback label.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackNamer;

#[async_trait]
impl ThemeNamer for FallbackNamer {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn name_cluster(&self, _titles: &[String]) -> Result<String, CapabilityError> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_analyzer_is_empty() {
        let result = NullAnalyzer.analyze("anything").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_namer_is_blank() {
        let name = FallbackNamer.name_cluster(&["a".to_string()]).await.unwrap();
        assert!(name.is_empty());
    }

    #[test]
    fn test_entity_confidence_clamped() {
        assert_eq!(Entity::new("Rust", 1.7).confidence, 1.0);
        assert_eq!(Entity::new("Rust", -0.2).confidence, 0.0);
    }

    #[test]
    fn test_analysis_is_empty() {
        assert!(TextAnalysis::default().is_empty());
        let analysis = TextAnalysis {
            sentiment: None,
            entities: Some(vec![]),
        };
        assert!(analysis.is_empty());
    }
}
