//! The feature-hash embedding generator.

use async_trait::async_trait;
use std::sync::Arc;
use tabgroup_core::capability::{NullAnalyzer, TextAnalyzer};
use tracing::{debug, warn};

use crate::cache::{content_key, CacheStats, EmbeddingCache};
use crate::config::EmbeddingConfig;
use crate::embedder::{Embedder, EmbeddingResult};
use crate::features::extract_features;
use crate::normalize::{hash_embedding, normalize_l2};

/// Converts text into normalized fixed-dimension vectors without any model.
///
/// Owns its cache; two generators never share vectors. The text-analysis
/// capability is fixed at construction so cached vectors stay consistent.
///
/// # Example
///
/// ```rust,ignore
/// use tabgroup_embeddings::EmbeddingGenerator;
///
/// let generator = EmbeddingGenerator::new();
/// let v = generator.generate("rust async runtimes").await?;
/// assert_eq!(v.len(), 384);
/// ```
pub struct EmbeddingGenerator {
    config: EmbeddingConfig,
    analyzer: Arc<dyn TextAnalyzer>,
    cache: EmbeddingCache,
}

impl EmbeddingGenerator {
    /// Generator with the default 384-dimension config and no analyzer.
    pub fn new() -> Self {
        Self {
            config: EmbeddingConfig::default(),
            analyzer: Arc::new(NullAnalyzer),
            cache: EmbeddingCache::new(),
        }
    }

    /// Generator with a custom config.
    pub fn with_config(config: EmbeddingConfig) -> EmbeddingResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Use a text-analysis capability for the auxiliary band.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self.cache.clear();
        self
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Name of the configured text-analysis capability.
    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Blank text is replaced by the placeholder so the output stays defined.
    fn prepare<'a>(&'a self, text: &'a str) -> &'a str {
        if text.trim().is_empty() {
            &self.config.empty_placeholder
        } else {
            text
        }
    }

    /// Embed one text.
    ///
    /// Deterministic for a given text and analyzer; cache hits return the
    /// stored vector bit-for-bit. Analyzer failures only drop the optional
    /// features, and a failing pipeline falls back to a digest embedding.
    pub async fn generate(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let text = self.prepare(text);
        let key = content_key(text);

        if let Some(vector) = self.cache.get(&key) {
            debug!(key = %&key[..12], "embedding cache hit");
            return Ok(vector);
        }

        let analysis = match self.analyzer.analyze(text).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(
                    analyzer = self.analyzer.name(),
                    error = %e,
                    "text analysis unavailable, using structural features only"
                );
                None
            }
        };

        let mut vector = match extract_features(text, analysis.as_ref(), &self.config) {
            Ok(vector) => vector,
            Err(e) => {
                warn!(error = %e, "feature extraction failed, falling back to hash embedding");
                hash_embedding(text, self.config.dimension)
            }
        };
        normalize_l2(&mut vector);

        debug!(key = %&key[..12], "embedding cache miss");
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    /// Embed several texts sequentially.
    pub async fn generate_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.generate(text).await?);
        }
        Ok(out)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget every cached vector.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for EmbeddingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for EmbeddingGenerator {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        self.generate(text).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<Vec<f32>>> {
        self.generate_batch(texts).await
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn model_name(&self) -> &str {
        "feature-hash"
    }
}
