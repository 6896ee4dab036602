//! Core embedder trait and types.

use async_trait::async_trait;
use tabgroup_core::error::CoreError;
use tabgroup_core::similarity::cosine_similarity;
use thiserror::Error;

/// Embedding error types.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Text an [`Embedder`] implementation refuses to embed. The built-in
    /// generator accepts any string; other embedders may not.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid embedding config: {0}")]
    InvalidConfig(String),

    /// The feature pipeline produced NaN or infinite values.
    #[error("Feature extraction produced a non-finite value in slot {0}")]
    NonFinite(usize),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EmbeddingError {
    /// Whether the error was caused by caller-supplied input.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            EmbeddingError::InvalidInput(_) | EmbeddingError::InvalidConfig(_) => true,
            EmbeddingError::Core(e) => e.is_invalid_input(),
            EmbeddingError::NonFinite(_) => false,
        }
    }
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Core trait for embedding providers.
///
/// Implementors convert text to fixed-length vectors for similarity
/// comparison. Embedding is async because backends may consult optional
/// external capabilities.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text string.
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Embed multiple texts, one at a time.
    async fn embed_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;

    /// Compute cosine similarity between two vectors.
    fn similarity(&self, a: &[f32], b: &[f32]) -> EmbeddingResult<f32> {
        Ok(cosine_similarity(a, b)?)
    }
}
