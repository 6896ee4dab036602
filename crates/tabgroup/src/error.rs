//! Errors surfaced by the grouping coordinator.

use tabgroup_core::error::CoreError;
use tabgroup_embeddings::EmbeddingError;
use thiserror::Error;

/// Grouping failures that reach the caller.
///
/// Capability failures (analysis, naming) never show up here; they are
/// logged and replaced by fallbacks.
#[derive(Debug, Error)]
pub enum GroupingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

impl GroupingError {
    /// Whether the error was caused by caller-supplied input.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            GroupingError::InvalidInput(_) => true,
            GroupingError::Core(e) => e.is_invalid_input(),
            GroupingError::Embedding(e) => e.is_invalid_input(),
        }
    }
}
