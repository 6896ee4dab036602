//! Configuration for the feature-hash embedding pipeline.

use serde::{Deserialize, Serialize};

use crate::embedder::{EmbeddingError, EmbeddingResult};

/// Smallest band that still fits sentiment, entities and structural slots.
const MIN_BAND_SIZE: usize = 8;

/// Tunables for [`EmbeddingGenerator`](crate::EmbeddingGenerator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Total vector length; split into three equal bands.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Minimum token length (in characters) kept for the term band.
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    /// Character n-gram size for the n-gram band.
    #[serde(default = "default_ngram_size")]
    pub ngram_size: usize,
    /// Text length at which the length feature saturates.
    #[serde(default = "default_length_scale")]
    pub length_scale: f32,
    /// Word count at which the word-count feature saturates.
    #[serde(default = "default_word_scale")]
    pub word_scale: f32,
    /// Token substituted for empty or whitespace-only text.
    #[serde(default = "default_empty_placeholder")]
    pub empty_placeholder: String,
}

fn default_dimension() -> usize { tabgroup_core::types::EMBEDDING_DIM }
fn default_min_token_len() -> usize { 3 }
fn default_ngram_size() -> usize { 3 }
fn default_length_scale() -> f32 { 1000.0 }
fn default_word_scale() -> f32 { 100.0 }
fn default_empty_placeholder() -> String { "empty_content".to_string() }

fn is_positive(x: f32) -> bool {
    x.is_finite() && x > 0.0
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            min_token_len: default_min_token_len(),
            ngram_size: default_ngram_size(),
            length_scale: default_length_scale(),
            word_scale: default_word_scale(),
            empty_placeholder: default_empty_placeholder(),
        }
    }
}

impl EmbeddingConfig {
    /// Set the vector dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the minimum token length.
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    /// Set the placeholder used for blank text.
    pub fn with_empty_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.empty_placeholder = placeholder.into();
        self
    }

    /// Size of each of the three feature bands.
    pub fn band_size(&self) -> usize {
        self.dimension / 3
    }

    /// Reject configurations the pipeline cannot honor.
    pub fn validate(&self) -> EmbeddingResult<()> {
        if self.dimension % 3 != 0 || self.band_size() < MIN_BAND_SIZE {
            return Err(EmbeddingError::InvalidConfig(format!(
                "dimension must be a multiple of 3 and at least {}, got {}",
                MIN_BAND_SIZE * 3,
                self.dimension
            )));
        }
        if self.ngram_size == 0 {
            return Err(EmbeddingError::InvalidConfig(
                "ngram_size must be at least 1".to_string(),
            ));
        }
        if !is_positive(self.length_scale) || !is_positive(self.word_scale) {
            return Err(EmbeddingError::InvalidConfig(
                "length_scale and word_scale must be positive".to_string(),
            ));
        }
        if self.empty_placeholder.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig(
                "empty_placeholder must contain visible characters".to_string(),
            ));
        }
        Ok(())
    }
}
