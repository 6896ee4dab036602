//! # tabgroup Embeddings
//!
//! Local text embeddings for tabgroup.
//!
//! Text is turned into a fixed-dimension vector without any model:
//! - Term band: hashed token frequencies
//! - N-gram band: hashed character trigram frequencies
//! - Auxiliary band: sentiment, entities and structural features
//!
//! Vectors are L2-normalized and cached by a SHA-256 digest of their text.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tabgroup_embeddings::{EmbeddingGenerator, LexiconAnalyzer};
//!
//! let generator = EmbeddingGenerator::new().with_analyzer(Arc::new(LexiconAnalyzer::new()));
//! let v1 = generator.generate("technology and computers").await?;
//! let v2 = generator.generate("technology and computer systems").await?;
//! let similarity = tabgroup_core::similarity::cosine_similarity(&v1, &v2)?;
//! ```

mod cache;
mod config;
mod embedder;
mod features;
mod generator;
mod lexicon;
mod normalize;

pub use cache::{content_key, CacheStats, EmbeddingCache};
pub use config::EmbeddingConfig;
pub use embedder::{Embedder, EmbeddingError, EmbeddingResult};
pub use features::{clean_text, extract_features, tokenize};
pub use generator::EmbeddingGenerator;
pub use lexicon::LexiconAnalyzer;
pub use normalize::{hash_embedding, normalize_l2};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{normalize_l2, CacheStats, EmbeddingConfig};
    pub use crate::{Embedder, EmbeddingError, EmbeddingResult};
    pub use crate::{EmbeddingGenerator, LexiconAnalyzer};
}
