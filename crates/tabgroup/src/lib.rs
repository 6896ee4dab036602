//! # tabgroup
//!
//! Group tabs, documents and snippets by local text similarity.
//!
//! Text is fingerprinted locally by a feature-hash embedder, clustered with
//! DBSCAN or K-means, and returned as named, colored groups plus the
//! similarity edges between items. A naming service is optional; without
//! one, clusters are called `"Cluster of N items"`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tabgroup::prelude::*;
//!
//! let coordinator = GroupingCoordinator::default();
//! let mut items = vec![
//!     Item::new("1", "science research laboratory experiment physics"),
//!     Item::new("2", "science research laboratory experiment chemistry"),
//!     Item::new("3", "finance market investment stock banking"),
//! ];
//!
//! let result = coordinator.group(&mut items, &GroupingOptions::dbscan(0.3, 2)).await?;
//! for group in &result.groups {
//!     println!("{} ({}): {} items", group.name, group.color, group.len());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`tabgroup_core`] - Shared types, similarity, DBSCAN and K-means, capability ports
//! - [`tabgroup_embeddings`] - Feature-hash embedding generator and its cache
//! - `tabgroup_llm` - LLM-backed naming and entity extraction (`llm` feature)
//!
//! ## Features
//!
//! - `llm`: LLM adapters with the mock backend
//! - `llm-api`: Claude backend
//! - `llm-local`: Ollama backend
//! - `llm-full`: All LLM backends

mod config;
mod coordinator;
mod error;
mod graph;
mod naming;
mod palette;

pub use config::{ClusterMethod, GroupingOptions, NamingConfig, TabgroupConfig};
pub use coordinator::{auto_k, GroupingCoordinator, SimilarItem};
pub use error::GroupingError;
pub use graph::SimilarityMatrix;
pub use naming::{fallback_name, resolve_name, truncate_title};
pub use palette::{color_for, PALETTE, UNGROUPED_COLOR, UNGROUPED_NAME};

pub use tabgroup_core;
pub use tabgroup_embeddings;

#[cfg(feature = "llm")]
pub use tabgroup_llm;

/// Prelude for convenient imports.
pub mod prelude {
    pub use tabgroup_core::prelude::*;
    pub use tabgroup_embeddings::{EmbeddingConfig, EmbeddingGenerator, LexiconAnalyzer};

    pub use crate::{ClusterMethod, GroupingOptions, NamingConfig, TabgroupConfig};
    pub use crate::{GroupingCoordinator, GroupingError, SimilarItem};

    #[cfg(feature = "llm")]
    pub use tabgroup_llm::{LlmBackend, LlmTextAnalyzer, LlmThemeNamer, MockBackend};
}
