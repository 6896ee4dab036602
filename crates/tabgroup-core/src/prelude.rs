//! tabgroup Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use tabgroup_core::prelude::*;
//! ```

pub use crate::types::{
    Group, GroupId, GroupingResult, Item, ItemId, RelationshipEdge, Vector, EMBEDDING_DIM, NOISE,
};

pub use crate::similarity::{cosine_similarity, magnitude, to_distance};

pub use crate::cluster::{count_clusters, Clustering, Dbscan, KMeans};

pub use crate::capability::{
    Entity, FallbackNamer, NullAnalyzer, Sentiment, TextAnalysis, TextAnalyzer, ThemeNamer,
};

pub use crate::error::{CapabilityError, CoreError, CoreResult};
