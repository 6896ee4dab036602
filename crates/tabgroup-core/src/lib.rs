//! # tabgroup Core
//!
//! Core types, similarity and clustering for tabgroup.
//!
//! - **Types** - items, groups, relationship edges and grouping results
//! - **Similarity** - cosine similarity and the `1 - similarity` distance proxy
//! - **Clustering** - DBSCAN and K-means over an injected similarity function
//! - **Capabilities** - ports for optional text analysis and theme naming
//!
//! ## Quick Start
//!
//! ```rust
//! use tabgroup_core::prelude::*;
//!
//! let a = vec![1.0, 0.0];
//! let b = vec![0.0, 1.0];
//! assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
//!
//! let labels = Dbscan::new(0.3, 2).fit_predict(&[a.clone(), a, b]).unwrap();
//! assert_eq!(labels, vec![0, 0, NOISE]);
//! ```

pub mod capability;
pub mod cluster;
pub mod error;
pub mod prelude;
pub mod similarity;
pub mod types;
