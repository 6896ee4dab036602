//! Clustering algorithms for grouping similar items.
//!
//! Both algorithms work on a slice of vectors aligned by index with the
//! caller's items, and both take the similarity function as a parameter
//! instead of assuming a metric space. Labels come back aligned the same way.
//!
//! ## Algorithms
//!
//! ### DBSCAN
//!
//! Density-based clustering over a precomputed `n × n` distance matrix where
//! distance is `1 - similarity`. Points without enough neighbors that no
//! dense region reaches are labeled [`NOISE`](crate::types::NOISE) (`-1`).
//! The number of clusters is discovered, not configured.
//!
//! ### K-means
//!
//! Centroid-based partitioning into exactly `k` clusters. Points are assigned
//! to the centroid with the **highest** similarity (similarity is the
//! objective, not a distance). Centroids are plain arithmetic means and are
//! not re-normalized.
//!
//! ## Usage
//!
//! ```rust
//! use tabgroup_core::cluster::{Clustering, Dbscan, KMeans};
//!
//! let data = vec![
//!     vec![1.0, 0.0],
//!     vec![0.99, 0.05],
//!     vec![0.0, 1.0],
//!     vec![0.05, 0.99],
//! ];
//!
//! let labels = Dbscan::new(0.1, 2).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! let labels = KMeans::new(2).with_seed(7).fit_predict(&data).unwrap();
//! assert_eq!(labels[2], labels[3]);
//! ```

mod dbscan;
mod kmeans;

pub use dbscan::Dbscan;
pub use kmeans::KMeans;

use crate::error::CoreResult;
use crate::similarity::cosine_similarity;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Cluster `data` under an injected similarity function.
    ///
    /// Labels are `>= 0` for clusters and `-1` for noise.
    fn fit_predict_with<F>(&self, data: &[Vec<f32>], similarity: F) -> CoreResult<Vec<i32>>
    where
        F: Fn(&[f32], &[f32]) -> CoreResult<f32>;

    /// Cluster `data` under cosine similarity.
    fn fit_predict(&self, data: &[Vec<f32>]) -> CoreResult<Vec<i32>> {
        self.fit_predict_with(data, cosine_similarity)
    }

    /// The configured number of clusters, or 0 when it is discovered (DBSCAN).
    fn n_clusters(&self) -> usize;
}

/// Number of distinct non-noise labels.
pub fn count_clusters(labels: &[i32]) -> usize {
    labels
        .iter()
        .filter(|&&l| l >= 0)
        .max()
        .map(|&m| m as usize + 1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_clusters() {
        assert_eq!(count_clusters(&[]), 0);
        assert_eq!(count_clusters(&[-1, -1]), 0);
        assert_eq!(count_clusters(&[0, 1, -1, 1, 2]), 3);
    }
}
