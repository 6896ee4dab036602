//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance (`1 - similarity`) for two points to be neighbors.
//! - **MinPts**: Minimum neighborhood size, the point itself included, for a core point.
//! - **Core point**: Has at least MinPts neighbors within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border; labeled `-1`.
//!
//! ## Algorithm Steps
//!
//! 1. Precompute the symmetric `n × n` distance matrix.
//! 2. For each unvisited point P:
//!    - Mark visited, find neighbors within ε (P included)
//!    - If |neighbors| < MinPts, leave P unassigned (may become a border point later)
//!    - Else P is core: start a new cluster and expand the frontier
//! 3. Expansion: each frontier point is visited once; core points union their
//!    neighbors into the frontier; unassigned points join the cluster.
//!
//! Border points join whichever cluster reaches them first, so labels of
//! border points depend on input order.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use super::Clustering;
use crate::error::{CoreError, CoreResult};
use crate::similarity::{ensure_uniform_dimension, to_distance};
use crate::types::NOISE;

/// DBSCAN clustering over a similarity function.
#[derive(Debug, Clone)]
pub struct Dbscan {
    /// Maximum distance for neighborhood.
    epsilon: f32,
    /// Minimum neighborhood size (self included) for a core point.
    min_pts: usize,
}

/// Dense row-major `n × n` distance matrix.
struct DistanceMatrix {
    n: usize,
    values: Vec<f32>,
}

impl DistanceMatrix {
    fn build<F>(data: &[Vec<f32>], similarity: &F) -> CoreResult<Self>
    where
        F: Fn(&[f32], &[f32]) -> CoreResult<f32>,
    {
        let n = data.len();
        let mut values = vec![0.0f32; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = to_distance(similarity(&data[i], &data[j])?);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }

        Ok(Self { n, values })
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.n + j]
    }
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// * `epsilon` - Maximum distance (`1 - similarity`) between neighbors.
    /// * `min_pts` - Minimum neighborhood size, the point itself included.
    pub fn new(epsilon: f32, min_pts: usize) -> Self {
        Self { epsilon, min_pts }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Find all points within epsilon of `point_idx`, itself included.
    fn region_query(&self, matrix: &DistanceMatrix, point_idx: usize, out: &mut Vec<usize>) {
        out.clear();
        for other in 0..matrix.n {
            if matrix.get(point_idx, other) <= self.epsilon {
                out.push(other);
            }
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(CoreError::InvalidParameter {
                name: "epsilon",
                message: "must be a finite, non-negative distance",
            });
        }
        if self.min_pts == 0 {
            return Err(CoreError::InvalidParameter {
                name: "min_pts",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for Dbscan {
    fn default() -> Self {
        Self::new(0.3, 2)
    }
}

impl Clustering for Dbscan {
    fn fit_predict_with<F>(&self, data: &[Vec<f32>], similarity: F) -> CoreResult<Vec<i32>>
    where
        F: Fn(&[f32], &[f32]) -> CoreResult<f32>,
    {
        self.validate()?;
        let n = data.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        ensure_uniform_dimension(data)?;

        let matrix = DistanceMatrix::build(data, &similarity)?;

        let mut labels = vec![NOISE; n];
        let mut visited = vec![false; n];
        // Cluster id a point was last queued for, so the frontier stays a set.
        let mut queued_for = vec![NOISE; n];
        let mut frontier: Vec<usize> = Vec::with_capacity(n);
        let mut neighbors: Vec<usize> = Vec::with_capacity(n);
        let mut cluster_id: i32 = 0;

        for point_idx in 0..n {
            if visited[point_idx] {
                continue;
            }
            visited[point_idx] = true;

            self.region_query(&matrix, point_idx, &mut neighbors);
            if neighbors.len() < self.min_pts {
                continue;
            }

            labels[point_idx] = cluster_id;
            frontier.clear();
            for &nb in &neighbors {
                queued_for[nb] = cluster_id;
                frontier.push(nb);
            }

            let mut cursor = 0;
            while cursor < frontier.len() {
                let idx = frontier[cursor];
                cursor += 1;

                if !visited[idx] {
                    visited[idx] = true;
                    self.region_query(&matrix, idx, &mut neighbors);
                    if neighbors.len() >= self.min_pts {
                        for &nb in &neighbors {
                            if queued_for[nb] != cluster_id {
                                queued_for[nb] = cluster_id;
                                frontier.push(nb);
                            }
                        }
                    }
                }

                if labels[idx] == NOISE {
                    labels[idx] = cluster_id;
                }
            }

            cluster_id += 1;
        }

        tracing::debug!(
            points = n,
            clusters = cluster_id,
            noise = labels.iter().filter(|&&l| l == NOISE).count(),
            "dbscan finished"
        );

        Ok(labels)
    }

    /// DBSCAN discovers clusters dynamically, so this returns 0.
    fn n_clusters(&self) -> usize {
        0
    }
}
