//! Pairwise similarity, relationship edges and group cohesion.

use tabgroup_core::error::CoreResult;
use tabgroup_core::similarity::cosine_similarity;
use tabgroup_core::types::{ItemId, RelationshipEdge};

/// Upper-triangular pairwise similarity of `n` vectors, row-major.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    pub fn build(vectors: &[&[f32]]) -> CoreResult<Self> {
        let n = vectors.len();
        let mut values = vec![1.0f32; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let s = cosine_similarity(vectors[i], vectors[j])?;
                values[i * n + j] = s;
                values[j * n + i] = s;
            }
        }
        Ok(Self { n, values })
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.n + j]
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Mean similarity over all unordered pairs in `members`; 1.0 below two members.
    pub fn cohesion(&self, members: &[usize]) -> f32 {
        if members.len() < 2 {
            return 1.0;
        }
        let mut sum = 0.0f64;
        let mut pairs = 0usize;
        for (a, &i) in members.iter().enumerate() {
            for &j in &members[a + 1..] {
                sum += self.get(i, j) as f64;
                pairs += 1;
            }
        }
        (sum / pairs as f64) as f32
    }

    /// One edge per pair whose similarity exceeds `threshold`.
    pub fn edges(&self, ids: &[&ItemId], threshold: f32) -> Vec<RelationshipEdge> {
        let mut edges = Vec::new();
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let s = self.get(i, j);
                if s > threshold {
                    edges.push(RelationshipEdge::new(ids[i].clone(), ids[j].clone(), s));
                }
            }
        }
        edges
    }
}
