//! Similarity utilities for embedding vectors.
//!
//! Cosine similarity is the only similarity the clustering routines are fed
//! by default. [`to_distance`] turns it into an ordering proxy for DBSCAN's
//! neighborhood test; it is not a metric (no triangle inequality) and must
//! not be handed to anything that assumes one.

use crate::error::{CoreError, CoreResult};

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where:
/// - 1.0 = identical direction
/// - 0.0 = orthogonal (or either vector has zero magnitude)
/// - -1.0 = opposite direction
///
/// Fails with [`CoreError::DimensionMismatch`] if the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> CoreResult<f32> {
    if a.len() != b.len() {
        return Err(CoreError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&ai, &bi) in a.iter().zip(b.iter()) {
        dot += ai as f64 * bi as f64;
        norm_a += (ai as f64) * (ai as f64);
        norm_b += (bi as f64) * (bi as f64);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let cos = dot / (norm_a.sqrt() * norm_b.sqrt());
    // Rounding can push |cos| a hair past 1.
    Ok(cos.clamp(-1.0, 1.0) as f32)
}

/// Convert a similarity into a distance-like ordering value: `1 - similarity`.
#[inline]
pub fn to_distance(similarity: f32) -> f32 {
    1.0 - similarity
}

/// Euclidean magnitude of a vector, accumulated in f64.
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter()
        .map(|&x| (x as f64) * (x as f64))
        .sum::<f64>()
        .sqrt() as f32
}

/// Check that every vector shares the dimension of the first one.
///
/// Zero-length vectors are rejected as invalid input.
pub fn ensure_uniform_dimension(vectors: &[Vec<f32>]) -> CoreResult<usize> {
    let Some(first) = vectors.first() else {
        return Ok(0);
    };
    let expected = first.len();
    if expected == 0 {
        return Err(CoreError::InvalidInput(
            "vectors must have at least one dimension".to_string(),
        ));
    }
    for v in vectors {
        if v.len() != expected {
            return Err(CoreError::DimensionMismatch {
                expected,
                found: v.len(),
            });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0];
        let c = vec![0.0, 1.0];
        let d = vec![-1.0, 0.0];

        assert!((cosine_similarity(&a, &b).unwrap() - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &c).unwrap().abs() < 1e-6);
        assert!((cosine_similarity(&a, &d).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_magnitude_independent() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![10.0, 20.0, 30.0];
        assert!((cosine_similarity(&a, &b).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_is_zero_similarity() {
        let zero = vec![0.0; 4];
        let v = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(cosine_similarity(&zero, &v).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            CoreError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_to_distance() {
        assert_eq!(to_distance(1.0), 0.0);
        assert_eq!(to_distance(0.25), 0.75);
        assert_eq!(to_distance(-1.0), 2.0);
    }

    #[test]
    fn test_ensure_uniform_dimension() {
        assert_eq!(ensure_uniform_dimension(&[]).unwrap(), 0);
        assert_eq!(
            ensure_uniform_dimension(&[vec![0.0; 3], vec![1.0; 3]]).unwrap(),
            3
        );
        assert!(ensure_uniform_dimension(&[vec![0.0; 3], vec![1.0; 2]]).is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = ensure_uniform_dimension(&[Vec::<f32>::new(), Vec::new()]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(err.is_invalid_input());
    }
}
