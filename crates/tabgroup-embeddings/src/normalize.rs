//! Vector normalization and the digest-based fallback embedding.

use sha2::{Digest, Sha256};

/// L2 normalize a vector in place.
///
/// A zero-magnitude vector is left untouched rather than divided by zero.
/// The norm is accumulated in f64 so the result is unit length to within
/// f32 rounding.
pub fn normalize_l2(vector: &mut [f32]) {
    let norm = vector
        .iter()
        .map(|&x| (x as f64) * (x as f64))
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v = (*v as f64 / norm) as f32;
        }
    }
}

/// Pure hash embedding used when feature extraction fails.
///
/// Each dimension takes the next SHA-256 digest byte mapped to [-1, 1] as
/// `(byte / 255) * 2 - 1`, cycling through the 32-byte digest.
pub fn hash_embedding(text: &str, dimension: usize) -> Vec<f32> {
    let digest = Sha256::digest(text.as_bytes());
    (0..dimension)
        .map(|i| (digest[i % digest.len()] as f32 / 255.0) * 2.0 - 1.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0, 4.0];
        normalize_l2(&mut v);
        assert!((v[0] - 0.6).abs() < 0.001);
        assert!((v[1] - 0.8).abs() < 0.001);

        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_vector_untouched() {
        let mut v = vec![0.0; 5];
        normalize_l2(&mut v);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_hash_embedding_shape() {
        let v = hash_embedding("some text", 384);
        assert_eq!(v.len(), 384);
        assert!(v.iter().all(|x| (-1.0..=1.0).contains(x)));
        // The digest cycles every 32 slots.
        assert_eq!(v[0], v[32]);
        assert_eq!(v, hash_embedding("some text", 384));
        assert_ne!(v, hash_embedding("other text", 384));
    }
}
