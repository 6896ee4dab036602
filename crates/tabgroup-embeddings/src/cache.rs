//! Content-addressed embedding cache.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Hex SHA-256 of the text, used as the cache key.
pub fn content_key(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Map from content hash to vector.
///
/// Writes for a given key always carry the same vector, so a racing
/// second insert is harmless. Entries are only removed by [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: RwLock<HashMap<String, Vec<f32>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a vector, counting the hit or miss.
    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        let found = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn insert(&self, key: String, vector: Vec<f32>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, vector);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_key_stable() {
        let a = content_key("hello");
        assert_eq!(a, content_key("hello"));
        assert_ne!(a, content_key("hello "));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_get_insert_clear() {
        let cache = EmbeddingCache::new();
        assert!(cache.get("k").is_none());

        cache.insert("k".to_string(), vec![1.0, 2.0]);
        assert_eq!(cache.get("k"), Some(vec![1.0, 2.0]));
        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                misses: 1
            }
        );

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("k").is_none());
    }
}
