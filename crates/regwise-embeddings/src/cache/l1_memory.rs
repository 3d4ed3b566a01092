//! In-memory embedding cache backed by moka.

use std::time::Duration;

use moka::sync::Cache;

/// L1 embedding cache keyed by content hash.
pub struct L1MemoryCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1MemoryCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();

        Self { cache }
    }

    pub fn get(&self, content_hash: &str) -> Option<Vec<f32>> {
        self.cache.get(content_hash)
    }

    pub fn insert(&self, content_hash: String, embedding: Vec<f32>) {
        self.cache.insert(content_hash, embedding);
    }

    /// Approximate entry count (moka updates it lazily).
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::content_hash;

    #[test]
    fn insert_and_get() {
        let cache = L1MemoryCache::new(16);
        let key = content_hash("key rotation");
        cache.insert(key.clone(), vec![0.5, 0.5]);
        assert_eq!(cache.get(&key), Some(vec![0.5, 0.5]));
    }

    #[test]
    fn miss_returns_none() {
        let cache = L1MemoryCache::new(16);
        assert_eq!(cache.get(&content_hash("absent")), None);
    }

    #[test]
    fn clear_invalidates_entries() {
        let cache = L1MemoryCache::new(16);
        cache.insert("a".to_string(), vec![1.0]);
        cache.clear();
        assert_eq!(cache.get("a"), None);
    }
}
