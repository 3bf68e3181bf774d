//! Short-lived read-through cache for paginated form lists.
//!
//! Owned by the client instance rather than module-level state, so
//! independent clients (and tests) get independent caches. There is no
//! locking beyond the map itself: concurrent misses for the same key may
//! both fetch, which is acceptable for idempotent GETs with last-write-wins
//! population.

use aqsform_core::FormsPage;
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct CacheEntry {
    data: FormsPage,
    stored_at: Instant,
}

/// TTL cache keyed by `forms_{page}_{limit}`.
pub struct ListCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    fn key(page: u32, limit: u32) -> String {
        format!("forms_{page}_{limit}")
    }

    /// Returns the cached page for exactly `(page, limit)` if it has not
    /// expired; stale entries are evicted on the way out.
    pub fn get(&self, page: u32, limit: u32) -> Option<FormsPage> {
        let key = Self::key(page, limit);
        let expired = match self.entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(&key);
        }
        None
    }

    pub fn insert(&self, page: u32, limit: u32, data: FormsPage) {
        self.entries.insert(
            Self::key(page, limit),
            CacheEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every entry. Called after a successful submission, which may
    /// change server-side list analytics; precision is traded for
    /// simplicity since totals are not safety-critical.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// All live (non-expired) pages, for serving single-form lookups
    /// without a network call.
    pub fn live_pages(&self) -> Vec<FormsPage> {
        self.entries
            .iter()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.data.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> FormsPage {
        FormsPage {
            forms: vec![],
            pagination: None,
        }
    }

    #[test]
    fn hit_within_ttl() {
        let cache = ListCache::new(Duration::from_secs(60));
        cache.insert(1, 10, page());
        assert!(cache.get(1, 10).is_some());
        // Exact-key match only.
        assert!(cache.get(2, 10).is_none());
        assert!(cache.get(1, 20).is_none());
    }

    #[test]
    fn stale_entries_are_evicted_on_read() {
        let cache = ListCache::new(Duration::from_millis(10));
        cache.insert(1, 10, page());
        std::thread::sleep(Duration::from_millis(25));
        assert!(cache.get(1, 10).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let cache = ListCache::new(Duration::from_secs(60));
        cache.insert(1, 10, page());
        cache.insert(2, 10, page());
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
