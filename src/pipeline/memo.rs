//! Bounded memoization of PDF extraction.
//!
//! Extraction is deterministic over the input bytes, so caching by content
//! is safe. The cache is an explicit value owned by the
//! [`crate::analyze::Analyzer`] (no global state) with FIFO eviction: a
//! session touches a handful of uploads, so recency tracking would buy
//! nothing over insertion order.

use crate::error::ExtractError;
use crate::pipeline::extract::{self, Extraction};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::Hasher;
use tracing::debug;

/// FIFO-bounded memo of successful extractions, keyed by content hash.
///
/// Failed extractions are not cached; they re-run on the next call, which
/// keeps the map small and costs nothing in practice (a corrupt upload is
/// replaced, not retried).
#[derive(Debug)]
pub struct ExtractionCache {
    capacity: usize,
    entries: HashMap<u64, Extraction>,
    order: VecDeque<u64>,
}

impl ExtractionCache {
    /// Create a cache holding at most `capacity` extractions.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Number of cached extractions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a memoized extraction without extracting.
    pub fn get(&self, bytes: &[u8]) -> Option<Extraction> {
        let hit = self.entries.get(&content_hash(bytes)).cloned();
        if hit.is_some() {
            debug!("Extraction cache hit ({} bytes)", bytes.len());
        }
        hit
    }

    /// Memoize an extraction for `bytes`, evicting the oldest entry at
    /// capacity.
    pub fn insert(&mut self, bytes: &[u8], extraction: Extraction) {
        let key = content_hash(bytes);
        if self.entries.contains_key(&key) {
            return;
        }
        if self.entries.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key, extraction);
        self.order.push_back(key);
    }

    /// Return the memoized extraction for `bytes`, extracting on miss.
    ///
    /// Synchronous convenience; the async entry points in
    /// [`crate::analyze`] use [`get`](Self::get)/[`insert`](Self::insert)
    /// around a `spawn_blocking` extraction instead.
    pub fn get_or_extract(&mut self, bytes: &[u8]) -> Result<Extraction, ExtractError> {
        if let Some(hit) = self.get(bytes) {
            return Ok(hit);
        }
        let extraction = extract::extract_report(bytes)?;
        self.insert(bytes, extraction.clone());
        Ok(extraction)
    }
}

fn content_hash(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write(bytes);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(text: &str) -> Extraction {
        Extraction {
            text: text.to_string(),
            page_count: 1,
            skipped_pages: Vec::new(),
        }
    }

    #[test]
    fn insert_then_get_round_trips() {
        let mut cache = ExtractionCache::new(4);
        cache.insert(b"bytes-a", sample("text a"));
        let hit = cache.get(b"bytes-a").unwrap();
        assert_eq!(hit.text, "text a");
        assert!(cache.get(b"bytes-b").is_none());
    }

    #[test]
    fn eviction_is_fifo() {
        let mut cache = ExtractionCache::new(2);
        cache.insert(b"first", sample("1"));
        cache.insert(b"second", sample("2"));
        cache.insert(b"third", sample("3"));

        assert!(cache.get(b"first").is_none(), "oldest entry must be evicted");
        assert!(cache.get(b"second").is_some());
        assert!(cache.get(b"third").is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinserting_same_bytes_does_not_grow() {
        let mut cache = ExtractionCache::new(2);
        cache.insert(b"same", sample("x"));
        cache.insert(b"same", sample("x"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = ExtractionCache::new(4);
        assert!(cache.get_or_extract(b"not a pdf").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn distinct_bytes_hash_differently() {
        assert_ne!(content_hash(b"resume one"), content_hash(b"resume two"));
    }

    #[test]
    fn capacity_floor_is_one() {
        let cache = ExtractionCache::new(0);
        assert_eq!(cache.capacity, 1);
    }
}
