//! LRU cache of similarity matrices keyed by embedding content.
//!
//! Threshold and link-cap changes do not touch embeddings, so the O(N² · D)
//! similarity pass can be skipped when the same note set is rebuilt with new
//! parameters. Only embeddings participate in the key; editing a title or a
//! body without re-embedding reuses the cached matrix.

use std::num::NonZeroUsize;
use std::sync::Arc;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::similarity_matrix::SimilarityMatrix;
use crate::types::EmbeddedNote;

/// Cache hit/miss statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixCacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

impl MatrixCacheMetrics {
    fn update_hit_rate(&mut self) {
        let total_requests = self.hits + self.misses;
        self.hit_rate = if total_requests > 0 {
            self.hits as f64 / total_requests as f64
        } else {
            0.0
        };
    }
}

/// SHA-256 fingerprint of the embeddings of a note set, in note order
pub fn embedding_fingerprint(notes: &[EmbeddedNote]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((notes.len() as u64).to_le_bytes());

    for note in notes {
        match &note.embedding {
            None => hasher.update([0u8]),
            Some(embedding) => {
                hasher.update([1u8]);
                hasher.update((embedding.len() as u64).to_le_bytes());
                for value in embedding {
                    hasher.update(value.to_bits().to_le_bytes());
                }
            }
        }
    }

    format!("{:x}", hasher.finalize())
}

pub struct MatrixCache {
    cache: LruCache<String, Arc<SimilarityMatrix>>,
    metrics: MatrixCacheMetrics,
}

impl MatrixCache {
    /// Create a cache holding up to `capacity` matrices (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            metrics: MatrixCacheMetrics::default(),
        }
    }

    /// Return the matrix for `notes`, building and caching it on a miss
    pub fn get_or_build(&mut self, notes: &[EmbeddedNote]) -> Arc<SimilarityMatrix> {
        let key = embedding_fingerprint(notes);

        if let Some(matrix) = self.cache.get(&key) {
            self.metrics.hits += 1;
            self.metrics.update_hit_rate();
            log::debug!("🎯 Similarity matrix cache hit ({} notes)", notes.len());
            return Arc::clone(matrix);
        }

        self.metrics.misses += 1;
        log::info!("🔄 Similarity matrix cache miss, rebuilding for {} notes", notes.len());

        let matrix = Arc::new(SimilarityMatrix::build(notes));
        if self.cache.push(key, Arc::clone(&matrix)).is_some() {
            self.metrics.evictions += 1;
        }
        self.metrics.insertions += 1;
        self.metrics.update_hit_rate();

        matrix
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop all cached matrices; metrics are kept
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn metrics(&self) -> &MatrixCacheMetrics {
        &self.metrics
    }
}
