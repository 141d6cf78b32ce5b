//! Pairwise similarity matrix over a note set.
//!
//! The matrix is the only expensive, parameter-independent step of graph
//! construction (O(N² · D)), so it is a standalone value that callers can keep
//! and reuse while only the threshold or link cap changes.

use std::cmp::Ordering;
use serde::Serialize;
use crate::similarity_search::SimilaritySearch;
use crate::types::EmbeddedNote;

/// A defined similarity between notes `i < j`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarPair {
    pub i: usize,
    pub j: usize,
    pub similarity: f32,
}

/// N×N symmetric cosine similarity table.
///
/// Undefined entries are stored as NaN and never leak out of [`get`](Self::get).
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
    pairs: Vec<SimilarPair>,
}

impl SimilarityMatrix {
    /// Compute the similarity of every unordered pair of notes
    pub fn build(notes: &[EmbeddedNote]) -> Self {
        let size = notes.len();
        let mut values = vec![f32::NAN; size * size];
        let mut pairs = Vec::new();

        for i in 0..size {
            values[i * size + i] = 1.0;
        }

        for i in 0..size {
            for j in (i + 1)..size {
                let similarity = match SimilaritySearch::embedding_similarity(
                    notes[i].embedding.as_deref(),
                    notes[j].embedding.as_deref(),
                ) {
                    Ok(similarity) => similarity,
                    Err(_) => continue,
                };

                values[i * size + j] = similarity;
                values[j * size + i] = similarity;
                pairs.push(SimilarPair { i, j, similarity });
            }
        }

        // Pairs were generated in ascending (i, j); the stable sort keeps that as the tie order
        pairs.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });

        log::debug!(
            "🧮 Similarity matrix built: {} notes, {} defined pairs",
            size,
            pairs.len()
        );

        Self { size, values, pairs }
    }

    /// Number of notes (rows) in the matrix
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity of notes `i` and `j`, or `None` when undefined or out of range.
    /// The diagonal is always `Some(1.0)`.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.size || j >= self.size {
            return None;
        }

        let value = self.values[i * self.size + j];
        if value.is_finite() {
            Some(value)
        } else {
            None
        }
    }

    /// All defined pairs, by descending similarity
    pub fn pairs(&self) -> &[SimilarPair] {
        &self.pairs
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Best defined pairwise similarity, 0 when there is none
    pub fn max_similarity(&self) -> f32 {
        self.pairs.first().map_or(0.0, |pair| pair.similarity)
    }
}
