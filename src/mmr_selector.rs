//! Maximal Marginal Relevance (MMR) neighbour selection.
//!
//! For every node the selector greedily picks up to `max_links_per_node`
//! neighbours that are relevant to the node but not redundant with each
//! other:
//!
//! ```text
//! relevance(j)  = normalize(sim(i, j))
//! redundancy(j) = max over chosen k of normalize(sim(j, k))   (0 if none chosen)
//! mmr(j)        = λ · relevance(j) − (1 − λ) · redundancy(j)
//! ```
//!
//! Ties on `mmr` go to the higher relevance, then to the lower node index.
//! Each node's round is independent; the picks of all rounds are merged into
//! one map keyed by the canonical (smaller index first) pair.

use std::collections::BTreeMap;
use crate::similarity_matrix::SimilarityMatrix;
use crate::similarity_search::normalize_cosine;

/// Relevance weight used when none is configured
pub const DEFAULT_MMR_LAMBDA: f32 = 0.7;

/// Neighbours selected per node when none is configured
pub const DEFAULT_MAX_LINKS_PER_NODE: usize = 4;

/// Unordered node pair with the smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub i: usize,
    pub j: usize,
}

impl PairKey {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            i: a.min(b),
            j: a.max(b),
        }
    }
}

/// Best similarity and MMR score recorded for a pair across all rounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateEdge {
    pub similarity: f32,
    pub mmr_score: f32,
}

/// Merged selections, iterated in ascending pair order
pub type CandidateEdges = BTreeMap<PairKey, CandidateEdge>;

/// A neighbour chosen during one node's round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub neighbor: usize,
    pub relevance: f32,
    pub mmr_score: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct MmrSelector {
    lambda: f32,
    max_links_per_node: usize,
}

impl Default for MmrSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MMR_LAMBDA, DEFAULT_MAX_LINKS_PER_NODE)
    }
}

impl MmrSelector {
    pub fn new(lambda: f32, max_links_per_node: usize) -> Self {
        Self {
            lambda,
            max_links_per_node,
        }
    }

    pub fn lambda(&self) -> f32 {
        self.lambda
    }

    pub fn max_links_per_node(&self) -> usize {
        self.max_links_per_node
    }

    /// Run the greedy MMR round for `node`, returning picks in selection order.
    pub fn select_for_node(&self, matrix: &SimilarityMatrix, node: usize) -> Vec<Selection> {
        let size = matrix.size();
        if node >= size || self.max_links_per_node == 0 {
            return Vec::new();
        }

        let candidates: Vec<(usize, f32)> = (0..size)
            .filter(|&j| j != node)
            .filter_map(|j| matrix.get(node, j).map(|sim| (j, normalize_cosine(sim))))
            .collect();

        let limit = self.max_links_per_node.min(candidates.len());
        let mut chosen: Vec<Selection> = Vec::with_capacity(limit);
        let mut taken = vec![false; size];

        while chosen.len() < limit {
            let mut best: Option<Selection> = None;

            for &(j, relevance) in &candidates {
                if taken[j] {
                    continue;
                }

                let redundancy = chosen
                    .iter()
                    .filter_map(|picked| matrix.get(j, picked.neighbor))
                    .map(normalize_cosine)
                    .fold(0.0f32, f32::max);

                let mmr_score = self.lambda * relevance - (1.0 - self.lambda) * redundancy;

                let better = match best {
                    None => true,
                    Some(current) => {
                        mmr_score > current.mmr_score
                            || (mmr_score == current.mmr_score && relevance > current.relevance)
                    }
                };

                if better {
                    best = Some(Selection {
                        neighbor: j,
                        relevance,
                        mmr_score,
                    });
                }
            }

            let Some(selection) = best else {
                break;
            };

            taken[selection.neighbor] = true;
            chosen.push(selection);
        }

        chosen
    }

    /// Run every node's round and merge the picks by canonical pair.
    ///
    /// A pair proposed from both endpoints keeps the larger similarity and the
    /// larger MMR score.
    pub fn select_edges(&self, matrix: &SimilarityMatrix) -> CandidateEdges {
        let mut edges = CandidateEdges::new();

        for node in 0..matrix.size() {
            for selection in self.select_for_node(matrix, node) {
                let key = PairKey::new(node, selection.neighbor);
                let similarity = match matrix.get(key.i, key.j) {
                    Some(similarity) => similarity,
                    None => continue,
                };

                edges
                    .entry(key)
                    .and_modify(|edge| {
                        edge.similarity = edge.similarity.max(similarity);
                        edge.mmr_score = edge.mmr_score.max(selection.mmr_score);
                    })
                    .or_insert(CandidateEdge {
                        similarity,
                        mmr_score: selection.mmr_score,
                    });
            }
        }

        log::debug!(
            "🔗 MMR selection produced {} candidate edges (lambda {}, k {})",
            edges.len(),
            self.lambda,
            self.max_links_per_node
        );

        edges
    }
}
