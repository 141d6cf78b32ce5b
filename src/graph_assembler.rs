//! Turns merged MMR candidates into the final, degree-capped edge list.

use std::cmp::Ordering;
use crate::mmr_selector::{CandidateEdges, PairKey};
use crate::similarity_matrix::SimilarityMatrix;
use crate::types::{EmbeddedNote, Edge, GraphStats};

/// Score threshold and per-node degree cap applied during assembly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyParams {
    /// Minimum MMR score an edge needs; not clamped
    pub threshold: f32,
    /// Maximum accepted edges touching any node
    pub max_links_per_node: usize,
}

/// Accept candidates strongest-first while respecting the threshold and the cap.
///
/// Candidates are ordered by descending similarity; equal similarities keep
/// ascending pair order. Assembly stops once `node_count * max_links_per_node`
/// edges are accepted.
pub fn assemble_edges(
    candidates: &CandidateEdges,
    node_count: usize,
    params: &AssemblyParams,
) -> Vec<Edge> {
    let cap = params.max_links_per_node;
    let edge_budget = node_count.saturating_mul(cap);
    if edge_budget == 0 {
        return Vec::new();
    }

    let mut ordered: Vec<(&PairKey, f32, f32)> = candidates
        .iter()
        .map(|(key, edge)| (key, edge.similarity, edge.mmr_score))
        .collect();
    ordered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut degree = vec![0usize; node_count];
    let mut edges = Vec::new();

    for (key, similarity, mmr_score) in ordered {
        if mmr_score < params.threshold {
            continue;
        }
        if key.j >= node_count {
            log::warn!("⚠️ Dropping edge {}-{} outside a {}-node graph", key.i, key.j, node_count);
            continue;
        }
        if degree[key.i] >= cap || degree[key.j] >= cap {
            continue;
        }

        edges.push(Edge {
            i: key.i,
            j: key.j,
            similarity,
            mmr_score,
        });
        degree[key.i] += 1;
        degree[key.j] += 1;

        if edges.len() >= edge_budget {
            break;
        }
    }

    edges
}

/// Summary statistics for a note set and its candidate edges
pub fn compute_stats(
    notes: &[EmbeddedNote],
    matrix: &SimilarityMatrix,
    candidates: &CandidateEdges,
) -> GraphStats {
    let max_mmr_score = candidates
        .values()
        .map(|edge| edge.mmr_score)
        .fold(None, |acc: Option<f32>, score| Some(acc.map_or(score, |best| best.max(score))))
        .unwrap_or(0.0);

    GraphStats {
        max_similarity: matrix.max_similarity(),
        max_mmr_score,
        notes_with_embedding: notes.iter().filter(|note| note.has_embedding()).count(),
        pair_count: matrix.pair_count(),
    }
}
