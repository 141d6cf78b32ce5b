//! Note Similarity Graph Construction
//!
//! Builds a bounded, renderable graph from notes with embeddings:
//!
//! 1. **Similarity matrix**: cosine similarity for every pair of embedded notes
//! 2. **Group labels**: stable coloring group per note
//! 3. **MMR selection**: up to `max_links_per_node` diverse neighbours per note
//! 4. **Assembly**: threshold on MMR score, per-node degree cap, statistics
//!
//! Every call is a pure function of its inputs. [`GraphBuilder`] keeps the
//! expensive first step in a [`MatrixCache`] so that moving a threshold or
//! link slider only reruns steps 3 and 4.

use crate::config::GraphConfig;
use crate::graph_assembler::{assemble_edges, compute_stats, AssemblyParams};
use crate::matrix_cache::{MatrixCache, MatrixCacheMetrics};
use crate::mmr_selector::MmrSelector;
use crate::similarity_matrix::SimilarityMatrix;
use crate::types::{EmbeddedNote, Graph, Node};

/// Build the similarity graph for `notes`.
///
/// `threshold` is compared against each edge's MMR score and is used as
/// given. A `max_links_per_node` of 0 yields a graph without edges.
///
/// # Example
///
/// ```rust
/// use notegraph::{build_graph, EmbeddedNote};
///
/// let notes = vec![
///     EmbeddedNote::new("a", "A", "").with_embedding(vec![1.0, 0.0]),
///     EmbeddedNote::new("b", "B", "").with_embedding(vec![1.0, 0.0]),
///     EmbeddedNote::new("c", "C", "").with_embedding(vec![0.0, 1.0]),
/// ];
///
/// let graph = build_graph(&notes, 0.0, 1);
/// assert_eq!(graph.nodes.len(), 3);
/// assert_eq!((graph.edges[0].i, graph.edges[0].j), (0, 1));
/// ```
pub fn build_graph(notes: &[EmbeddedNote], threshold: f32, max_links_per_node: usize) -> Graph {
    build_graph_with_config(notes, &GraphConfig::with_params(threshold, max_links_per_node))
}

/// Build the similarity graph using every setting in `config`
pub fn build_graph_with_config(notes: &[EmbeddedNote], config: &GraphConfig) -> Graph {
    let matrix = SimilarityMatrix::build(notes);
    build_graph_from_matrix(notes, &matrix, config)
}

/// Run the parameter-dependent steps against a precomputed matrix.
///
/// `matrix` must have been built from the same notes, in the same order.
pub fn build_graph_from_matrix(
    notes: &[EmbeddedNote],
    matrix: &SimilarityMatrix,
    config: &GraphConfig,
) -> Graph {
    debug_assert_eq!(notes.len(), matrix.size());

    let nodes: Vec<Node> = notes
        .iter()
        .enumerate()
        .map(|(index, note)| Node::from_note(index, note, config.label_max_chars))
        .collect();

    let selector = MmrSelector::new(config.mmr_lambda, config.max_links_per_node);
    let candidates = selector.select_edges(matrix);

    let params = AssemblyParams {
        threshold: config.threshold,
        max_links_per_node: config.max_links_per_node,
    };
    let edges = assemble_edges(&candidates, nodes.len(), &params);
    let stats = compute_stats(notes, matrix, &candidates);

    log::debug!(
        "🕸️ Graph built: {} nodes, {} edges ({} candidates, threshold {}, max links {})",
        nodes.len(),
        edges.len(),
        candidates.len(),
        config.threshold,
        config.max_links_per_node
    );

    Graph { nodes, edges, stats }
}

/// Graph construction with a memoized similarity matrix
pub struct GraphBuilder {
    config: GraphConfig,
    cache: MatrixCache,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        let cache = MatrixCache::new(config.cache_capacity);
        Self { config, cache }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.config.threshold = threshold;
    }

    pub fn set_max_links_per_node(&mut self, max_links_per_node: usize) {
        self.config.max_links_per_node = max_links_per_node;
    }

    /// Build the graph, reusing the similarity matrix when embeddings are unchanged.
    ///
    /// Output is identical to [`build_graph_with_config`] with the same config.
    pub fn build(&mut self, notes: &[EmbeddedNote]) -> Graph {
        let matrix = self.cache.get_or_build(notes);
        build_graph_from_matrix(notes, &matrix, &self.config)
    }

    pub fn cache_metrics(&self) -> &MatrixCacheMetrics {
        self.cache.metrics()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
