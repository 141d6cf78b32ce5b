// Module declarations
pub mod errors;
pub mod types;
pub mod config;
pub mod similarity_search;
pub mod similarity_matrix;
pub mod group_labeler;
pub mod mmr_selector;
pub mod graph_assembler;
pub mod matrix_cache;
pub mod graph_builder;
pub mod graph_commands;

// Re-exports for commonly used types
pub use errors::{GraphError, GraphResult};
pub use types::{EmbeddedNote, Edge, Graph, GraphLink, GraphStats, Node};
pub use config::GraphConfig;
pub use similarity_matrix::SimilarityMatrix;
pub use graph_builder::{build_graph, build_graph_from_matrix, build_graph_with_config, GraphBuilder};
