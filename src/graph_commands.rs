//! # Graph Commands
//!
//! String-typed entry points for a frontend bridge. Notes arrive as a JSON
//! array, graphs leave as structs or JSON, and every failure is turned into a
//! user-facing message through [`GraphError::user_message`].
//!
//! - `build_note_graph`: parse notes and build the graph
//! - `build_note_graph_json`: same, serialized for the renderer
//! - `load_graph_config_command` / `save_graph_config_command`: persisted settings

use crate::config::{self, GraphConfig};
use crate::errors::{GraphError, GraphResult};
use crate::graph_builder::build_graph_with_config;
use crate::types::{EmbeddedNote, Graph};

fn parse_notes(notes_json: &str) -> GraphResult<Vec<EmbeddedNote>> {
    serde_json::from_str(notes_json).map_err(|e| GraphError::InvalidInput {
        message: format!("expected a JSON array of notes ({})", e),
    })
}

fn build_note_graph_internal(
    notes_json: &str,
    threshold: Option<f32>,
    max_links_per_node: Option<usize>,
) -> GraphResult<Graph> {
    let notes = parse_notes(notes_json)?;

    let defaults = GraphConfig::default();
    let config = GraphConfig::with_params(
        threshold.unwrap_or(defaults.threshold),
        max_links_per_node.unwrap_or(defaults.max_links_per_node),
    );

    Ok(build_graph_with_config(&notes, &config))
}

/// Build the graph for a JSON array of notes.
///
/// Missing parameters fall back to the defaults of [`GraphConfig`].
pub fn build_note_graph(
    notes_json: &str,
    threshold: Option<f32>,
    max_links_per_node: Option<usize>,
) -> Result<Graph, String> {
    build_note_graph_internal(notes_json, threshold, max_links_per_node).map_err(|e| {
        log::warn!("⚠️ Graph build rejected: {}", e);
        e.into()
    })
}

/// Build the graph and serialize it with camelCase field names
pub fn build_note_graph_json(
    notes_json: &str,
    threshold: Option<f32>,
    max_links_per_node: Option<usize>,
) -> Result<String, String> {
    let graph = build_note_graph(notes_json, threshold, max_links_per_node)?;
    serde_json::to_string(&graph).map_err(|e| GraphError::from(e).into())
}

pub fn load_graph_config_command() -> Result<GraphConfig, String> {
    config::load_graph_config().map_err(|e| e.into())
}

pub fn save_graph_config_command(config: GraphConfig) -> Result<(), String> {
    config::save_graph_config(&config).map_err(|e| e.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTES_JSON: &str = r#"[
        {"id": "a", "title": "Knowledge graph note", "content": "Connections reveal patterns.", "embedding": [1.0, 0.0]},
        {"id": "b", "title": "Graph visualization idea", "content": "Show clusters.", "embedding": [0.9, 0.1]},
        {"title": "Gym routine", "content": "Leg day."}
    ]"#;

    #[test]
    fn test_build_note_graph() {
        let graph = build_note_graph(NOTES_JSON, Some(0.0), Some(4)).unwrap();

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.nodes[2].id, "note-2");
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.stats.notes_with_embedding, 2);
        assert_eq!(graph.stats.pair_count, 1);
    }

    #[test]
    fn test_defaults_apply() {
        let with_defaults = build_note_graph(NOTES_JSON, None, None).unwrap();
        let explicit = build_note_graph(NOTES_JSON, Some(0.2), Some(4)).unwrap();

        assert_eq!(with_defaults, explicit);
    }

    #[test]
    fn test_malformed_json_is_error_message() {
        let err = build_note_graph("{\"id\": 1}", None, None).unwrap_err();
        assert!(err.starts_with("The notes could not be read"));

        assert!(build_note_graph_json("not json", None, None).is_err());
    }

    #[test]
    fn test_json_output_is_camel_case() {
        let json = build_note_graph_json(NOTES_JSON, Some(0.0), Some(2)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert!(value["stats"]["notesWithEmbedding"].is_number());
        assert!(value["edges"][0]["mmrScore"].is_number());
    }
}
