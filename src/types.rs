use serde::{Deserialize, Serialize};
use crate::group_labeler;

/// Label used for notes whose title is missing or blank
pub const UNTITLED_LABEL: &str = "Untitled";

/// Default maximum label length in characters
pub const DEFAULT_LABEL_MAX_CHARS: usize = 80;

/// A note as supplied by the note store. The graph core only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedNote {
    /// Note identifier; nodes fall back to `note-<index>` when absent
    #[serde(default)]
    pub id: Option<String>,
    /// Note title
    #[serde(default)]
    pub title: String,
    /// Note body
    #[serde(default)]
    pub content: String,
    /// Embedding vector computed by the backend, if any
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl EmbeddedNote {
    /// Create a note with an id, title and content but no embedding
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            content: content.into(),
            embedding: None,
        }
    }

    /// Attach an embedding vector
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Whether this note carries a non-empty embedding
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().map_or(false, |e| !e.is_empty())
    }

    /// Text fed to the group labeler
    pub fn group_key(&self) -> String {
        format!("{}|{}", self.title, self.content)
    }
}

/// A graph vertex, one per input note and in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Note id (or synthesized `note-<index>`)
    pub id: String,
    /// Display label
    pub label: String,
    /// Coloring group in [1, GROUP_COUNT]
    pub group: u32,
}

impl Node {
    /// Build the node for the note at `index`
    pub fn from_note(index: usize, note: &EmbeddedNote, label_max_chars: usize) -> Self {
        let id = note
            .id
            .clone()
            .unwrap_or_else(|| format!("note-{}", index));

        Self {
            id,
            label: sanitize_label(&note.title, label_max_chars),
            group: group_labeler::hash_to_group(&note.group_key()),
        }
    }
}

/// Trim the title, replace control characters and cap its length.
pub fn sanitize_label(title: &str, max_chars: usize) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return UNTITLED_LABEL.to_string();
    }

    trimmed
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(max_chars)
        .collect()
}

/// An undirected edge between two node indices, `i < j`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub i: usize,
    pub j: usize,
    /// Raw cosine similarity of the endpoints
    pub similarity: f32,
    /// MMR score under which the edge was selected
    pub mmr_score: f32,
}

/// Summary statistics reported alongside the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    /// Best similarity among all defined pairs, accepted or not
    pub max_similarity: f32,
    /// Best MMR score among selected candidates before thresholding
    pub max_mmr_score: f32,
    /// Notes carrying a non-empty embedding
    pub notes_with_embedding: usize,
    /// Pairs with a defined similarity
    pub pair_count: usize,
}

/// Renderer-facing view of an edge, addressed by node ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub weight: f32,
    pub mmr_score: f32,
}

/// The similarity graph handed to the rendering layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub stats: GraphStats,
}

impl Graph {
    /// Edges expressed as id-addressed links, in edge order.
    /// Edges whose endpoints are not in `nodes` are skipped.
    pub fn links(&self) -> Vec<GraphLink> {
        self.edges
            .iter()
            .filter_map(|edge| {
                let source = self.nodes.get(edge.i)?;
                let target = self.nodes.get(edge.j)?;
                Some(GraphLink {
                    source: source.id.clone(),
                    target: target.id.clone(),
                    weight: edge.similarity,
                    mmr_score: edge.mmr_score,
                })
            })
            .collect()
    }

    /// Position of the node with the given id
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Number of edges touching the node at `index`
    pub fn degree_of(&self, index: usize) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.i == index || edge.j == index)
            .count()
    }
}
