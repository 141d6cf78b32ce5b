use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::errors::{GraphError, GraphResult};
use crate::mmr_selector::{DEFAULT_MAX_LINKS_PER_NODE, DEFAULT_MMR_LAMBDA};
use crate::types::DEFAULT_LABEL_MAX_CHARS;

/// Default minimum MMR score for an edge to be drawn
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Default number of similarity matrices kept by a `GraphBuilder`
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Settings that shape the note graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum MMR score an edge needs (not clamped)
    pub threshold: f32,
    /// Maximum edges touching any node
    pub max_links_per_node: usize,
    /// Relevance weight λ in the MMR score, within [0, 1]
    pub mmr_lambda: f32,
    /// Maximum node label length in characters
    pub label_max_chars: usize,
    /// Similarity matrices kept for parameter-only rebuilds
    pub cache_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_links_per_node: DEFAULT_MAX_LINKS_PER_NODE,
            mmr_lambda: DEFAULT_MMR_LAMBDA,
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl GraphConfig {
    /// Defaults with the two user-facing knobs overridden
    pub fn with_params(threshold: f32, max_links_per_node: usize) -> Self {
        Self {
            threshold,
            max_links_per_node,
            ..Self::default()
        }
    }

    /// Check the settings that would make the MMR score meaningless.
    ///
    /// The threshold range and the link cap are left to the caller.
    pub fn validate(&self) -> GraphResult<()> {
        if !(0.0..=1.0).contains(&self.mmr_lambda) {
            return Err(GraphError::InvalidConfig {
                reason: format!("mmr_lambda must be within [0, 1], got {}", self.mmr_lambda),
            });
        }

        if !self.threshold.is_finite() {
            return Err(GraphError::InvalidConfig {
                reason: format!("threshold must be a finite number, got {}", self.threshold),
            });
        }

        if self.label_max_chars == 0 {
            return Err(GraphError::InvalidConfig {
                reason: "label_max_chars must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Get the graph config file path
pub fn config_file_path() -> GraphResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| GraphError::ConfigIo {
        path: "~".to_string(),
        message: "Could not determine home directory".to_string(),
    })?;

    Ok(home_dir.join(".notegraph").join("graph_config.json"))
}

/// Load a config from `path`, falling back to defaults when the file does not exist
pub fn load_graph_config_from(path: &Path) -> GraphResult<GraphConfig> {
    if !path.exists() {
        log::debug!("📄 No graph config at {:?}, using defaults", path);
        return Ok(GraphConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| GraphError::ConfigIo {
        path: path.display().to_string(),
        message: format!("Failed to read config file: {}", e),
    })?;

    let config: GraphConfig = serde_json::from_str(&content).map_err(|e| GraphError::ConfigParse {
        message: e.to_string(),
    })?;

    config.validate()?;
    Ok(config)
}

/// Save a config to `path`, creating parent directories as needed
pub fn save_graph_config_to(path: &Path, config: &GraphConfig) -> GraphResult<()> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| GraphError::ConfigIo {
                path: parent.display().to_string(),
                message: format!("Failed to create config directory: {}", e),
            })?;
        }
    }

    let content = serde_json::to_string_pretty(config)?;

    fs::write(path, content).map_err(|e| GraphError::ConfigIo {
        path: path.display().to_string(),
        message: format!("Failed to write config file: {}", e),
    })?;

    log::info!("💾 Saved graph config to {:?}", path);
    Ok(())
}

/// Load the user's graph config from the home directory
pub fn load_graph_config() -> GraphResult<GraphConfig> {
    load_graph_config_from(&config_file_path()?)
}

/// Save the user's graph config to the home directory
pub fn save_graph_config(config: &GraphConfig) -> GraphResult<()> {
    save_graph_config_to(&config_file_path()?, config)
}
