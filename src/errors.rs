use thiserror::Error;

/// Errors raised by the layers around the graph core (configuration and the
/// JSON command boundary). Graph construction itself never fails.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Config IO error at {path}: {message}")]
    ConfigIo { path: String, message: String },

    #[error("Failed to parse config: {message}")]
    ConfigParse { message: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    /// Create a user-friendly error message for display in the frontend
    pub fn user_message(&self) -> String {
        match self {
            GraphError::ConfigIo { path, message } => {
                format!("Unable to access the graph settings file '{}': {}", path, message)
            }
            GraphError::ConfigParse { message } => {
                format!("The graph settings file is corrupted and could not be read ({}).", message)
            }
            GraphError::InvalidConfig { reason } => {
                format!("The graph settings are not valid: {}.", reason)
            }
            GraphError::InvalidInput { message } => {
                format!("The notes could not be read: {}", message)
            }
            GraphError::Serialization(e) => {
                format!("Failed to encode the graph: {}", e)
            }
        }
    }
}

/// Result type alias for graph configuration and command operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Convert GraphError to String for frontend commands
impl From<GraphError> for String {
    fn from(error: GraphError) -> Self {
        error.user_message()
    }
}
