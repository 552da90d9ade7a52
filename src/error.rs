use crate::palette::NodeTypeCategory;
use thiserror::Error;

/// Errors raised by mutations on an `EditorState`.
///
/// Drops never fail: an uninitialised canvas or an empty payload is skipped, and an
/// unknown palette id falls back to a generic resource node.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Node '{0}' does not exist in the graph")]
    NodeNotFound(String),

    #[error("Connection endpoint '{node_id}' ({side}) does not exist in the graph")]
    EndpointNotFound { node_id: String, side: &'static str },

    #[error("Self-loop on node '{0}' rejected by the editor configuration")]
    SelfLoopRejected(String),

    #[error("Field '{field}' is not defined for {category} nodes")]
    UnknownField {
        category: NodeTypeCategory,
        field: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidFieldValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),
}

/// Errors that can occur while loading an event script.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to read event script '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse event script JSON: {0}")]
    Json(#[from] serde_json::Error),
}
