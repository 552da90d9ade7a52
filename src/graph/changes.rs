use super::node::Position;
use serde::Deserialize;

/// A canvas notification about an existing node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeChange {
    /// The node was dragged. `position` is absent on the final event of a drag
    /// that only toggles `dragging` off.
    Position {
        id: String,
        #[serde(default)]
        position: Option<Position>,
        #[serde(default)]
        dragging: bool,
    },
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl NodeChange {
    pub fn id(&self) -> &str {
        match self {
            NodeChange::Position { id, .. }
            | NodeChange::Select { id, .. }
            | NodeChange::Remove { id } => id,
        }
    }
}

/// A canvas notification about an existing edge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl EdgeChange {
    pub fn id(&self) -> &str {
        match self {
            EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => id,
        }
    }
}

/// What applying a batch of changes did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    /// Changes that matched a live element.
    pub applied: usize,
    /// Changes naming an id that is not in the graph.
    pub skipped: usize,
    /// Ids of edges removed because an endpoint node was removed.
    pub pruned_edges: Vec<String>,
}
