use crate::palette::{NodeTemplate, NodeTypeCategory};
use ahash::AHashMap;
use serde::Deserialize;
use std::fmt;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", format_coord(self.x), format_coord(self.y))
    }
}

/// Formats a coordinate without a trailing `.0` when it is integral.
fn format_coord(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A typed, positioned box on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// `{palette_id}-{ordinal}`.
    pub id: String,
    /// The raw palette id the node was dropped from.
    pub palette_id: String,
    pub category: NodeTypeCategory,
    pub label: String,
    pub color: String,
    /// Canvas-space position of the node's top-left corner.
    pub position: Position,
    /// Current field values keyed by field name. Unset fields are absent.
    pub fields: AHashMap<String, String>,
    pub selected: bool,
    pub dragging: bool,
}

impl GraphNode {
    pub fn from_template(id: String, template: NodeTemplate, position: Position) -> Self {
        Self {
            id,
            palette_id: template.palette_id,
            category: template.category,
            label: template.label,
            color: template.color,
            position,
            fields: AHashMap::new(),
            selected: false,
            dragging: false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
