use std::fmt;

/// The closed set of node kinds a palette item can produce.
///
/// The category decides which editable fields a node exposes (see
/// `NodeTypeCategory::fields`). `Resource` is also the category given to drops
/// whose id matches no palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTypeCategory {
    Input,
    Logic,
    Output,
    Utility,
    Resource,
}

impl NodeTypeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeTypeCategory::Input => "input",
            NodeTypeCategory::Logic => "logic",
            NodeTypeCategory::Output => "output",
            NodeTypeCategory::Utility => "utility",
            NodeTypeCategory::Resource => "resource",
        }
    }
}

impl fmt::Display for NodeTypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A draggable item definition shown in the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Stable identifier, also the value carried by the drag payload.
    pub id: String,
    pub label: String,
    /// Display hint only.
    pub color: String,
    pub category: NodeTypeCategory,
}

impl PaletteEntry {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
        category: NodeTypeCategory,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: color.into(),
            category,
        }
    }
}

/// Where a resolved node template came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSource {
    Resource,
    Category,
    /// The id matched neither table.
    Fallback,
}

/// Everything a drop needs to construct a node, resolved from a palette id.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTemplate {
    pub palette_id: String,
    pub category: NodeTypeCategory,
    pub label: String,
    pub color: String,
    pub source: PaletteSource,
}
