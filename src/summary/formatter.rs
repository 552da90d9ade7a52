use crate::editor::EditorState;
use crate::fields::FieldKind;
use crate::graph::{GraphEdge, GraphNode};
use itertools::Itertools;

/// Renders an editor's graph as a human-readable outline.
pub struct GraphFormatter;

impl GraphFormatter {
    /// Formats all nodes (with their set fields) followed by all edges.
    pub fn format(editor: &EditorState) -> String {
        let mut out = String::new();

        out.push_str(&format!("Nodes ({}):\n", editor.nodes().len()));
        for node in editor.nodes() {
            out.push_str(&Self::format_node(node));
            out.push('\n');
        }

        out.push_str(&format!("Edges ({}):\n", editor.edges().len()));
        for edge in editor.edges() {
            let dangling =
                editor.node(&edge.source).is_none() || editor.node(&edge.target).is_none();
            out.push_str(&Self::format_edge(edge));
            if dangling {
                out.push_str(" [dangling]");
            }
            out.push('\n');
        }

        out
    }

    /// One header line plus one indented line per field that has a value,
    /// in the category's display order.
    pub fn format_node(node: &GraphNode) -> String {
        let mut line = format!(
            "  {} [{}] \"{}\" {} @ {}",
            node.id, node.category, node.label, node.color, node.position
        );
        if node.selected {
            line.push_str(" *");
        }

        let fields = node
            .category
            .fields()
            .iter()
            .filter_map(|spec| {
                node.field(spec.name).map(|value| {
                    format!("    {} = {}", spec.name, Self::format_value(&spec.kind, value))
                })
            })
            .join("\n");

        if fields.is_empty() {
            line
        } else {
            format!("{}\n{}", line, fields)
        }
    }

    pub fn format_edge(edge: &GraphEdge) -> String {
        let mut line = format!("  {}: {} -> {}", edge.id, edge.source, edge.target);
        if edge.selected {
            line.push_str(" *");
        }
        line
    }

    /// Select values are shown with their label; free text is quoted.
    fn format_value(kind: &FieldKind, value: &str) -> String {
        match kind {
            FieldKind::Select(options) => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| format!("{} ({})", o.value, o.label))
                .unwrap_or_else(|| value.to_string()),
            FieldKind::Date => value.to_string(),
            FieldKind::Text | FieldKind::TextArea => format!("{:?}", value),
        }
    }
}
