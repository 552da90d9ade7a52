use super::EditorState;
use super::ids::NodeIdStrategy;
use crate::palette::PaletteRegistry;
use crate::viewport::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};

/// Whether a connect gesture may link a node to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfLoopPolicy {
    #[default]
    Allow,
    Reject,
}

/// What a field edit does to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldEditMode {
    /// Validate and store the value on the node.
    #[default]
    Persist,
    /// Validate and log the value, leaving the node untouched.
    LogOnly,
}

/// Behavioral switches of an `EditorState`.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub node_ids: NodeIdStrategy,
    pub self_loops: SelfLoopPolicy,
    pub field_edits: FieldEditMode,
    /// Remove edges whose endpoint node is removed.
    pub prune_dangling_edges: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_ids: NodeIdStrategy::default(),
            self_loops: SelfLoopPolicy::default(),
            field_edits: FieldEditMode::default(),
            prune_dangling_edges: true,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

/// Builder for [`EditorState`].
///
/// ```rust
/// use fhir_arena::prelude::*;
///
/// let editor = EditorState::builder()
///     .node_ids(NodeIdStrategy::CollectionLength)
///     .self_loops(SelfLoopPolicy::Reject)
///     .build();
/// assert!(editor.nodes().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EditorBuilder {
    palette: PaletteRegistry,
    config: EditorConfig,
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: PaletteRegistry) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn node_ids(mut self, strategy: NodeIdStrategy) -> Self {
        self.config.node_ids = strategy;
        self
    }

    pub fn self_loops(mut self, policy: SelfLoopPolicy) -> Self {
        self.config.self_loops = policy;
        self
    }

    pub fn field_edits(mut self, mode: FieldEditMode) -> Self {
        self.config.field_edits = mode;
        self
    }

    pub fn prune_dangling_edges(mut self, prune: bool) -> Self {
        self.config.prune_dangling_edges = prune;
        self
    }

    /// Color of nodes dropped from an unregistered palette id.
    pub fn fallback_color(mut self, color: impl Into<String>) -> Self {
        self.palette = self.palette.with_fallback_color(color);
        self
    }

    /// Sets the zoom range. Bounds that are not positive or out of order are ignored.
    pub fn zoom_bounds(mut self, min: f64, max: f64) -> Self {
        if min.is_finite() && max.is_finite() && min > 0.0 && min <= max {
            self.config.min_zoom = min;
            self.config.max_zoom = max;
        }
        self
    }

    pub fn build(self) -> EditorState {
        EditorState::with_parts(self.palette, self.config)
    }
}
