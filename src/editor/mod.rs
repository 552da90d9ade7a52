//! The live graph behind the canvas.
//!
//! An [`EditorState`] owns the node and edge collections of one editor and applies
//! every mutation to them. It is a plain value: several editors can coexist, and all
//! mutations take `&mut self`, so there is exactly one writer at a time.

use crate::dnd::{DragPayload, DropEffect, DropEvent};
use crate::error::EditorError;
use crate::graph::{
    ChangeReport, Connection, EdgeChange, GraphEdge, GraphNode, NodeChange, Position,
};
use crate::palette::PaletteRegistry;
use crate::viewport::Viewport;
use ahash::AHashSet;
use tracing::{debug, info, warn};

mod builder;
mod ids;

pub use builder::{EditorBuilder, EditorConfig, FieldEditMode, SelfLoopPolicy};
pub use ids::NodeIdStrategy;

use ids::NodeIdAllocator;

/// The outcome of a successful field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    /// The value the field held before the edit.
    pub previous: Option<String>,
    /// `false` when the editor runs in [`FieldEditMode::LogOnly`].
    pub persisted: bool,
}

/// Node and edge collections of a single editor, plus the canvas transform.
#[derive(Debug, Clone)]
pub struct EditorState {
    palette: PaletteRegistry,
    config: EditorConfig,
    viewport: Option<Viewport>,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    ids: NodeIdAllocator,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EditorState {
    pub fn builder() -> EditorBuilder {
        EditorBuilder::new()
    }

    pub(crate) fn with_parts(palette: PaletteRegistry, config: EditorConfig) -> Self {
        let ids = NodeIdAllocator::new(config.node_ids);
        Self {
            palette,
            config,
            viewport: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            ids,
        }
    }

    pub fn palette(&self) -> &PaletteRegistry {
        &self.palette
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Edges with an endpoint that is not a live node. Always empty while
    /// dangling-edge pruning is enabled.
    pub fn dangling_edges(&self) -> Vec<&GraphEdge> {
        self.edges
            .iter()
            .filter(|e| self.node(&e.source).is_none() || self.node(&e.target).is_none())
            .collect()
    }

    // --- Canvas ---

    /// Attaches the canvas transform. Drops before this call are ignored.
    pub fn init(&mut self, viewport: Viewport) -> Result<(), EditorError> {
        viewport.validate()?;
        debug!(
            "Canvas initialised at pan ({}, {}), zoom {}",
            viewport.x, viewport.y, viewport.zoom
        );
        self.viewport = Some(viewport);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Pans the canvas. No-op before `init`.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Result<(), EditorError> {
        let Some(viewport) = self.viewport.as_mut() else {
            return Ok(());
        };
        viewport.pan_by(dx, dy).inspect_err(|e| warn!("Pan rejected: {}", e))
    }

    /// Zooms around a screen point, clamped to the configured range. No-op before `init`.
    pub fn zoom_at(&mut self, zoom: f64, anchor: Position) {
        let (min, max) = (self.config.min_zoom, self.config.max_zoom);
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.zoom_at(zoom, anchor, min, max);
        }
    }

    // --- Drag and drop ---

    /// Drop feedback while a drag hovers the canvas.
    pub fn drag_over(&self, payload: &DragPayload) -> DropEffect {
        if self.is_initialized() && payload.palette_item().is_some() {
            DropEffect::Move
        } else {
            DropEffect::None
        }
    }

    /// Turns a dropped palette item into a node at the drop point.
    ///
    /// Returns `None` without touching the graph when the canvas is not initialised,
    /// the payload carries no palette id, or the pointer position is not finite.
    /// Unknown ids still produce a node.
    pub fn handle_drop(&mut self, drop: &DropEvent) -> Option<&GraphNode> {
        let Some(viewport) = self.viewport else {
            debug!("Drop ignored: canvas not initialised");
            return None;
        };
        let Some(palette_id) = drop.payload.palette_item() else {
            debug!("Drop ignored: payload carries no palette item");
            return None;
        };

        if !drop.screen.x.is_finite() || !drop.screen.y.is_finite() {
            warn!("Drop ignored: non-finite pointer position {:?}", drop.screen);
            return None;
        }

        let position = viewport.screen_to_canvas(drop.screen);
        let template = self.palette.resolve(palette_id);
        let id = self.ids.next_id(palette_id, self.nodes.len());

        debug!(
            "Dropped '{}' as node {} ({}) at {}",
            palette_id, id, template.category, position
        );
        self.nodes
            .push(GraphNode::from_template(id, template, position));
        self.nodes.last()
    }

    // --- Connections ---

    /// Appends an edge for a completed connect gesture.
    ///
    /// Parallel edges are kept: a repeated gesture gets the same base id with a
    /// `#n` suffix. Self-loops are accepted unless the editor rejects them.
    pub fn handle_connect(&mut self, connection: Connection) -> Result<&GraphEdge, EditorError> {
        if self.node(&connection.source).is_none() {
            warn!("Rejected connection from unknown node {}", connection.source);
            return Err(EditorError::EndpointNotFound {
                node_id: connection.source,
                side: "source",
            });
        }
        if self.node(&connection.target).is_none() {
            warn!("Rejected connection to unknown node {}", connection.target);
            return Err(EditorError::EndpointNotFound {
                node_id: connection.target,
                side: "target",
            });
        }
        if connection.is_self_loop() && self.config.self_loops == SelfLoopPolicy::Reject {
            warn!("Rejected self-loop on node {}", connection.source);
            return Err(EditorError::SelfLoopRejected(connection.source));
        }

        let id = self.unique_edge_id(&connection);
        debug!(
            "Connected {} -> {} as edge {}",
            connection.source, connection.target, id
        );
        self.edges.push(GraphEdge::from_connection(id, connection));
        Ok(&self.edges[self.edges.len() - 1])
    }

    fn unique_edge_id(&self, connection: &Connection) -> String {
        let base = connection.edge_id();
        if self.edge(&base).is_none() {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}#{}", base, n);
            if self.edge(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    // --- Field edits ---

    /// Sets `field` on node `node_id` to `value`. An empty value clears the field.
    ///
    /// The value is checked against the node category's field schema. In
    /// [`FieldEditMode::LogOnly`] the edit is validated and logged but not stored.
    pub fn handle_field_edit(
        &mut self,
        node_id: &str,
        field: &str,
        value: &str,
    ) -> Result<FieldEdit, EditorError> {
        let result = self.apply_field_edit(node_id, field, value);
        match &result {
            Ok(edit) => info!(
                "Node {} field {} changed to: {:?}{}",
                node_id,
                field,
                value,
                if edit.persisted { "" } else { " (not persisted)" }
            ),
            Err(e) => warn!("Field edit on node {} rejected: {}", node_id, e),
        }
        result
    }

    fn apply_field_edit(
        &mut self,
        node_id: &str,
        field: &str,
        value: &str,
    ) -> Result<FieldEdit, EditorError> {
        let mode = self.config.field_edits;
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == node_id)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.to_string()))?;

        let spec = node.category.field(field)?;
        spec.validate(value)?;

        let previous = node.fields.get(spec.name).cloned();
        if mode == FieldEditMode::LogOnly {
            return Ok(FieldEdit {
                previous,
                persisted: false,
            });
        }

        if value.is_empty() {
            node.fields.remove(spec.name);
        } else {
            node.fields.insert(spec.name.to_string(), value.to_string());
        }
        Ok(FieldEdit {
            previous,
            persisted: true,
        })
    }

    // --- Canvas change notifications ---

    /// Applies move/select/remove notifications to nodes, in order.
    pub fn apply_node_changes(
        &mut self,
        changes: impl IntoIterator<Item = NodeChange>,
    ) -> ChangeReport {
        let mut report = ChangeReport::default();
        let mut removed: AHashSet<String> = AHashSet::new();

        for change in changes {
            let Some(node) = self.nodes.iter_mut().find(|n| n.id == change.id()) else {
                debug!("Skipping change for unknown node {}", change.id());
                report.skipped += 1;
                continue;
            };

            match change {
                NodeChange::Position {
                    position, dragging, ..
                } => {
                    if let Some(position) = position {
                        node.position = position;
                    }
                    node.dragging = dragging;
                }
                NodeChange::Select { selected, .. } => node.selected = selected,
                NodeChange::Remove { id } => {
                    self.nodes.retain(|n| n.id != id);
                    debug!("Removed node {}", id);
                    removed.insert(id);
                }
            }
            report.applied += 1;
        }

        if self.config.prune_dangling_edges && !removed.is_empty() {
            let (pruned, kept): (Vec<GraphEdge>, Vec<GraphEdge>) = std::mem::take(&mut self.edges)
                .into_iter()
                .partition(|e| removed.iter().any(|id| e.touches(id)));
            self.edges = kept;
            report.pruned_edges = pruned.into_iter().map(|e| e.id).collect();
            if !report.pruned_edges.is_empty() {
                debug!("Pruned edges {:?}", report.pruned_edges);
            }
        }

        report
    }

    /// Applies select/remove notifications to edges, in order.
    pub fn apply_edge_changes(
        &mut self,
        changes: impl IntoIterator<Item = EdgeChange>,
    ) -> ChangeReport {
        let mut report = ChangeReport::default();

        for change in changes {
            let Some(edge) = self.edges.iter_mut().find(|e| e.id == change.id()) else {
                debug!("Skipping change for unknown edge {}", change.id());
                report.skipped += 1;
                continue;
            };

            match change {
                EdgeChange::Select { selected, .. } => edge.selected = selected,
                EdgeChange::Remove { id } => {
                    self.edges.retain(|e| e.id != id);
                    debug!("Removed edge {}", id);
                }
            }
            report.applied += 1;
        }

        report
    }

    /// Removes every selected edge, then every selected node.
    pub fn delete_selected(&mut self) -> ChangeReport {
        let edge_changes: Vec<EdgeChange> = self
            .edges
            .iter()
            .filter(|e| e.selected)
            .map(|e| EdgeChange::Remove { id: e.id.clone() })
            .collect();
        let node_changes: Vec<NodeChange> = self
            .nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| NodeChange::Remove { id: n.id.clone() })
            .collect();

        let edge_report = self.apply_edge_changes(edge_changes);
        let mut report = self.apply_node_changes(node_changes);
        report.applied += edge_report.applied;
        report.skipped += edge_report.skipped;
        report
    }
}
