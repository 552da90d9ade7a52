//! Editor events and ordered replay of event scripts.
//!
//! Every mutation of an [`EditorState`] can be expressed as an [`EditorEvent`].
//! Events are applied one at a time, in the order they are delivered.

use crate::dnd::{DragPayload, DropEvent};
use crate::editor::{EditorState, FieldEdit};
use crate::error::{EditorError, ScriptError};
use crate::graph::{ChangeReport, Connection, EdgeChange, NodeChange, Position};
use crate::viewport::Viewport;
use serde::Deserialize;
use std::fs;

/// One input to the editor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    /// The canvas became available with the given transform.
    Init {
        #[serde(default)]
        viewport: Viewport,
    },
    /// A palette item was released at screen point `(x, y)`.
    ///
    /// `item` is shorthand for a payload carrying that palette id; a raw `payload`
    /// takes precedence when both are present.
    Drop {
        x: f64,
        y: f64,
        #[serde(default)]
        item: Option<String>,
        #[serde(default)]
        payload: Option<DragPayload>,
    },
    Connect(Connection),
    #[serde(rename_all = "camelCase")]
    EditField {
        node_id: String,
        field: String,
        value: String,
    },
    NodeChanges { changes: Vec<NodeChange> },
    EdgeChanges { changes: Vec<EdgeChange> },
    DeleteSelected,
}

/// What a single dispatched event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Initialized,
    /// The id of the created node, or `None` if the drop was ignored.
    Dropped(Option<String>),
    Connected(String),
    FieldEdited(FieldEdit),
    Changed(ChangeReport),
}

impl EditorEvent {
    fn drop_event(x: f64, y: f64, item: Option<&str>, payload: Option<&DragPayload>) -> DropEvent {
        let payload = match (payload, item) {
            (Some(payload), _) => payload.clone(),
            (None, Some(item)) => DragPayload::for_palette_item(item),
            (None, None) => DragPayload::new(),
        };
        DropEvent::new(Position::new(x, y), payload)
    }
}

impl EditorState {
    /// Applies one event to the graph.
    pub fn dispatch(&mut self, event: EditorEvent) -> Result<EventOutcome, EditorError> {
        match event {
            EditorEvent::Init { viewport } => {
                self.init(viewport)?;
                Ok(EventOutcome::Initialized)
            }
            EditorEvent::Drop {
                x,
                y,
                item,
                payload,
            } => {
                let drop = EditorEvent::drop_event(x, y, item.as_deref(), payload.as_ref());
                let id = self.handle_drop(&drop).map(|node| node.id.clone());
                Ok(EventOutcome::Dropped(id))
            }
            EditorEvent::Connect(connection) => {
                let edge = self.handle_connect(connection)?;
                Ok(EventOutcome::Connected(edge.id.clone()))
            }
            EditorEvent::EditField {
                node_id,
                field,
                value,
            } => self
                .handle_field_edit(&node_id, &field, &value)
                .map(EventOutcome::FieldEdited),
            EditorEvent::NodeChanges { changes } => {
                Ok(EventOutcome::Changed(self.apply_node_changes(changes)))
            }
            EditorEvent::EdgeChanges { changes } => {
                Ok(EventOutcome::Changed(self.apply_edge_changes(changes)))
            }
            EditorEvent::DeleteSelected => Ok(EventOutcome::Changed(self.delete_selected())),
        }
    }
}

/// An ordered list of events, typically loaded from a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct EventScript {
    pub events: Vec<EditorEvent>,
}

/// Result of replaying a script.
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub outcomes: Vec<EventOutcome>,
    /// Failed events by their index in the script.
    pub failures: Vec<(usize, EditorError)>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl EventScript {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Applies every event in order. A failing event is recorded and replay continues.
    pub fn replay(&self, editor: &mut EditorState) -> ReplayReport {
        let mut report = ReplayReport::default();
        for (index, event) in self.events.iter().enumerate() {
            match editor.dispatch(event.clone()) {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) => report.failures.push((index, e)),
            }
        }
        report
    }
}
