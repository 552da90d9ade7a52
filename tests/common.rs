//! Common test utilities for building editors and graphs.
use fhir_arena::prelude::*;

/// An editor with default configuration and an identity canvas transform.
#[allow(dead_code)]
pub fn create_editor() -> EditorState {
    let mut editor = EditorState::default();
    editor
        .init(Viewport::identity())
        .expect("identity viewport is valid");
    editor
}

/// Same as `create_editor`, but built from a customised builder.
#[allow(dead_code)]
pub fn create_editor_with(builder: EditorBuilder) -> EditorState {
    let mut editor = builder.build();
    editor
        .init(Viewport::identity())
        .expect("identity viewport is valid");
    editor
}

/// Drops a palette item and returns the id of the new node.
#[allow(dead_code)]
pub fn drop_item(editor: &mut EditorState, palette_id: &str, x: f64, y: f64) -> String {
    editor
        .handle_drop(&DropEvent::palette_item(palette_id, x, y))
        .map(|node| node.id.clone())
        .expect("drop on an initialised canvas creates a node")
}

/// A small patient-data flow: input -> Patient -> logic -> output.
///
/// Returns the editor and the node ids in flow order.
#[allow(dead_code)]
pub fn create_patient_flow() -> (EditorState, Vec<String>) {
    let mut editor = create_editor();
    let ids = vec![
        drop_item(&mut editor, "input", 0.0, 0.0),
        drop_item(&mut editor, "Patient", 250.0, 0.0),
        drop_item(&mut editor, "logic", 500.0, 0.0),
        drop_item(&mut editor, "output", 750.0, 0.0),
    ];
    for pair in ids.windows(2) {
        editor
            .handle_connect(Connection::new(&pair[0], &pair[1]))
            .expect("endpoints exist");
    }
    (editor, ids)
}

/// A script exercising every event kind.
#[allow(dead_code)]
pub const SESSION_SCRIPT_JSON: &str = r##"[
    { "type": "drop", "x": 10, "y": 10, "item": "input" },
    { "type": "init", "viewport": { "x": 100, "y": 50, "zoom": 2 } },
    { "type": "drop", "x": 300, "y": 250, "item": "input" },
    { "type": "drop", "x": 500, "y": 250, "payload": { "application/reactflow": "Observation" } },
    { "type": "drop", "x": 700, "y": 250, "payload": {} },
    { "type": "connect", "source": "input-1", "target": "Observation-2" },
    { "type": "connect", "source": "input-1", "target": "Ghost-9" },
    { "type": "editField", "nodeId": "input-1", "field": "triggerType", "value": "scheduled" },
    { "type": "editField", "nodeId": "Observation-2", "field": "operation", "value": "delete" },
    { "type": "nodeChanges", "changes": [
        { "type": "position", "id": "input-1", "position": { "x": 5, "y": 6 }, "dragging": true },
        { "type": "select", "id": "Observation-2", "selected": true },
        { "type": "remove", "id": "missing" }
    ] },
    { "type": "deleteSelected" }
]"##;
