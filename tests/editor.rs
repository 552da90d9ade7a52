//! Tests for drops, connections, field edits and canvas change notifications.
mod common;
use common::*;
use fhir_arena::prelude::*;

// --- Drops ---

#[test]
fn test_drop_input_at_identity_transform() {
    let mut editor = create_editor();
    let node = editor
        .handle_drop(&DropEvent::palette_item("input", 100.0, 100.0))
        .expect("drop creates a node");

    assert_eq!(node.id, "input-1");
    assert_eq!(node.category, NodeTypeCategory::Input);
    assert_eq!(node.label, "Input");
    assert_eq!(node.color, "#FF6B6B");
    assert_eq!(node.position, Position::new(100.0, 100.0));
    assert!(node.fields.is_empty());
}

#[test]
fn test_drop_fhir_resource() {
    let mut editor = create_editor();
    let node = editor
        .handle_drop(&DropEvent::palette_item("Patient", 50.0, 50.0))
        .unwrap();

    assert_eq!(node.id, "Patient-1");
    assert_eq!(node.category, NodeTypeCategory::Resource);
    assert_eq!(node.label, "Patient");
    assert_eq!(node.color, "#4CAF50");
    assert_eq!(node.position, Position::new(50.0, 50.0));
}

#[test]
fn test_drop_unrecognised_id_falls_back() {
    let mut editor = create_editor();
    let node = editor
        .handle_drop(&DropEvent::palette_item("Zzz", 0.0, 0.0))
        .unwrap();

    assert_eq!(node.id, "Zzz-1");
    assert_eq!(node.palette_id, "Zzz");
    assert_eq!(node.label, "Zzz");
    assert_eq!(node.category, NodeTypeCategory::Resource);
    assert_eq!(node.color, "#000000");
}

#[test]
fn test_drop_uses_configured_fallback_color() {
    let mut editor = create_editor_with(EditorState::builder().fallback_color("#123456"));
    let node = editor
        .handle_drop(&DropEvent::palette_item("Zzz", 0.0, 0.0))
        .unwrap();
    assert_eq!(node.color, "#123456");
}

#[test]
fn test_drop_before_init_is_ignored() {
    let mut editor = EditorState::default();
    assert!(!editor.is_initialized());

    let result = editor.handle_drop(&DropEvent::palette_item("input", 10.0, 10.0));
    assert!(result.is_none());
    assert!(editor.nodes().is_empty());

    editor.init(Viewport::identity()).unwrap();
    let id = drop_item(&mut editor, "input", 10.0, 10.0);
    assert_eq!(id, "input-1", "ignored drops do not consume an ordinal");
}

#[test]
fn test_drop_with_empty_payload_is_ignored() {
    let mut editor = create_editor();
    let drop = DropEvent::new(Position::new(1.0, 1.0), DragPayload::new());
    assert!(editor.handle_drop(&drop).is_none());
    assert!(editor.nodes().is_empty());
}

#[test]
fn test_drop_translates_through_viewport() {
    let mut editor = EditorState::default();
    let viewport = Viewport::new(-200.0, 40.0, 0.5)
        .unwrap()
        .with_origin(Position::new(256.0, 64.0));
    editor.init(viewport).unwrap();

    let screen = Position::new(156.0, 154.0);
    let node = editor
        .handle_drop(&DropEvent::new(screen, DragPayload::for_palette_item("logic")))
        .unwrap();

    assert_eq!(node.position, viewport.screen_to_canvas(screen));
    assert_eq!(node.position, Position::new(200.0, 100.0));
}

#[test]
fn test_drop_after_pan_and_zoom() {
    let mut editor = create_editor();
    editor.pan_by(100.0, 100.0).unwrap();
    editor.zoom_at(2.0, Position::new(100.0, 100.0));

    let viewport = *editor.viewport().unwrap();
    assert_eq!(viewport.zoom, 2.0);

    let id = drop_item(&mut editor, "output", 300.0, 300.0);
    assert_eq!(editor.node(&id).unwrap().position, Position::new(100.0, 100.0));
}

#[test]
fn test_zoom_respects_configured_bounds() {
    let mut editor = create_editor_with(EditorState::builder().zoom_bounds(0.25, 4.0));
    editor.zoom_at(8.0, Position::ORIGIN);
    assert_eq!(editor.viewport().unwrap().zoom, 4.0);
    editor.zoom_at(0.1, Position::ORIGIN);
    assert_eq!(editor.viewport().unwrap().zoom, 0.25);
}

#[test]
fn test_init_rejects_invalid_viewport() {
    let mut editor = EditorState::default();
    let bad = Viewport {
        zoom: 0.0,
        ..Viewport::identity()
    };
    assert!(matches!(editor.init(bad), Err(EditorError::InvalidViewport(_))));
    assert!(!editor.is_initialized());
}

#[test]
fn test_non_finite_pan_and_drop_are_ignored() {
    let mut editor = create_editor();

    let result = editor.pan_by(f64::INFINITY, 0.0);
    assert!(matches!(result, Err(EditorError::InvalidViewport(_))));
    assert!(editor.pan_by(0.0, f64::NAN).is_err());
    let viewport = editor.viewport().expect("canvas is initialised");
    assert!(viewport.validate().is_ok());
    assert_eq!((viewport.x, viewport.y), (0.0, 0.0));

    assert!(
        editor
            .handle_drop(&DropEvent::palette_item("input", f64::NAN, 0.0))
            .is_none()
    );
    assert!(
        editor
            .handle_drop(&DropEvent::palette_item("input", 0.0, f64::NEG_INFINITY))
            .is_none()
    );
    assert!(editor.nodes().is_empty());

    let node = editor
        .handle_drop(&DropEvent::palette_item("input", 10.0, 10.0))
        .expect("finite drop creates a node");
    assert_eq!(node.id, "input-1", "ignored drops do not consume an ordinal");
    assert_eq!(node.position, Position::new(10.0, 10.0));
}

#[test]
fn test_n_drops_produce_ordinals_one_to_n() {
    let mut editor = create_editor();
    let items = ["input", "Patient", "logic", "Zzz", "Observation", "utility"];
    for (i, item) in items.iter().enumerate() {
        drop_item(&mut editor, item, i as f64 * 10.0, 0.0);
    }

    assert_eq!(editor.nodes().len(), items.len());
    for (k, node) in editor.nodes().iter().enumerate() {
        assert_eq!(node.id, format!("{}-{}", items[k], k + 1));
    }
}

#[test]
fn test_drag_over_effect() {
    let mut editor = EditorState::default();
    let payload = DragPayload::for_palette_item("input");
    assert_eq!(editor.drag_over(&payload), DropEffect::None);

    editor.init(Viewport::identity()).unwrap();
    assert_eq!(editor.drag_over(&payload), DropEffect::Move);
    assert_eq!(editor.drag_over(&DragPayload::new()), DropEffect::None);
}

// --- Node ids after deletion ---

#[test]
fn test_monotonic_ids_are_never_reused() {
    let mut editor = create_editor();
    let first = drop_item(&mut editor, "input", 0.0, 0.0);
    let second = drop_item(&mut editor, "input", 0.0, 0.0);
    editor.apply_node_changes([NodeChange::Remove { id: first }]);

    let third = drop_item(&mut editor, "input", 0.0, 0.0);
    assert_eq!(third, "input-3");
    assert_ne!(third, second);
}

#[test]
fn test_collection_length_ids_can_collide_after_deletion() {
    // Reference numbering: count of live nodes plus one. Deleting a node and
    // dropping again reproduces an id that is still in use.
    let mut editor =
        create_editor_with(EditorState::builder().node_ids(NodeIdStrategy::CollectionLength));
    let first = drop_item(&mut editor, "input", 0.0, 0.0);
    let second = drop_item(&mut editor, "input", 0.0, 0.0);
    assert_eq!((first.as_str(), second.as_str()), ("input-1", "input-2"));

    editor.apply_node_changes([NodeChange::Remove { id: first }]);
    let third = drop_item(&mut editor, "input", 0.0, 0.0);

    assert_eq!(third, "input-2");
    let clashes = editor.nodes().iter().filter(|n| n.id == "input-2").count();
    assert_eq!(clashes, 2);
}

// --- Connections ---

#[test]
fn test_connect_appends_one_edge() {
    let mut editor = create_editor();
    let a = drop_item(&mut editor, "input", 0.0, 0.0);
    let b = drop_item(&mut editor, "Patient", 200.0, 0.0);

    let edge = editor.handle_connect(Connection::new(&a, &b)).unwrap();
    assert_eq!(edge.source, a);
    assert_eq!(edge.target, b);
    assert_eq!(edge.id, "edge-input-1-Patient-2");
    assert_eq!(editor.edges().len(), 1);
}

#[test]
fn test_connect_twice_keeps_parallel_edges() {
    let mut editor = create_editor();
    let a = drop_item(&mut editor, "input", 0.0, 0.0);
    let b = drop_item(&mut editor, "logic", 200.0, 0.0);

    let first = editor
        .handle_connect(Connection::new(&a, &b))
        .unwrap()
        .id
        .clone();
    let second = editor
        .handle_connect(Connection::new(&a, &b))
        .unwrap()
        .id
        .clone();
    let third = editor
        .handle_connect(Connection::new(&a, &b))
        .unwrap()
        .id
        .clone();

    assert_eq!(editor.edges().len(), 3);
    assert_eq!(first, "edge-input-1-logic-2");
    assert_eq!(second, "edge-input-1-logic-2#2");
    assert_eq!(third, "edge-input-1-logic-2#3");
    assert!(editor.edges().iter().all(|e| e.source == a && e.target == b));
}

#[test]
fn test_connect_self_loop_is_accepted_by_default() {
    let mut editor = create_editor();
    let a = drop_item(&mut editor, "utility", 0.0, 0.0);

    let edge = editor
        .handle_connect(Connection::new(&a, &a).with_handles("out", "in"))
        .unwrap();
    assert_eq!(edge.source, a);
    assert_eq!(edge.target, a);
    assert_eq!(edge.source_handle.as_deref(), Some("out"));
    assert_eq!(editor.edges().len(), 1);
}

#[test]
fn test_connect_self_loop_rejected_when_configured() {
    let mut editor =
        create_editor_with(EditorState::builder().self_loops(SelfLoopPolicy::Reject));
    let a = drop_item(&mut editor, "utility", 0.0, 0.0);

    let result = editor.handle_connect(Connection::new(&a, &a));
    assert_eq!(result.unwrap_err(), EditorError::SelfLoopRejected(a));
    assert!(editor.edges().is_empty());
}

#[test]
fn test_connect_to_missing_node_fails() {
    let mut editor = create_editor();
    let a = drop_item(&mut editor, "input", 0.0, 0.0);

    let err = editor
        .handle_connect(Connection::new(&a, "Ghost-9"))
        .unwrap_err();
    assert_eq!(
        err,
        EditorError::EndpointNotFound {
            node_id: "Ghost-9".to_string(),
            side: "target",
        }
    );

    let err = editor
        .handle_connect(Connection::new("Ghost-9", &a))
        .unwrap_err();
    assert!(matches!(err, EditorError::EndpointNotFound { side: "source", .. }));
    assert!(editor.edges().is_empty());
}

// --- Field edits ---

#[test]
fn test_field_edit_is_persisted() {
    let mut editor = create_editor();
    let id = drop_item(&mut editor, "input", 0.0, 0.0);

    let edit = editor
        .handle_field_edit(&id, "triggerType", "buttonClick")
        .unwrap();
    assert_eq!(edit, FieldEdit { previous: None, persisted: true });
    assert_eq!(editor.node(&id).unwrap().field("triggerType"), Some("buttonClick"));

    let edit = editor
        .handle_field_edit(&id, "triggerType", "scheduled")
        .unwrap();
    assert_eq!(edit.previous.as_deref(), Some("buttonClick"));
    assert_eq!(editor.node(&id).unwrap().field("triggerType"), Some("scheduled"));
}

#[test]
fn test_field_edit_empty_value_clears() {
    let mut editor = create_editor();
    let id = drop_item(&mut editor, "logic", 0.0, 0.0);
    editor
        .handle_field_edit(&id, "transformation", "toUpperCase")
        .unwrap();

    editor.handle_field_edit(&id, "transformation", "").unwrap();
    assert_eq!(editor.node(&id).unwrap().field("transformation"), None);
}

#[test]
fn test_field_edit_log_only_leaves_node_untouched() {
    // Display-only behavior: the edit is validated and logged, never stored.
    let mut editor =
        create_editor_with(EditorState::builder().field_edits(FieldEditMode::LogOnly));
    let id = drop_item(&mut editor, "output", 0.0, 0.0);

    let edit = editor.handle_field_edit(&id, "outputFormat", "Chart").unwrap();
    assert!(!edit.persisted);
    assert!(editor.node(&id).unwrap().fields.is_empty());

    assert!(editor.handle_field_edit(&id, "outputFormat", "Pie").is_err());
}

#[test]
fn test_field_edit_errors() {
    let mut editor = create_editor();
    let id = drop_item(&mut editor, "Patient", 0.0, 0.0);

    assert_eq!(
        editor.handle_field_edit("Ghost-9", "operation", "read").unwrap_err(),
        EditorError::NodeNotFound("Ghost-9".to_string())
    );
    assert!(matches!(
        editor.handle_field_edit(&id, "triggerType", "onLaunch"),
        Err(EditorError::UnknownField { .. })
    ));
    assert!(matches!(
        editor.handle_field_edit(&id, "operation", "delete"),
        Err(EditorError::InvalidFieldValue { .. })
    ));
    assert!(editor.node(&id).unwrap().fields.is_empty());
}

#[test]
fn test_field_edit_dates() {
    let mut editor = create_editor();
    let id = drop_item(&mut editor, "input", 0.0, 0.0);

    editor.handle_field_edit(&id, "startDate", "2024-01-01").unwrap();
    editor.handle_field_edit(&id, "endDate", "2024-12-31").unwrap();
    assert!(editor.handle_field_edit(&id, "endDate", "31.12.2024").is_err());
    assert_eq!(editor.node(&id).unwrap().field("endDate"), Some("2024-12-31"));
}

// --- Canvas change notifications ---

#[test]
fn test_node_position_changes() {
    let mut editor = create_editor();
    let id = drop_item(&mut editor, "input", 0.0, 0.0);

    let report = editor.apply_node_changes([NodeChange::Position {
        id: id.clone(),
        position: Some(Position::new(40.0, 60.0)),
        dragging: true,
    }]);
    assert_eq!(report.applied, 1);
    let node = editor.node(&id).unwrap();
    assert_eq!(node.position, Position::new(40.0, 60.0));
    assert!(node.dragging);

    editor.apply_node_changes([NodeChange::Position {
        id: id.clone(),
        position: None,
        dragging: false,
    }]);
    let node = editor.node(&id).unwrap();
    assert_eq!(node.position, Position::new(40.0, 60.0));
    assert!(!node.dragging);
}

#[test]
fn test_unknown_ids_in_changes_are_skipped() {
    let mut editor = create_editor();
    drop_item(&mut editor, "input", 0.0, 0.0);

    let report = editor.apply_node_changes([
        NodeChange::Select {
            id: "nope".to_string(),
            selected: true,
        },
        NodeChange::Remove {
            id: "nope".to_string(),
        },
    ]);
    assert_eq!(report.applied, 0);
    assert_eq!(report.skipped, 2);

    let report = editor.apply_edge_changes([EdgeChange::Remove {
        id: "nope".to_string(),
    }]);
    assert_eq!(report.skipped, 1);
    assert_eq!(editor.nodes().len(), 1);
}

#[test]
fn test_node_removal_prunes_connected_edges() {
    let (mut editor, ids) = create_patient_flow();
    assert_eq!(editor.edges().len(), 3);

    let report = editor.apply_node_changes([NodeChange::Remove { id: ids[1].clone() }]);

    assert_eq!(report.applied, 1);
    assert_eq!(
        report.pruned_edges,
        vec!["edge-input-1-Patient-2", "edge-Patient-2-logic-3"]
    );
    assert_eq!(editor.edges().len(), 1);
    assert!(editor.dangling_edges().is_empty());
}

#[test]
fn test_node_removal_can_leave_dangling_edges() {
    let mut editor = create_editor_with(EditorState::builder().prune_dangling_edges(false));
    let a = drop_item(&mut editor, "input", 0.0, 0.0);
    let b = drop_item(&mut editor, "output", 100.0, 0.0);
    editor.handle_connect(Connection::new(&a, &b)).unwrap();

    let report = editor.apply_node_changes([NodeChange::Remove { id: b }]);
    assert!(report.pruned_edges.is_empty());
    assert_eq!(editor.edges().len(), 1);

    let dangling = editor.dangling_edges();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].source, a);
    assert!(GraphFormatter::format(&editor).contains("[dangling]"));
}

#[test]
fn test_edge_select_and_remove() {
    let (mut editor, _) = create_patient_flow();
    let id = editor.edges()[0].id.clone();

    editor.apply_edge_changes([EdgeChange::Select {
        id: id.clone(),
        selected: true,
    }]);
    assert!(editor.edge(&id).unwrap().selected);

    let report = editor.apply_edge_changes([EdgeChange::Remove { id: id.clone() }]);
    assert_eq!(report.applied, 1);
    assert!(editor.edge(&id).is_none());
    assert_eq!(editor.nodes().len(), 4);
}

#[test]
fn test_delete_selected() {
    let (mut editor, ids) = create_patient_flow();
    let last_edge = editor.edges()[2].id.clone();

    editor.apply_node_changes([NodeChange::Select {
        id: ids[0].clone(),
        selected: true,
    }]);
    editor.apply_edge_changes([EdgeChange::Select {
        id: last_edge.clone(),
        selected: true,
    }]);

    let report = editor.delete_selected();
    assert_eq!(report.applied, 2);
    assert_eq!(report.pruned_edges, vec!["edge-input-1-Patient-2"]);
    assert_eq!(editor.nodes().len(), 3);
    assert_eq!(editor.edges().len(), 1);
    assert!(editor.edge(&last_edge).is_none());
}

#[test]
fn test_editors_are_independent() {
    let mut first = create_editor();
    let mut second = create_editor();

    drop_item(&mut first, "input", 0.0, 0.0);
    drop_item(&mut first, "logic", 0.0, 0.0);
    let id = drop_item(&mut second, "Patient", 0.0, 0.0);

    assert_eq!(first.nodes().len(), 2);
    assert_eq!(second.nodes().len(), 1);
    assert_eq!(id, "Patient-1");
}

#[test]
fn test_editor_built_from_config() {
    let config = EditorConfig {
        node_ids: NodeIdStrategy::CollectionLength,
        self_loops: SelfLoopPolicy::Reject,
        field_edits: FieldEditMode::LogOnly,
        prune_dangling_edges: false,
        ..EditorConfig::default()
    };
    let mut editor = EditorState::builder().with_config(config.clone()).build();
    assert_eq!(editor.config(), &config);
    editor.init(Viewport::identity()).unwrap();

    let a = drop_item(&mut editor, "input", 0.0, 0.0);
    let b = drop_item(&mut editor, "Patient", 0.0, 0.0);
    assert!(matches!(
        editor.handle_connect(Connection::new(a.as_str(), a.as_str())),
        Err(EditorError::SelfLoopRejected(_))
    ));
    editor
        .handle_connect(Connection::new(a.as_str(), b.as_str()))
        .unwrap();

    let edit = editor.handle_field_edit(&b, "resourceId", "pat-42").unwrap();
    assert!(!edit.persisted);
    assert!(editor.node(&b).unwrap().field("resourceId").is_none());

    editor.apply_node_changes([NodeChange::Remove { id: a.clone() }]);
    assert_eq!(editor.dangling_edges().len(), 1);

    let c = drop_item(&mut editor, "logic", 0.0, 0.0);
    assert_eq!(c, "logic-2", "collection-length ids follow the node count");
}
