//! # FHIR Arena - Graph Editing Model
//!
//! **FHIR Arena** is the editing core of a drag-and-drop canvas for prototyping
//! SMART-on-FHIR data-flow apps. Nodes stand for FHIR resources or generic
//! input/logic/output/utility blocks, and edges connect them. The crate keeps the
//! graph in memory and applies user gestures to it; it does not execute, persist or
//! validate the resulting flow.
//!
//! ## Core Workflow
//!
//! 1.  **Build an editor**: `EditorState::builder()` with the built-in palette, or a
//!     `PaletteRegistry` extended with extra resource kinds.
//! 2.  **Initialise the canvas**: `init` attaches the pan/zoom transform. Drops that
//!     arrive before it are ignored.
//! 3.  **Feed gestures**: `handle_drop` turns a palette drag into a node at the drop
//!     point, `handle_connect` appends an edge, `handle_field_edit` updates a node's
//!     form values, and `apply_node_changes`/`apply_edge_changes` move, select or
//!     remove elements.
//! 4.  **Inspect**: read `nodes()`/`edges()` or render an outline with `GraphFormatter`.
//!
//! ## Quick Start
//!
//! ```rust
//! use fhir_arena::prelude::*;
//!
//! fn main() -> std::result::Result<(), EditorError> {
//!     let mut editor = EditorState::builder().build();
//!     editor.init(Viewport::identity())?;
//!
//!     // Drag "input" and "Patient" from the palette onto the canvas.
//!     let source = editor
//!         .handle_drop(&DropEvent::palette_item("input", 100.0, 100.0))
//!         .map(|node| node.id.clone())
//!         .unwrap_or_default();
//!     let target = editor
//!         .handle_drop(&DropEvent::palette_item("Patient", 350.0, 100.0))
//!         .map(|node| node.id.clone())
//!         .unwrap_or_default();
//!     assert_eq!(source, "input-1");
//!     assert_eq!(target, "Patient-2");
//!
//!     // Wire them up and fill in a form field.
//!     editor.handle_connect(Connection::new(&source, &target))?;
//!     editor.handle_field_edit(&target, "operation", "read")?;
//!
//!     println!("{}", GraphFormatter::format(&editor));
//!     Ok(())
//! }
//! ```

pub mod dnd;
pub mod editor;
pub mod error;
pub mod event;
pub mod fields;
pub mod graph;
pub mod palette;
pub mod prelude;
pub mod summary;
pub mod viewport;

pub use editor::EditorState;
pub use palette::PaletteRegistry;
