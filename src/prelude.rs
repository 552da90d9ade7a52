//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the fhir_arena crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use fhir_arena::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let script = EventScript::from_file("path/to/session.json")?;
//! let mut editor = EditorState::default();
//! let report = script.replay(&mut editor);
//!
//! println!("{} events failed", report.failures.len());
//! println!("{}", GraphFormatter::format(&editor));
//! # Ok(())
//! # }
//! ```

// Editor state and configuration
pub use crate::editor::{
    EditorBuilder, EditorConfig, EditorState, FieldEdit, FieldEditMode, NodeIdStrategy,
    SelfLoopPolicy,
};

// Palette and field schemas
pub use crate::fields::{FieldKind, FieldSpec, SelectOption};
pub use crate::palette::{NodeTemplate, NodeTypeCategory, PaletteEntry, PaletteRegistry, PaletteSource};

// Graph model
pub use crate::graph::{ChangeReport, Connection, EdgeChange, GraphEdge, GraphNode, NodeChange, Position};

// Canvas and drag-and-drop
pub use crate::dnd::{DragPayload, DropEffect, DropEvent, PALETTE_ITEM_FORMAT};
pub use crate::viewport::Viewport;

// Events and scripts
pub use crate::event::{EditorEvent, EventOutcome, EventScript, ReplayReport};

// Output
pub use crate::summary::GraphFormatter;

// Error types
pub use crate::error::{EditorError, ScriptError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
