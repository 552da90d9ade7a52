//! The native drag-and-drop channel between the palette and the canvas.
//!
//! A drag carries a small string-keyed data store. Palette items write their id
//! under [`PALETTE_ITEM_FORMAT`]; the canvas reads the same key back on drop.

use crate::graph::Position;
use ahash::AHashMap;
use serde::Deserialize;

/// The single key under which a palette id travels through a drag gesture.
pub const PALETTE_ITEM_FORMAT: &str = "application/reactflow";

/// Data attached to an in-flight drag, keyed by format string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DragPayload {
    data: AHashMap<String, String>,
}

impl DragPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// A payload carrying one palette id.
    pub fn for_palette_item(palette_id: &str) -> Self {
        let mut payload = Self::new();
        payload.set_data(PALETTE_ITEM_FORMAT, palette_id);
        payload
    }

    pub fn set_data(&mut self, format: &str, value: &str) {
        self.data.insert(format.to_string(), value.to_string());
    }

    /// Reads a value back. Missing formats read as the empty string.
    pub fn get_data(&self, format: &str) -> &str {
        self.data.get(format).map(String::as_str).unwrap_or("")
    }

    /// The palette id carried by this payload, if any.
    pub fn palette_item(&self) -> Option<&str> {
        let id = self.get_data(PALETTE_ITEM_FORMAT);
        (!id.is_empty()).then_some(id)
    }
}

/// Feedback shown while a drag hovers the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    None,
    Move,
}

/// The terminal event of a drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    /// Pointer coordinates at release, in screen space.
    pub screen: Position,
    pub payload: DragPayload,
}

impl DropEvent {
    pub fn new(screen: Position, payload: DragPayload) -> Self {
        Self { screen, payload }
    }

    /// Convenience constructor for dropping a palette id at `(x, y)`.
    pub fn palette_item(palette_id: &str, x: f64, y: f64) -> Self {
        Self::new(Position::new(x, y), DragPayload::for_palette_item(palette_id))
    }
}
