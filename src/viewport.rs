use crate::error::EditorError;
use crate::graph::Position;
use serde::Deserialize;

pub const DEFAULT_MIN_ZOOM: f64 = 0.5;
pub const DEFAULT_MAX_ZOOM: f64 = 2.0;

/// The pan/zoom transform of the canvas.
///
/// A canvas point `c` appears on screen at `origin + (x, y) + c * zoom`, where
/// `origin` is the top-left corner of the canvas element in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    #[serde(default)]
    pub origin: Position,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}

impl Viewport {
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            origin: Position::ORIGIN,
        }
    }

    pub fn new(x: f64, y: f64, zoom: f64) -> Result<Self, EditorError> {
        let viewport = Self {
            x,
            y,
            zoom,
            origin: Position::ORIGIN,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Places the canvas element at `origin` in screen space.
    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(EditorError::InvalidViewport(format!(
                "zoom must be a positive finite number, got {}",
                self.zoom
            )));
        }
        if ![self.x, self.y, self.origin.x, self.origin.y]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(EditorError::InvalidViewport(
                "pan and origin must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Translates a screen point into canvas space.
    pub fn screen_to_canvas(&self, screen: Position) -> Position {
        Position {
            x: (screen.x - self.origin.x - self.x) / self.zoom,
            y: (screen.y - self.origin.y - self.y) / self.zoom,
        }
    }

    /// Translates a canvas point into screen space.
    pub fn canvas_to_screen(&self, canvas: Position) -> Position {
        Position {
            x: canvas.x * self.zoom + self.x + self.origin.x,
            y: canvas.y * self.zoom + self.y + self.origin.y,
        }
    }

    /// Shifts the pan offset. A shift that would leave the pan non-finite is
    /// rejected and the viewport is left unchanged.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Result<(), EditorError> {
        let (x, y) = (self.x + dx, self.y + dy);
        if !x.is_finite() || !y.is_finite() {
            return Err(EditorError::InvalidViewport(format!(
                "pan by ({}, {}) leaves a non-finite offset",
                dx, dy
            )));
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// Zooms to `zoom` (clamped to `[min, max]`) keeping the screen point `anchor` fixed.
    pub fn zoom_at(&mut self, zoom: f64, anchor: Position, min: f64, max: f64) {
        if !zoom.is_finite() || !(min > 0.0 && min <= max) {
            return;
        }
        let next = zoom.clamp(min, max);
        let pinned = self.screen_to_canvas(anchor);
        self.zoom = next;
        self.x = anchor.x - self.origin.x - pinned.x * next;
        self.y = anchor.y - self.origin.y - pinned.y * next;
    }
}
