//! Input model: tools and the drawing-surface state machine.
//!
//! `Tool` captures what a pointer-down on the artwork should do.
//! `SurfaceState` is the single source of truth for what the surface is doing
//! between events, so the rule that a gesture preempts drawing is visible in
//! one enum rather than spread across flags.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::BufferPoint;
use crate::gesture::GestureState;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand stroke in the active color (default).
    #[default]
    Brush,
    /// Freehand stroke in the background color.
    Eraser,
    /// One-shot flood fill at the tapped pixel.
    Fill,
    /// Drag the view; never edits pixels.
    Pan,
}

impl Tool {
    /// Whether this tool draws strokes.
    #[must_use]
    pub fn is_stroke(self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }

    /// CSS cursor the host should show over the artwork.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Fill => "crosshair",
            Self::Pan => "grab",
            Self::Brush | Self::Eraser => "pointer",
        }
    }

    /// Parse the lowercase tool name used by the host UI.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "brush" => Some(Self::Brush),
            "eraser" => Some(Self::Eraser),
            "fill" => Some(Self::Fill),
            "pan" => Some(Self::Pan),
            _ => None,
        }
    }
}

/// What the drawing surface is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    /// Waiting for the next pointer or touch.
    #[default]
    Idle,
    /// A brush or eraser stroke is open.
    Drawing {
        /// Buffer position of the previous stroke point.
        last: BufferPoint,
        /// Whether the stroke has written any pixel yet.
        dirty: bool,
    },
    /// A flood fill is running. Only observable from inside the fill handler.
    Filling,
    /// One touch or the pan tool is dragging the view.
    Panning,
    /// Two touches are zooming the view.
    Pinching,
}

impl SurfaceState {
    /// The surface state implied by a gesture state, if the gesture is active.
    #[must_use]
    pub fn from_gesture(gesture: GestureState) -> Option<Self> {
        match gesture {
            GestureState::Idle => None,
            GestureState::Panning { .. } => Some(Self::Panning),
            GestureState::Pinching { .. } => Some(Self::Pinching),
        }
    }

    /// Whether pointer input is currently owned by a pan or pinch.
    #[must_use]
    pub fn is_gesture(self) -> bool {
        matches!(self, Self::Panning | Self::Pinching)
    }

    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}
