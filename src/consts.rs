//! Shared constants for the coloring engine.

use crate::color::Color;

// ── Flood fill ──────────────────────────────────────────────────

/// Per-channel ceiling below which a visible pixel counts as line art.
pub const OUTLINE_THRESHOLD: u8 = 30;

/// Default per-channel tolerance against the seed color.
pub const DEFAULT_TOLERANCE: u8 = 10;

/// Initial capacity of the fill work-list.
pub const FILL_STACK_CAPACITY: usize = 4096;

// ── View ────────────────────────────────────────────────────────

/// Smallest allowed view scale.
pub const MIN_SCALE: f64 = 0.5;

/// Largest allowed view scale.
pub const MAX_SCALE: f64 = 3.0;

/// Pinch distances at or below this (screen pixels) are ignored as degenerate.
pub const MIN_PINCH_DISTANCE: f64 = 1.0;

// ── Brush ───────────────────────────────────────────────────────

/// Default brush line width in buffer pixels.
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

/// Smallest selectable brush width.
pub const MIN_BRUSH_SIZE: u32 = 1;

/// Largest selectable brush width.
pub const MAX_BRUSH_SIZE: u32 = 20;

// ── Artwork sizing ──────────────────────────────────────────────

/// Widest the loaded artwork is ever scaled to, in buffer pixels.
pub const MAX_ARTWORK_WIDTH: u32 = 800;

/// Horizontal space left free around the artwork, in CSS pixels.
pub const ARTWORK_MARGIN: u32 = 40;

// ── Eraser ──────────────────────────────────────────────────────

/// Canvas background painted by the eraser.
pub const ERASER_COLOR: Color = Color::WHITE;
