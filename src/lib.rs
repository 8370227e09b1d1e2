//! Raster coloring engine for line-art coloring pages.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns an
//! RGBA copy of the artwork and everything that edits it: tolerance-bounded
//! flood fill that stops at line art, freehand brush and eraser strokes, and
//! a snapshot history for undo, redo, and reset. Touch gestures pan and zoom
//! the view and always take priority over drawing. The host JavaScript layer
//! wires DOM events to the engine and reacts to the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`pixels`] | RGBA pixel buffer and stroke rasterization |
//! | [`fill`] | Flood fill with outline barriers |
//! | [`history`] | Snapshot history with a cursor |
//! | [`gesture`] | Pan and pinch-zoom state machine |
//! | [`input`] | Tools and the drawing-surface state |
//! | [`camera`] | Screen-to-buffer mapping and the view transform |
//! | [`color`] | RGBA color, hex parsing, outline test |
//! | [`palette`] | Seasonal color palettes |
//! | [`config`] | Surface settings from JSON or the environment |
//! | [`render`] | Canvas drawing |
//! | [`consts`] | Shared constants (tolerances, scale limits, brush sizes) |

pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod fill;
pub mod gesture;
pub mod history;
pub mod input;
pub mod palette;
pub mod pixels;
pub mod render;
