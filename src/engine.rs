//! Drawing surface: routes pointer and touch input to fills, strokes, and
//! gestures, and owns the artwork buffer together with its history.
//!
//! [`EngineCore`] holds every decision and never touches the DOM, so it is
//! tested natively. [`Engine`] wraps it with the canvas element, converting
//! the element's bounding rectangle and drawing the buffer on request.
//!
//! Handlers return a list of [`Action`]s for the host. A fill or completed
//! stroke is one history entry. While a pan or pinch owns the surface no
//! pixel is written.

use tracing::{debug, warn};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::camera::{ElementRect, Point, ViewState, fit_artwork};
use crate::color::{Color, ColorError};
use crate::config::{SurfaceConfig, clamp_brush_size};
use crate::consts::ERASER_COLOR;
use crate::fill::{FillOutcome, FloodFill};
use crate::gesture::GestureController;
use crate::history::{History, Snapshot};
use crate::input::{SurfaceState, Tool};
use crate::pixels::{PixelBuffer, PixelBufferError};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Identifies one loaded artwork in log events.
pub type ArtworkId = Uuid;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The buffer changed; call [`Engine::render`] before the next frame.
    RenderNeeded,
    /// Scale or pan changed; reapply [`ViewState::css_transform`].
    ViewChanged(ViewState),
    /// Undo or redo availability may have changed.
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// Show this CSS cursor over the artwork.
    SetCursor(&'static str),
}

#[derive(Debug, Clone, Copy)]
enum HistoryStep {
    Undo,
    Redo,
    Reset,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
pub struct EngineCore {
    id: ArtworkId,
    config: SurfaceConfig,
    buffer: Option<PixelBuffer>,
    history: History,
    gesture: GestureController,
    filler: FloodFill,
    state: SurfaceState,
    tool: Tool,
    color: Color,
    brush_size: u32,
    tolerance: u8,
    render_pending: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(SurfaceConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a surface from validated settings.
    #[must_use]
    pub fn with_config(config: SurfaceConfig) -> Self {
        let history = config.history_limit.map_or_else(History::new, History::with_limit);
        Self {
            id: Uuid::new_v4(),
            buffer: None,
            history,
            gesture: GestureController::new(config.min_scale, config.max_scale),
            filler: FloodFill::new(),
            state: SurfaceState::Idle,
            tool: Tool::default(),
            color: Color::default(),
            brush_size: clamp_brush_size(config.brush_size),
            tolerance: config.tolerance,
            render_pending: false,
            config,
        }
    }

    // --- Artwork ---

    /// Replace the artwork. History restarts with the loaded pixels as its
    /// only entry, and any open stroke or gesture is dropped.
    pub fn load_artwork(&mut self, buffer: PixelBuffer) -> Vec<Action> {
        self.id = Uuid::new_v4();
        debug!(artwork = %self.id, width = buffer.width(), height = buffer.height(), "artwork loaded");
        self.history.clear();
        self.history.push(Snapshot::capture(&buffer));
        self.buffer = Some(buffer);
        self.state = SurfaceState::Idle;
        self.gesture.cancel();
        let mut actions = vec![self.history_changed()];
        self.request_render(&mut actions);
        actions
    }

    /// Load artwork from raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns the [`PixelBufferError`] from [`PixelBuffer::from_rgba`]; the
    /// current artwork is kept.
    pub fn load_rgba(&mut self, width: u32, height: u32, data: Vec<u8>) -> Result<Vec<Action>, PixelBufferError> {
        match PixelBuffer::from_rgba(width, height, data) {
            Ok(buffer) => Ok(self.load_artwork(buffer)),
            Err(err) => {
                warn!(artwork = %self.id, error = %err, "artwork rejected");
                Err(err)
            }
        }
    }

    /// Buffer size for an image of `image_width` x `image_height` shown in a
    /// viewport `viewport_width` CSS pixels wide.
    #[must_use]
    pub fn fit_size(&self, image_width: u32, image_height: u32, viewport_width: f64) -> Option<(u32, u32)> {
        fit_artwork(
            image_width,
            image_height,
            viewport_width,
            self.config.max_artwork_width,
            self.config.artwork_margin,
        )
    }

    // --- Tool settings ---

    /// Switch tools. An open stroke is committed first.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let mut actions = self.finish_stroke();
        if self.tool != tool {
            debug!(artwork = %self.id, ?tool, "tool changed");
        }
        self.tool = tool;
        actions.push(Action::SetCursor(tool.cursor()));
        actions
    }

    /// Set the fill and brush color. Alpha is forced opaque.
    pub fn set_color(&mut self, color: Color) {
        self.color = color.opaque();
    }

    /// Set the color from `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] if `hex` is not a valid color; the current color is kept.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        self.color = Color::from_hex(hex)?;
        Ok(())
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = clamp_brush_size(size);
    }

    pub fn set_tolerance(&mut self, tolerance: u8) {
        self.tolerance = tolerance;
    }

    // --- Pointer input (mouse, pen, single touch) ---

    pub fn on_pointer_down(&mut self, screen: Point, rect: ElementRect) -> Vec<Action> {
        if self.buffer.is_none() || self.state != SurfaceState::Idle {
            return Vec::new();
        }
        match self.tool {
            Tool::Pan => {
                self.gesture.touch_start(&[screen], true);
                self.sync_gesture_state();
                Vec::new()
            }
            Tool::Fill => self.fill_at(screen, rect),
            Tool::Brush | Tool::Eraser => self.begin_stroke(screen, rect),
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point, rect: ElementRect) -> Vec<Action> {
        match self.state {
            SurfaceState::Drawing { .. } => self.extend_stroke(screen, rect),
            SurfaceState::Panning => self.gesture_moved(&[screen]),
            _ => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.state.is_gesture() {
            self.gesture.touch_end(&[]);
            self.sync_gesture_state();
            return Vec::new();
        }
        self.release_stroke()
    }

    /// Leaving the element ends the stroke the same way releasing does.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Touch input ---

    /// `touches` is every touch now on the surface.
    pub fn on_touch_start(&mut self, touches: &[Point], rect: ElementRect) -> Vec<Action> {
        if self.buffer.is_none() {
            return Vec::new();
        }
        match touches {
            [] => Vec::new(),
            [only] if !self.gesture.is_active() => self.on_pointer_down(*only, rect),
            [_] => {
                self.gesture.touch_start(touches, true);
                self.sync_gesture_state();
                Vec::new()
            }
            _ => {
                let actions = self.abort_stroke();
                self.gesture.touch_start(touches, false);
                self.sync_gesture_state();
                actions
            }
        }
    }

    pub fn on_touch_move(&mut self, touches: &[Point], rect: ElementRect) -> Vec<Action> {
        if self.gesture.is_active() {
            return self.gesture_moved(touches);
        }
        match touches {
            [only] if self.state.is_drawing() => self.extend_stroke(*only, rect),
            _ => Vec::new(),
        }
    }

    /// `remaining` is every touch still on the surface.
    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        if self.gesture.is_active() {
            self.gesture.touch_end(remaining);
            self.sync_gesture_state();
            return Vec::new();
        }
        if remaining.is_empty() { self.release_stroke() } else { Vec::new() }
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        self.step_history(HistoryStep::Undo)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        self.step_history(HistoryStep::Redo)
    }

    /// Restore the artwork as loaded. Later entries stay available to redo.
    pub fn reset_to_start(&mut self) -> Vec<Action> {
        self.step_history(HistoryStep::Reset)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- View ---

    pub fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        if self.gesture.zoom_by(factor) { vec![Action::ViewChanged(self.gesture.view())] } else { Vec::new() }
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.gesture.reset_view();
        if self.state.is_gesture() {
            self.state = SurfaceState::Idle;
        }
        vec![Action::ViewChanged(self.gesture.view())]
    }

    // --- Render ---

    /// Clear the pending render flag, returning whether a draw was requested.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_pending)
    }

    // --- Queries ---

    #[must_use]
    pub fn id(&self) -> ArtworkId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.gesture.view()
    }

    #[must_use]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    #[must_use]
    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    // --- Internals ---

    /// Fill at the tapped pixel. Only a fill that recolors something becomes a
    /// history entry, so an outline tap or a repeated fill neither adds an undo
    /// step nor discards redo.
    fn fill_at(&mut self, screen: Point, rect: ElementRect) -> Vec<Action> {
        let Some(buffer) = self.buffer.as_mut() else {
            return Vec::new();
        };
        let Some(seed) = rect.to_buffer(screen, buffer.width(), buffer.height()) else {
            return Vec::new();
        };
        self.state = SurfaceState::Filling;
        let outcome = self.filler.fill(buffer, seed, self.color, self.tolerance);
        self.state = SurfaceState::Idle;
        debug!(artwork = %self.id, x = seed.x, y = seed.y, ?outcome, "fill");
        match outcome {
            FillOutcome::Filled { .. } => self.commit("fill"),
            _ => Vec::new(),
        }
    }

    fn begin_stroke(&mut self, screen: Point, rect: ElementRect) -> Vec<Action> {
        let Some(buffer) = self.buffer.as_ref() else {
            return Vec::new();
        };
        if let Some(at) = rect.to_buffer(screen, buffer.width(), buffer.height()) {
            self.state = SurfaceState::Drawing { last: at, dirty: false };
        }
        Vec::new()
    }

    fn extend_stroke(&mut self, screen: Point, rect: ElementRect) -> Vec<Action> {
        let SurfaceState::Drawing { last, dirty } = self.state else {
            return Vec::new();
        };
        let color = if self.tool == Tool::Eraser { ERASER_COLOR } else { self.color };
        let width = self.brush_size;
        let Some(buffer) = self.buffer.as_mut() else {
            return Vec::new();
        };
        let Some(to) = rect.to_buffer(screen, buffer.width(), buffer.height()) else {
            return Vec::new();
        };
        let written = buffer.stroke_segment(last, to, width, color);
        self.state = SurfaceState::Drawing { last: to, dirty: dirty || written > 0 };
        let mut actions = Vec::new();
        if written > 0 {
            self.request_render(&mut actions);
        }
        actions
    }

    /// Pointer released: a stroke that never moved leaves a single dab, then
    /// the stroke is closed.
    fn release_stroke(&mut self) -> Vec<Action> {
        if let SurfaceState::Drawing { last, dirty: false } = self.state {
            let color = if self.tool == Tool::Eraser { ERASER_COLOR } else { self.color };
            let width = self.brush_size;
            if let Some(buffer) = self.buffer.as_mut() {
                let written = buffer.stamp(last, width, color);
                self.state = SurfaceState::Drawing { last, dirty: written > 0 };
            }
        }
        self.finish_stroke()
    }

    /// Close an open stroke, committing it if it wrote anything.
    fn finish_stroke(&mut self) -> Vec<Action> {
        let SurfaceState::Drawing { dirty, .. } = self.state else {
            return Vec::new();
        };
        self.state = SurfaceState::Idle;
        if dirty { self.commit("stroke") } else { Vec::new() }
    }

    /// Drop an open stroke, restoring the last committed pixels.
    fn abort_stroke(&mut self) -> Vec<Action> {
        let SurfaceState::Drawing { dirty, .. } = self.state else {
            return Vec::new();
        };
        self.state = SurfaceState::Idle;
        if !dirty {
            return Vec::new();
        }
        let (Some(buffer), Some(snapshot)) = (self.buffer.as_mut(), self.history.current()) else {
            return Vec::new();
        };
        if !snapshot.restore_into(buffer) {
            warn!(artwork = %self.id, "snapshot does not match the artwork size");
        }
        debug!(artwork = %self.id, "stroke discarded for gesture");
        let mut actions = Vec::new();
        self.request_render(&mut actions);
        actions
    }

    /// Record the buffer as a new history entry. Callers only commit edits
    /// that wrote pixels, so `can_undo` reflects visible changes rather than
    /// every completed fill or stroke.
    fn commit(&mut self, edit: &'static str) -> Vec<Action> {
        let Some(buffer) = self.buffer.as_ref() else {
            return Vec::new();
        };
        self.history.push(Snapshot::capture(buffer));
        debug!(artwork = %self.id, edit, cursor = ?self.history.cursor(), entries = self.history.len(), "history push");
        let mut actions = vec![self.history_changed()];
        self.request_render(&mut actions);
        actions
    }

    fn step_history(&mut self, step: HistoryStep) -> Vec<Action> {
        let mut actions = self.finish_stroke();
        let Some(buffer) = self.buffer.as_mut() else {
            return actions;
        };
        let snapshot = match step {
            HistoryStep::Undo => self.history.undo(),
            HistoryStep::Redo => self.history.redo(),
            HistoryStep::Reset => self.history.reset_to_start(),
        };
        let Some(snapshot) = snapshot else {
            return actions;
        };
        if !snapshot.restore_into(buffer) {
            warn!(artwork = %self.id, ?step, "snapshot does not match the artwork size");
        }
        debug!(artwork = %self.id, ?step, cursor = ?self.history.cursor(), "history step");
        actions.push(self.history_changed());
        self.request_render(&mut actions);
        actions
    }

    fn gesture_moved(&mut self, touches: &[Point]) -> Vec<Action> {
        if self.gesture.touch_move(touches) { vec![Action::ViewChanged(self.gesture.view())] } else { Vec::new() }
    }

    fn sync_gesture_state(&mut self) {
        self.state = SurfaceState::from_gesture(self.gesture.state()).unwrap_or_default();
    }

    fn history_changed(&self) -> Action {
        Action::HistoryChanged { can_undo: self.history.can_undo(), can_redo: self.history.can_redo() }
    }

    fn request_render(&mut self, actions: &mut Vec<Action>) {
        if !self.render_pending {
            self.render_pending = true;
            actions.push(Action::RenderNeeded);
        }
    }
}

// =============================================================
// Engine
// =============================================================

/// The full engine bound to a canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    #[must_use]
    pub fn with_config(canvas: HtmlCanvasElement, config: SurfaceConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    // --- Delegated data inputs ---

    /// Load artwork and resize the canvas backing store to match it.
    pub fn load_artwork(&mut self, buffer: PixelBuffer) -> Vec<Action> {
        let actions = self.core.load_artwork(buffer);
        self.fit_canvas();
        actions
    }

    /// # Errors
    ///
    /// Returns [`PixelBufferError`] if `data` does not match the dimensions.
    pub fn load_rgba(&mut self, width: u32, height: u32, data: Vec<u8>) -> Result<Vec<Action>, PixelBufferError> {
        let actions = self.core.load_rgba(width, height, data)?;
        self.fit_canvas();
        Ok(actions)
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    /// # Errors
    ///
    /// Returns [`ColorError`] if `hex` is not `#RRGGBB`.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        self.core.set_color_hex(hex)
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.core.set_brush_size(size);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point) -> Vec<Action> {
        let rect = self.element_rect();
        self.core.on_pointer_down(screen, rect)
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let rect = self.element_rect();
        self.core.on_pointer_move(screen, rect)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        let rect = self.element_rect();
        self.core.on_touch_start(touches, rect)
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        let rect = self.element_rect();
        self.core.on_touch_move(touches, rect)
    }

    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        self.core.on_touch_end(remaining)
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.core.undo()
    }

    pub fn redo(&mut self) -> Vec<Action> {
        self.core.redo()
    }

    pub fn reset_to_start(&mut self) -> Vec<Action> {
        self.core.reset_to_start()
    }

    // --- Render ---

    /// Draw the buffer if a render is pending. Repeated calls without an
    /// intervening edit draw nothing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        if !self.core.take_render_request() {
            return Ok(());
        }
        let Some(buffer) = self.core.buffer() else {
            return Ok(());
        };
        let ctx = render::context_2d(&self.canvas)?;
        render::draw(&ctx, buffer)
    }

    // --- Delegated queries ---

    /// CSS transform the host applies to the canvas element.
    #[must_use]
    pub fn css_transform(&self) -> String {
        self.core.view().css_transform()
    }

    fn fit_canvas(&self) {
        if let Some(buffer) = self.core.buffer() {
            self.canvas.set_width(buffer.width());
            self.canvas.set_height(buffer.height());
        }
    }

    fn element_rect(&self) -> ElementRect {
        let rect = self.canvas.get_bounding_client_rect();
        ElementRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}
