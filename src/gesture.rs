//! Multi-touch pan/zoom tracking.
//!
//! The controller consumes the list of active touch points the host reports
//! with every touch event (as in a DOM `TouchEvent.touches`) and keeps the
//! [`ViewState`] the host applies to the drawing element. Exactly one of
//! idle, panning or pinching holds at a time:
//!
//! - a second touch always switches to pinching, cancelling any pan;
//! - a single touch starts panning only when the caller allows it;
//! - lifting one finger of a pinch resumes panning from the surviving touch,
//!   re-anchored so the view does not jump;
//! - lifting every finger returns to idle.
//!
//! Pinch zoom is incremental: each move scales by the ratio of the new finger
//! distance to the previous one, then the new distance becomes the reference.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use tracing::trace;

use crate::camera::{Point, ViewState};
use crate::consts::{MAX_SCALE, MIN_PINCH_DISTANCE, MIN_SCALE};

/// Which gesture, if any, is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture; touches are free to draw.
    #[default]
    Idle,
    /// One touch drags the view.
    Panning {
        /// Touch position minus the pan at the moment the drag was anchored.
        offset: Point,
    },
    /// Two touches zoom the view.
    Pinching {
        /// Finger distance at the previous pinch update.
        distance: f64,
    },
}

/// Tracks touches and owns the view transform.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    view: ViewState,
    min_scale: f64,
    max_scale: f64,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(MIN_SCALE, MAX_SCALE)
    }
}

impl GestureController {
    /// A controller at identity view with the given zoom bounds.
    ///
    /// Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale { (min_scale, max_scale) } else { (max_scale, min_scale) };
        let view = ViewState { scale: 1.0_f64.clamp(min_scale, max_scale), ..ViewState::default() };
        Self { state: GestureState::Idle, view, min_scale, max_scale }
    }

    // --- Queries ---

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn scale_bounds(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Whether a pan or pinch is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self.state, GestureState::Pinching { .. })
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.state, GestureState::Panning { .. })
    }

    // --- Touch events ---

    /// A touch began. `touches` is every touch now on the surface.
    ///
    /// `allow_pan` decides whether a lone touch pans; it is ignored once a
    /// second touch arrives. Returns whether a gesture is active afterwards.
    pub fn touch_start(&mut self, touches: &[Point], allow_pan: bool) -> bool {
        match touches {
            [] => {}
            [only] => {
                if allow_pan || self.is_panning() {
                    self.anchor_pan(*only);
                }
            }
            [a, b, ..] => self.begin_pinch(*a, *b),
        }
        self.is_active()
    }

    /// Touches moved. Returns whether the view changed.
    pub fn touch_move(&mut self, touches: &[Point]) -> bool {
        match (self.state, touches) {
            (GestureState::Pinching { distance }, [a, b, ..]) => {
                let current = a.distance(*b);
                let changed = if distance > MIN_PINCH_DISTANCE && current > MIN_PINCH_DISTANCE {
                    self.set_scale(self.view.scale * (current / distance))
                } else {
                    false
                };
                self.state = GestureState::Pinching { distance: current };
                changed
            }
            (GestureState::Panning { offset }, [first, ..]) => {
                let pan = first.sub(offset);
                let changed = pan != self.view.pan;
                self.view.pan = pan;
                changed
            }
            _ => false,
        }
    }

    /// Touches ended or were cancelled. `remaining` is every touch still down.
    pub fn touch_end(&mut self, remaining: &[Point]) {
        match (self.state, remaining) {
            (_, []) => {
                if self.is_active() {
                    trace!("gesture ended");
                }
                self.state = GestureState::Idle;
            }
            (GestureState::Pinching { .. } | GestureState::Panning { .. }, [only]) => self.anchor_pan(*only),
            (GestureState::Pinching { .. }, [a, b, ..]) => self.begin_pinch(*a, *b),
            _ => {}
        }
    }

    /// Abandon any gesture without touching the view.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    // --- Direct view control ---

    /// Multiply the scale by `factor` (wheel or zoom buttons). Returns whether it changed.
    pub fn zoom_by(&mut self, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.set_scale(self.view.scale * factor)
    }

    /// Return to scale 1 (clamped) with no pan.
    pub fn reset_view(&mut self) {
        self.state = GestureState::Idle;
        self.view = ViewState { scale: 1.0_f64.clamp(self.min_scale, self.max_scale), ..ViewState::default() };
    }

    fn set_scale(&mut self, scale: f64) -> bool {
        let scale = scale.clamp(self.min_scale, self.max_scale);
        if (scale - self.view.scale).abs() < f64::EPSILON {
            return false;
        }
        self.view.scale = scale;
        true
    }

    fn begin_pinch(&mut self, a: Point, b: Point) {
        let distance = a.distance(b);
        trace!(distance, "pinch anchored");
        self.state = GestureState::Pinching { distance };
    }

    fn anchor_pan(&mut self, touch: Point) {
        let offset = touch.sub(self.view.pan);
        trace!(x = touch.x, y = touch.y, "pan anchored");
        self.state = GestureState::Panning { offset };
    }
}
