//! View transform and coordinate conversions.
//!
//! Three coordinate spaces meet here: screen space (CSS pixels reported by
//! pointer events), the host element's bounding box, and buffer space (integer
//! pixel coordinates in the [`crate::pixels::PixelBuffer`]). The [`ViewState`]
//! only describes how the host should transform the element on screen; the
//! screen-to-buffer mapping goes through the element's rendered bounding box,
//! which already reflects any zoom or pan applied to it.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in screen space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Integer pixel coordinates in buffer space. May lie outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferPoint {
    pub x: i32,
    pub y: i32,
}

impl BufferPoint {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Geometric center of the pixel.
    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (f64::from(self.x) + 0.5, f64::from(self.y) + 0.5)
    }
}

/// The host element's bounding box in screen space, as from `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Map a screen-space event position to buffer coordinates.
    ///
    /// Each axis is `floor((pos - origin) * buffer_size / rendered_size)`.
    /// Returns `None` when the element has no rendered area (hidden, detached).
    /// The result is not bounds-checked against the buffer.
    #[must_use]
    pub fn to_buffer(&self, screen: Point, buffer_width: u32, buffer_height: u32) -> Option<BufferPoint> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let sx = f64::from(buffer_width) / self.width;
        let sy = f64::from(buffer_height) / self.height;
        let x = ((screen.x - self.left) * sx).floor();
        let y = ((screen.y - self.top) * sy).floor();
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        // `as` saturates, so wildly off-element positions stay out of bounds.
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = (x as i32, y as i32);
        Some(BufferPoint::new(x, y))
    }
}

/// Scale and pan the host applies to the drawing element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scale: f64,
    pub pan: Point,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { scale: 1.0, pan: Point::default() }
    }
}

impl ViewState {
    /// CSS `transform` value for the drawing element.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.pan.x, self.pan.y, self.scale)
    }
}

/// Buffer dimensions for a line-art image of `image_width` x `image_height`
/// shown in a viewport `viewport_width` CSS pixels wide.
///
/// The artwork is as wide as the viewport minus `margin`, capped at
/// `max_width`, with the height scaled to keep the aspect ratio. Fractional
/// results are truncated and never drop below one pixel.
#[must_use]
pub fn fit_artwork(
    image_width: u32,
    image_height: u32,
    viewport_width: f64,
    max_width: u32,
    margin: u32,
) -> Option<(u32, u32)> {
    if image_width == 0 || image_height == 0 {
        return None;
    }
    let width = (viewport_width - f64::from(margin)).min(f64::from(max_width));
    if !width.is_finite() {
        return None;
    }
    let height = f64::from(image_height) * width / f64::from(image_width);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (w, h) = (width.max(1.0) as u32, height.max(1.0) as u32);
    Some((w, h))
}
