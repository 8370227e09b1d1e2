//! The RGBA raster owned by one open artwork.
//!
//! Pixels are stored row-major as RGBA quads, stride `width * 4`, so the bytes
//! can be handed to `ImageData` or an image encoder without conversion.
//! Reads and writes outside the raster are rejected rather than clamped.

#[cfg(test)]
#[path = "pixels_test.rs"]
mod pixels_test;

use crate::camera::BufferPoint;
use crate::color::Color;

/// Error returned when constructing a [`PixelBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelBufferError {
    /// Width or height is zero.
    #[error("pixel buffer dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    /// The supplied byte slice does not hold exactly `width * height` RGBA quads.
    #[error("expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    LengthMismatch { width: u32, height: u32, expected: usize, actual: usize },
    /// `width * height * 4` does not fit in `usize`.
    #[error("pixel buffer {width}x{height} is too large to address")]
    TooLarge { width: u32, height: u32 },
}

/// A `width` x `height` RGBA raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// A buffer of the given size with every pixel set to `color`.
    ///
    /// # Errors
    ///
    /// Returns [`PixelBufferError::EmptyDimensions`] if either dimension is zero
    /// and [`PixelBufferError::TooLarge`] if the raster cannot be addressed.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, PixelBufferError> {
        let len = byte_len(width, height)?;
        let data = color.to_quad().into_iter().cycle().take(len).collect();
        Ok(Self { width, height, data })
    }

    /// Wrap existing RGBA bytes, e.g. a decoded line-art image.
    ///
    /// # Errors
    ///
    /// Returns [`PixelBufferError`] if a dimension is zero or `data` has the wrong length.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch { width, height, expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Whether `(x, y)` lies inside the raster.
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Byte offset of the pixel at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return None;
        };
        let width = self.width as usize;
        if x >= width || y >= self.height as usize {
            return None;
        }
        Some((y * width + x) * 4)
    }

    /// Color of the pixel at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        let i = self.index(x, y)?;
        Some(Color::rgba(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]))
    }

    /// Write one pixel. Returns `false` (and writes nothing) when out of bounds.
    pub fn set(&mut self, x: i64, y: i64, color: Color) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        self.data[i..i + 4].copy_from_slice(&color.to_quad());
        true
    }

    /// Overwrite the whole raster with `bytes` of identical size.
    ///
    /// Returns `false` without touching the buffer when the lengths differ.
    pub fn copy_from(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() != self.data.len() {
            return false;
        }
        self.data.copy_from_slice(bytes);
        true
    }

    /// Paint a straight stroke segment `width` pixels wide with round caps.
    ///
    /// A pixel is covered when its center lies within `width / 2` of the
    /// segment joining the centers of `from` and `to`. Consecutive segments
    /// sharing an endpoint therefore join without gaps. Painting is hard-edged
    /// and opaque; returns the number of pixels written.
    pub fn stroke_segment(&mut self, from: BufferPoint, to: BufferPoint, width: u32, color: Color) -> usize {
        let radius = f64::from(width.max(1)) / 2.0;
        let (ax, ay) = from.center();
        let (bx, by) = to.center();

        #[allow(clippy::cast_possible_truncation)]
        let reach = radius.ceil() as i64;
        let min_x = i64::from(from.x.min(to.x)) - reach;
        let max_x = i64::from(from.x.max(to.x)) + reach;
        let min_y = i64::from(from.y.min(to.y)) - reach;
        let max_y = i64::from(from.y.max(to.y)) + reach;

        // Clip the scan window to the raster so off-canvas strokes cost nothing.
        let min_x = min_x.max(0);
        let min_y = min_y.max(0);
        let max_x = max_x.min(i64::from(self.width) - 1);
        let max_y = max_y.min(i64::from(self.height) - 1);

        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                #[allow(clippy::cast_precision_loss)]
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                if distance_to_segment(px, py, ax, ay, bx, by) <= radius && self.set(x, y, color) {
                    written += 1;
                }
            }
        }
        written
    }

    /// Paint a single round dab, as when a tap ends a stroke without moving.
    pub fn stamp(&mut self, at: BufferPoint, width: u32, color: Color) -> usize {
        self.stroke_segment(at, at, width, color)
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize, PixelBufferError> {
    if width == 0 || height == 0 {
        return Err(PixelBufferError::EmptyDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(PixelBufferError::TooLarge { width, height })
}

/// Euclidean distance from `(px, py)` to the closed segment `a`-`b`.
fn distance_to_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 { 0.0 } else { (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0) };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
