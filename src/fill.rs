//! Tolerance-bounded, 4-connected flood fill over a [`PixelBuffer`].
//!
//! The fill grows from a seed pixel through neighbors whose RGB channels are
//! each within `tolerance` of the seed's original color. Line art (see
//! [`Color::is_outline`]) and fully transparent pixels are barriers and are
//! never written. A pixel that already holds the fill color is skipped, which
//! is also what stops a converted pixel from being accepted twice.
//!
//! The traversal uses an explicit work-list instead of recursion so that large
//! uniform regions cannot exhaust the call stack. [`FloodFill`] keeps that
//! work-list between calls so repeated fills on the same artwork reuse its
//! allocation.

#[cfg(test)]
#[path = "fill_test.rs"]
mod fill_test;

use crate::camera::BufferPoint;
use crate::color::Color;
use crate::consts::FILL_STACK_CAPACITY;
use crate::pixels::PixelBuffer;

/// What a fill call did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// `pixels` pixels were recolored.
    Filled { pixels: usize },
    /// The seed lies outside the buffer.
    OutOfBounds,
    /// The seed is a line-art pixel.
    OutlineSeed,
    /// The seed is fully transparent.
    TransparentSeed,
    /// The seed already holds the fill color.
    AlreadyFilled,
}

impl FillOutcome {
    /// Number of pixels written; zero for every no-op outcome.
    #[must_use]
    pub fn pixels(self) -> usize {
        match self {
            Self::Filled { pixels } => pixels,
            _ => 0,
        }
    }

    /// Whether the buffer changed.
    #[must_use]
    pub fn changed(self) -> bool {
        self.pixels() > 0
    }
}

/// Reusable flood-fill work-list.
#[derive(Debug, Default)]
pub struct FloodFill {
    stack: Vec<(i64, i64)>,
}

impl FloodFill {
    #[must_use]
    pub fn new() -> Self {
        Self { stack: Vec::with_capacity(FILL_STACK_CAPACITY) }
    }

    /// Recolor the region connected to `seed` with `fill` (alpha forced to 255).
    ///
    /// Runs synchronously in time proportional to the matched area. Every
    /// precondition failure is a no-op reported through [`FillOutcome`].
    pub fn fill(&mut self, buffer: &mut PixelBuffer, seed: BufferPoint, fill: Color, tolerance: u8) -> FillOutcome {
        let (sx, sy) = (i64::from(seed.x), i64::from(seed.y));
        let Some(origin) = buffer.get(sx, sy) else {
            return FillOutcome::OutOfBounds;
        };
        let fill = fill.opaque();
        if origin.is_outline() {
            return FillOutcome::OutlineSeed;
        }
        if origin.is_transparent() {
            return FillOutcome::TransparentSeed;
        }
        if origin == fill {
            return FillOutcome::AlreadyFilled;
        }

        self.stack.clear();
        self.stack.push((sx, sy));
        let mut pixels = 0;

        while let Some((x, y)) = self.stack.pop() {
            let Some(current) = buffer.get(x, y) else {
                continue;
            };
            if current.is_transparent() || current.is_outline() || current == fill {
                continue;
            }
            if !current.within(origin, tolerance) {
                continue;
            }
            buffer.set(x, y, fill);
            pixels += 1;
            self.stack.extend([(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]);
        }

        FillOutcome::Filled { pixels }
    }
}

/// One-shot fill with a fresh work-list. See [`FloodFill::fill`].
pub fn flood_fill(buffer: &mut PixelBuffer, seed: BufferPoint, fill: Color, tolerance: u8) -> FillOutcome {
    FloodFill::default().fill(buffer, seed, fill, tolerance)
}
