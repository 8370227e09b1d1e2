//! RGBA color values and `#RRGGBB` conversion.
//!
//! Colors arriving from the picker are plain hex strings. The engine stores
//! them as [`Color`] and always paints them fully opaque.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::OUTLINE_THRESHOLD;

/// Error returned when a color string is not of the form `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string is not seven characters starting with `#`.
    #[error("expected #RRGGBB, got {0:?}")]
    Format(String),
    /// One of the channel pairs is not hexadecimal.
    #[error("invalid hex channel {channel:?} in {input:?}")]
    Channel { input: String, channel: String },
}

/// A single RGBA pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from a four-byte RGBA quad.
    #[must_use]
    pub const fn from_quad(quad: [u8; 4]) -> Self {
        Self::rgba(quad[0], quad[1], quad[2], quad[3])
    }

    #[must_use]
    pub const fn to_quad(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The same color with alpha forced to 255.
    #[must_use]
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// Whether this pixel is line art: near-black on every channel and not fully transparent.
    #[must_use]
    pub const fn is_outline(self) -> bool {
        self.r < OUTLINE_THRESHOLD && self.g < OUTLINE_THRESHOLD && self.b < OUTLINE_THRESHOLD && self.a > 0
    }

    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Whether every RGB channel is within `tolerance` of `other`. Alpha is ignored.
    #[must_use]
    pub fn within(self, other: Self, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
    }

    /// Parse a `#RRGGBB` string into an opaque color.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] if the string is not exactly `#` followed by six hex digits.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| ColorError::Format(input.to_owned()))?;
        let channel = |range: std::ops::Range<usize>| {
            let pair = &digits[range];
            let invalid = || ColorError::Channel { input: input.to_owned(), channel: pair.to_owned() };
            // from_str_radix also takes a leading sign.
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            u8::from_str_radix(pair, 16).map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as an uppercase `#RRGGBB` string. Alpha is dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
