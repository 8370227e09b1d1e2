//! Seasonal swatches offered by the color picker.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use serde::Serialize;

use crate::color::Color;

/// A named group of swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub key: &'static str,
    pub name: &'static str,
    pub colors: [Color; 5],
}

pub const SPRING: Palette = Palette {
    key: "spring",
    name: "Spring",
    colors: [
        Color::rgb(0xFF, 0xB6, 0xC1),
        Color::rgb(0xFF, 0xC0, 0xCB),
        Color::rgb(0xFF, 0x69, 0xB4),
        Color::rgb(0xFF, 0x14, 0x93),
        Color::rgb(0xDB, 0x70, 0x93),
    ],
};

pub const SUMMER: Palette = Palette {
    key: "summer",
    name: "Summer",
    colors: [
        Color::rgb(0xFF, 0x57, 0x33),
        Color::rgb(0x33, 0xFF, 0xF5),
        Color::rgb(0x33, 0xFF, 0x57),
        Color::rgb(0xF5, 0xFF, 0x33),
        Color::rgb(0xFF, 0x33, 0xF5),
    ],
};

pub const AUTUMN: Palette = Palette {
    key: "autumn",
    name: "Autumn",
    colors: [
        Color::rgb(0x8B, 0x45, 0x13),
        Color::rgb(0xCD, 0x85, 0x3F),
        Color::rgb(0xD2, 0x69, 0x1E),
        Color::rgb(0xB8, 0x86, 0x0B),
        Color::rgb(0xDA, 0xA5, 0x20),
    ],
};

pub const WINTER: Palette = Palette {
    key: "winter",
    name: "Winter",
    colors: [
        Color::rgb(0x1E, 0x90, 0xFF),
        Color::rgb(0x46, 0x82, 0xB4),
        Color::rgb(0x87, 0xCE, 0xEB),
        Color::rgb(0xB0, 0xC4, 0xDE),
        Color::rgb(0x70, 0x80, 0x90),
    ],
};

/// All palettes in display order.
pub const ALL: [Palette; 4] = [SPRING, SUMMER, AUTUMN, WINTER];

/// Look up a palette by its key (`"spring"`, `"summer"`, ...).
#[must_use]
pub fn by_key(key: &str) -> Option<&'static Palette> {
    ALL.iter().find(|p| p.key == key)
}
