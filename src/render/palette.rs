//! Class colors for timeline rows.
//!
//! A color identifies `pid mod palette.len()`, not a unique pid; collisions past
//! the palette length are expected.

use crate::core::model::Pid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const DEFAULT_COLORS: [Color; 8] = [
    Color::rgb(0x4f, 0x46, 0xe5),
    Color::rgb(0x05, 0x96, 0x69),
    Color::rgb(0xd9, 0x77, 0x06),
    Color::rgb(0xdc, 0x26, 0x26),
    Color::rgb(0x08, 0x91, 0xb2),
    Color::rgb(0x7c, 0x3a, 0xed),
    Color::rgb(0x65, 0xa3, 0x0d),
    Color::rgb(0xdb, 0x27, 0x77),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl Palette {
    /// Returns `None` for an empty color list.
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        (!colors.is_empty()).then_some(Self { colors })
    }

    pub fn color_for(&self, pid: Pid) -> Color {
        self.colors[pid as usize % self.colors.len()]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
