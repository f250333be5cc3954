//! Rendered units: single bits and hex nibbles with their screen positions.

use crate::{
    bits,
    layout::{Point, Rect},
};

/// What a [Glyph] displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GlyphKind {
    /// A single bit, 0 or 1.
    Bit(u8),
    /// A 4-bit group, 0..=15.
    Nibble(u8),
}

/// One bit or nibble placed on the drawing surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Glyph {
    pub kind: GlyphKind,
    /// Position counted from the most significant end, starting at 0.
    pub index: u32,
    /// Area the glyph belongs to: the bit cell, or the span of four cells for a nibble.
    pub cell: Rect,
    /// Horizontally centred text anchor.
    pub anchor: Point,
}

impl Glyph {
    /// Displayed text: `"0"`/`"1"` for bits, an uppercase hex digit for nibbles.
    pub fn text(&self) -> String {
        match self.kind {
            GlyphKind::Bit(bit) => bit.to_string(),
            GlyphKind::Nibble(nibble) => bits::hex_char(nibble).to_string(),
        }
    }
}

/// Which side of a row a caption or bracket goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Placement {
    #[default]
    Above,
    Below,
}

#[cfg(feature = "serde")]
impl From<crate::serde::PlacementDef> for Placement {
    fn from(value: crate::serde::PlacementDef) -> Self {
        match value {
            crate::serde::PlacementDef::Above => Placement::Above,
            crate::serde::PlacementDef::Below => Placement::Below,
        }
    }
}
