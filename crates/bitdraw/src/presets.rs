//! Ready-made diagrams for the lecture figures: two's complement, UTF-8
//! packing and IEEE 754 fields.

use crate::{
    diagram::{Arrow, BitField, DecimalLabel, Diagram},
    encoding::{pack_utf8_2, pack_utf8_3},
    errors::LayoutError,
    field::{FieldSpec, Shade, fields_from_counts},
    glyph::Placement,
    layout::CellStyle,
    value::BitValue,
};

/// IEEE 754 binary interchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ieee754Format {
    Binary32,
    Binary64,
}

impl Ieee754Format {
    pub fn width(&self) -> u32 {
        match self {
            Ieee754Format::Binary32 => 32,
            Ieee754Format::Binary64 => 64,
        }
    }

    pub fn exponent_bits(&self) -> u32 {
        match self {
            Ieee754Format::Binary32 => 8,
            Ieee754Format::Binary64 => 11,
        }
    }

    /// Trailing significand bits.
    pub fn mantissa_bits(&self) -> u32 {
        self.width() - 1 - self.exponent_bits()
    }

    /// Sign, exponent and mantissa as `(label, bits)`, most significant first.
    pub fn parts(&self) -> [(&'static str, u32); 3] {
        [
            ("S", 1),
            ("E", self.exponent_bits()),
            ("T", self.mantissa_bits()),
        ]
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        fields_from_counts(self.width(), &self.parts())
    }
}

/// A value and its two's-complement negation, one above the other, with
/// byte gaps, hex digits above and signed decimal labels.
pub fn twos_complement(value: u32) -> Result<Diagram, LayoutError> {
    let value = BitValue::new(u64::from(value), 32)?;
    let row = |value: BitValue| -> Result<BitField, LayoutError> {
        Ok(BitField::new(value, Vec::new())?
            .with_nibbles(Placement::Above)
            .with_groups(8)
            .with_decimal(DecimalLabel::Signed))
    };

    Diagram::compile(
        CellStyle::default(),
        1.5,
        vec![row(value)?, row(value.negated())?],
        Vec::new(),
    )
}

/// A code point in 16 bits and its 2-byte UTF-8 packing, with arrows
/// showing where the payload bits go.
pub fn utf8_two_byte(cp: u32) -> Result<Diagram, LayoutError> {
    let source = BitField::new(
        BitValue::new(u64::from(cp & 0xFFFF), 16)?,
        vec![
            FieldSpec::new("", 11, 15).shaded(Shade::Dark),
            FieldSpec::new("", 6, 10),
            FieldSpec::new("", 0, 5),
        ],
    )?
    .with_nibbles(Placement::Above);

    let packed = BitField::new(
        BitValue::new(u64::from(pack_utf8_2(cp) & 0xFFFF), 16)?,
        vec![
            FieldSpec::new("", 13, 15).shaded(Shade::Light),
            FieldSpec::new("", 8, 12),
            FieldSpec::new("", 6, 7).shaded(Shade::Light),
            FieldSpec::new("", 0, 5),
        ],
    )?
    .with_nibbles(Placement::Below);

    Diagram::compile(
        CellStyle::default(),
        1.0,
        vec![source, packed],
        vec![arrow(7.5, 5.5), arrow(13.0, 13.0)],
    )
}

/// A code point in 24 bits and its 3-byte UTF-8 packing.
pub fn utf8_three_byte(cp: u32) -> Result<Diagram, LayoutError> {
    let source = BitField::new(
        BitValue::new(u64::from(cp & 0xFF_FFFF), 24)?,
        vec![
            FieldSpec::new("", 16, 23).shaded(Shade::Dark),
            FieldSpec::new("", 12, 15),
            FieldSpec::new("", 6, 11),
            FieldSpec::new("", 0, 5),
        ],
    )?
    .with_nibbles(Placement::Above);

    let packed = BitField::new(
        BitValue::new(u64::from(pack_utf8_3(cp) & 0xFF_FFFF), 24)?,
        vec![
            FieldSpec::new("", 20, 23).shaded(Shade::Light),
            FieldSpec::new("", 16, 19),
            FieldSpec::new("", 14, 15).shaded(Shade::Light),
            FieldSpec::new("", 8, 13),
            FieldSpec::new("", 6, 7).shaded(Shade::Light),
            FieldSpec::new("", 0, 5),
        ],
    )?
    .with_nibbles(Placement::Below);

    Diagram::compile(
        CellStyle::default(),
        1.0,
        vec![source, packed],
        vec![arrow(10.0, 6.0), arrow(15.0, 13.0), arrow(21.0, 21.0)],
    )
}

/// The bits of a float split into sign, exponent and mantissa.
pub fn float_bits(bits: u64, format: Ieee754Format) -> Result<Diagram, LayoutError> {
    let row = BitField::new(BitValue::new(bits, format.width())?, format.fields())?
        .with_nibbles(Placement::Above);

    Diagram::compile(CellStyle::default(), 1.0, vec![row], Vec::new())
}

fn arrow(from_cell: f64, to_cell: f64) -> Arrow {
    Arrow {
        from_row: 0,
        from_cell,
        to_row: 1,
        to_cell,
    }
}
