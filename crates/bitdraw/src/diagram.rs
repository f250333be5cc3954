//! Bit-field rows and diagrams: the renderer that turns a value and its
//! fields into glyphs, brackets and boxes.
//!
//! A [BitField] renders one value as a row of bit cells, optionally with a
//! nibble row, field boxes and a decimal label. A [Diagram] stacks rows
//! top to bottom and connects them with arrows. Both are pure: rendering
//! the same input twice gives identical layouts.

use tracing::{debug, warn};

use crate::{
    bits,
    errors::LayoutError,
    field::{FieldSpec, check_partition},
    glyph::{Glyph, GlyphKind, Placement},
    layout::{BASELINE, Bracket, CellStyle, FieldBox, NIBBLE_LABEL_OFFSET, Point, Rect},
    value::BitValue,
};

/// Gap between a row edge and the end of an arrow.
pub const ARROW_CLEARANCE: f64 = 0.05;
/// Distance between a row edge and a field caption.
pub const FIELD_CAPTION_OFFSET: f64 = 0.2;

/// How the decimal label next to a row is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecimalLabel {
    /// `= value`.
    Unsigned,
    /// `= value` read as two's complement.
    Signed,
}

/// Display options of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowOptions {
    /// Side of the nibble brackets and hex digits; `None` hides them.
    pub nibbles: Option<Placement>,
    /// Insert [CellStyle::group_gap] after every `group_bits` cells.
    pub group_bits: Option<u32>,
    pub decimal: Option<DecimalLabel>,
}

/// Free text placed at an anchor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextLabel {
    pub text: String,
    /// Left end of the baseline.
    pub anchor: Point,
}

/// A nibble digit together with the bracket that groups its four cells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NibbleGroup {
    pub glyph: Glyph,
    pub bracket: Bracket,
    pub placement: Placement,
}

/// Everything needed to paint one row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowLayout {
    /// Bit glyphs, most significant first.
    pub cells: Vec<Glyph>,
    pub nibbles: Vec<NibbleGroup>,
    pub fields: Vec<FieldBox>,
    pub decimal: Option<TextLabel>,
    /// Rectangle covering all bit cells.
    pub bounds: Rect,
}

/// A value with its display fields: the bit-field renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct BitField {
    value: BitValue,
    fields: Vec<FieldSpec>,
    options: RowOptions,
}

impl BitField {
    /// Creates a row. Each field must lie inside the value's width; whether
    /// the fields partition the width is not enforced.
    pub fn new(value: BitValue, fields: Vec<FieldSpec>) -> Result<Self, LayoutError> {
        for field in &fields {
            field.validate(value.width())?;
        }

        Ok(BitField {
            value,
            fields,
            options: RowOptions::default(),
        })
    }

    pub fn with_options(mut self, options: RowOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_nibbles(mut self, placement: Placement) -> Self {
        self.options.nibbles = Some(placement);
        self
    }

    pub fn with_groups(mut self, group_bits: u32) -> Self {
        self.options.group_bits = Some(group_bits);
        self
    }

    pub fn with_decimal(mut self, decimal: DecimalLabel) -> Self {
        self.options.decimal = Some(decimal);
        self
    }

    pub fn value(&self) -> BitValue {
        self.value
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn options(&self) -> &RowOptions {
        &self.options
    }

    fn cell_x(&self, origin: Point, style: &CellStyle, index: u32) -> f64 {
        style.cell_x(origin.x, index, self.options.group_bits)
    }

    /// Rectangle covering every bit cell of the row.
    pub fn bounds(&self, origin: Point, style: &CellStyle) -> Rect {
        let last = self.value.width() - 1;
        let right = self.cell_x(origin, style, last) + style.cell_size;
        Rect::new(origin.x, origin.y, right - origin.x, style.cell_size)
    }

    /// One glyph per bit, most significant first.
    pub fn bit_glyphs(&self, origin: Point, style: &CellStyle) -> Vec<Glyph> {
        self.value
            .bits()
            .into_iter()
            .zip(0u32..)
            .map(|(bit, index)| {
                let x = self.cell_x(origin, style, index);
                let cell = Rect::new(x, origin.y, style.cell_size, style.cell_size);
                Glyph {
                    kind: GlyphKind::Bit(bit),
                    index,
                    cell,
                    anchor: Point::new(x + style.cell_size / 2.0, origin.y + BASELINE),
                }
            })
            .collect()
    }

    /// Hex digits with their brackets, or nothing if nibbles are hidden.
    pub fn nibble_groups(&self, origin: Point, style: &CellStyle) -> Vec<NibbleGroup> {
        let Some(placement) = self.options.nibbles else {
            return Vec::new();
        };

        let size = style.cell_size;
        self.value
            .nibbles()
            .into_iter()
            .zip(0u32..)
            .map(|(nibble, k)| {
                let left = self.cell_x(origin, style, 4 * k);
                let right = self.cell_x(origin, style, 4 * k + 3) + size;
                let cell = Rect::new(left, origin.y, right - left, size);
                let (edge, label_y) = match placement {
                    Placement::Above => (cell.top(), cell.top() + NIBBLE_LABEL_OFFSET),
                    Placement::Below => (cell.y, cell.y - NIBBLE_LABEL_OFFSET),
                };

                NibbleGroup {
                    glyph: Glyph {
                        kind: GlyphKind::Nibble(nibble),
                        index: k,
                        cell,
                        anchor: Point::new(cell.center().x, label_y),
                    },
                    bracket: Bracket::over_nibble(left, right, edge, size, placement),
                    placement,
                }
            })
            .collect()
    }

    /// Boxes for the fields, in the order they were given.
    ///
    /// A field `[low, high]` covers the cells `width-1-high ..= width-1-low`.
    /// Captions go on the side opposite the nibbles.
    pub fn field_boxes(&self, origin: Point, style: &CellStyle) -> Vec<FieldBox> {
        let width = self.value.width();
        let placement = match self.options.nibbles {
            Some(Placement::Above) => Placement::Below,
            _ => Placement::Above,
        };

        self.fields
            .iter()
            .map(|field| {
                let first = width - 1 - field.high_bit;
                let last = width - 1 - field.low_bit;
                let x = self.cell_x(origin, style, first);
                let right = self.cell_x(origin, style, last) + style.cell_size;
                let rect = Rect::new(x, origin.y, right - x, style.cell_size);
                let caption_y = match placement {
                    Placement::Above => rect.top() + FIELD_CAPTION_OFFSET,
                    Placement::Below => rect.y - FIELD_CAPTION_OFFSET,
                };

                FieldBox {
                    label: field.label.clone(),
                    bits: field.len_bits(),
                    rect,
                    shade: field.shade,
                    caption: Point::new(rect.center().x, caption_y),
                    placement,
                }
            })
            .collect()
    }

    /// Text of the decimal label, e.g. `"= -1808827695"`.
    pub fn decimal_text(&self) -> Option<String> {
        match self.options.decimal? {
            DecimalLabel::Unsigned => Some(format!("= {}", self.value.value())),
            DecimalLabel::Signed => Some(format!("= {}", self.value.signed())),
        }
    }

    /// Lays out the whole row with its lower-left corner at `origin`.
    ///
    /// The decimal label starts a fifth of a cell plus two group gaps right
    /// of the last cell.
    pub fn render(&self, origin: Point, style: &CellStyle) -> RowLayout {
        let bounds = self.bounds(origin, style);
        let decimal = self.decimal_text().map(|text| TextLabel {
            text,
            anchor: Point::new(
                bounds.right() + 0.2 * style.cell_size + 2.0 * style.group_gap,
                origin.y + BASELINE,
            ),
        });

        RowLayout {
            cells: self.bit_glyphs(origin, style),
            nibbles: self.nibble_groups(origin, style),
            fields: self.field_boxes(origin, style),
            decimal,
            bounds,
        }
    }
}

/// An arrow from a position on one row to a position on another.
///
/// Positions are measured in cells from the left edge of the diagram and
/// may be fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Arrow {
    pub from_row: usize,
    pub from_cell: f64,
    pub to_row: usize,
    pub to_cell: f64,
}

#[cfg(feature = "serde")]
impl From<crate::serde::ArrowDef> for Arrow {
    fn from(value: crate::serde::ArrowDef) -> Self {
        Arrow {
            from_row: value.from_row,
            from_cell: value.from_cell,
            to_row: value.to_row,
            to_cell: value.to_cell,
        }
    }
}

/// Start and end point of a laid out arrow; the head is at `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrowLayout {
    pub from: Point,
    pub to: Point,
}

/// Layout of a complete [Diagram].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiagramLayout {
    pub rows: Vec<RowLayout>,
    pub arrows: Vec<ArrowLayout>,
}

/// Rows stacked from top to bottom, plus arrows between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub style: CellStyle,
    /// Vertical distance between the bottoms of consecutive rows.
    pub row_spacing: f64,
    rows: Vec<BitField>,
    arrows: Vec<Arrow>,
}

impl Diagram {
    /// Builds a diagram. Fails if an arrow refers to a missing row or
    /// connects a row with itself.
    pub fn compile(
        style: CellStyle,
        row_spacing: f64,
        rows: Vec<BitField>,
        arrows: Vec<Arrow>,
    ) -> Result<Self, LayoutError> {
        for arrow in &arrows {
            if arrow.from_row >= rows.len() || arrow.to_row >= rows.len() {
                return Err(LayoutError::InvalidRow(format!(
                    "arrow {} -> {} but the diagram has {} rows",
                    arrow.from_row,
                    arrow.to_row,
                    rows.len()
                )));
            }
            if arrow.from_row == arrow.to_row {
                return Err(LayoutError::InvalidRow(format!(
                    "arrow starts and ends on row {}",
                    arrow.from_row
                )));
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.fields().is_empty() {
                continue;
            }
            for issue in check_partition(row.fields(), row.value().width()) {
                warn!(row = i, %issue, "fields do not partition the row");
            }
        }

        debug!(rows = rows.len(), arrows = arrows.len(), "compiled diagram");

        Ok(Diagram {
            style,
            row_spacing,
            rows,
            arrows,
        })
    }

    pub fn rows(&self) -> &[BitField] {
        &self.rows
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Lower-left corner of row `index`; the last row sits at `y = 0`.
    pub fn row_origin(&self, index: usize) -> Point {
        let from_bottom = self.rows.len().saturating_sub(index + 1);
        Point::new(0.0, from_bottom as f64 * self.row_spacing)
    }

    pub fn layout(&self) -> DiagramLayout {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| row.render(self.row_origin(i), &self.style))
            .collect();

        let size = self.style.cell_size;
        let arrows = self
            .arrows
            .iter()
            .map(|arrow| {
                let from = self.row_origin(arrow.from_row);
                let to = self.row_origin(arrow.to_row);
                let (from_y, to_y) = if from.y > to.y {
                    (from.y - ARROW_CLEARANCE, to.y + size + ARROW_CLEARANCE)
                } else {
                    (from.y + size + ARROW_CLEARANCE, to.y - ARROW_CLEARANCE)
                };

                ArrowLayout {
                    from: Point::new(from.x + arrow.from_cell * size, from_y),
                    to: Point::new(to.x + arrow.to_cell * size, to_y),
                }
            })
            .collect();

        DiagramLayout { rows, arrows }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::serde::DiagramDef> for Diagram {
    type Error = LayoutError;

    fn try_from(value: crate::serde::DiagramDef) -> Result<Self, Self::Error> {
        let defaults = CellStyle::default();
        let style = CellStyle {
            cell_size: value.cell_size.unwrap_or(defaults.cell_size),
            group_gap: value.group_gap.unwrap_or(defaults.group_gap),
        };

        let mut rows = Vec::with_capacity(value.rows.len());
        for row in value.rows {
            let bit_value = BitValue::new(row.value, row.width)?;
            let fields = row.fields.into_iter().map(Into::into).collect();
            let options = RowOptions {
                nibbles: row.nibbles.map(Into::into),
                group_bits: row.group_bits,
                decimal: row.decimal.map(Into::into),
            };
            rows.push(BitField::new(bit_value, fields)?.with_options(options));
        }

        let arrows = value.arrows.into_iter().map(Into::into).collect();

        Diagram::compile(style, value.row_spacing.unwrap_or(1.0), rows, arrows)
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::DecimalDef> for DecimalLabel {
    fn from(value: crate::serde::DecimalDef) -> Self {
        match value {
            crate::serde::DecimalDef::Unsigned => DecimalLabel::Unsigned,
            crate::serde::DecimalDef::Signed => DecimalLabel::Signed,
        }
    }
}

/// Reads the value shown by a run of bit (or nibble) glyphs, most significant first.
pub fn value_from_cells(cells: &[Glyph]) -> u64 {
    cells.iter().fold(0, |acc, glyph| match glyph.kind {
        GlyphKind::Bit(bit) => (acc << 1) | u64::from(bit),
        GlyphKind::Nibble(nibble) => (acc << 4) | u64::from(nibble),
    })
}

/// Hex text shown by the nibble row of a layout.
pub fn hex_from_nibbles(nibbles: &[NibbleGroup]) -> String {
    nibbles
        .iter()
        .map(|group| match group.glyph.kind {
            GlyphKind::Nibble(nibble) => bits::hex_char(nibble),
            GlyphKind::Bit(bit) => bits::hex_char(bit),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::field::Shade;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn utf8_row() -> BitField {
        let value = BitValue::new(0xC3A9, 16).unwrap();
        let fields = vec![
            FieldSpec::new("", 13, 15).shaded(Shade::Light),
            FieldSpec::new("high", 8, 12),
            FieldSpec::new("", 6, 7).shaded(Shade::Light),
            FieldSpec::new("low", 0, 5),
        ];
        BitField::new(value, fields)
            .unwrap()
            .with_nibbles(Placement::Below)
    }

    #[test]
    fn test_bit_glyphs_read_back() {
        let row = utf8_row();
        let cells = row.bit_glyphs(Point::default(), &CellStyle::default());
        assert_eq!(cells.len(), 16);
        assert_eq!(value_from_cells(&cells), 0xC3A9);
        assert!(approx(cells[3].cell.x, 1.2));
        assert!(approx(cells[3].anchor.x, 1.4));
        assert!(approx(cells[3].anchor.y, BASELINE));
    }

    #[test]
    fn test_nibble_groups_below() {
        let row = utf8_row();
        let nibbles = row.nibble_groups(Point::new(0.0, 2.0), &CellStyle::default());
        assert_eq!(hex_from_nibbles(&nibbles), "C3A9");
        assert!(approx(nibbles[1].glyph.anchor.x, 2.4));
        assert!(approx(nibbles[1].glyph.anchor.y, 1.86));
        assert!(approx(nibbles[1].bracket.points[1].y, 1.93));
    }

    #[test]
    fn test_nibble_spans_inner_group_gap() {
        let value = BitValue::new(0xA5, 8).unwrap();
        let row = BitField::new(value, Vec::new())
            .unwrap()
            .with_groups(2)
            .with_nibbles(Placement::Above);
        let nibbles = row.nibble_groups(Point::default(), &CellStyle::default());
        assert_eq!(hex_from_nibbles(&nibbles), "A5");

        // cells 0..4 sit at 0.0, 0.4, 0.9 and 1.3 with one gap after cell 1
        let first = &nibbles[0];
        assert!(approx(first.glyph.cell.right(), 1.7));
        assert!(approx(first.glyph.anchor.x, 0.85));
        let end = first.bracket.points[2].x;
        assert!(approx(end, 1.62));
        assert!(end > 1.3 && end < 1.7);

        // the second nibble starts after the gap that closes the first
        assert!(approx(nibbles[1].glyph.cell.x, 1.8));
        assert!(approx(nibbles[1].bracket.points[0].x, 1.88));
    }

    #[test]
    fn test_nibbles_hidden_by_default() {
        let value = BitValue::new(0xE9, 16).unwrap();
        let row = BitField::new(value, Vec::new()).unwrap();
        assert!(row.nibble_groups(Point::default(), &CellStyle::default()).is_empty());
    }

    #[test]
    fn test_field_boxes_follow_bit_order() {
        let row = utf8_row();
        let boxes = row.field_boxes(Point::default(), &CellStyle::default());
        assert_eq!(boxes.len(), 4);
        assert!(approx(boxes[0].rect.x, 0.0));
        assert!(approx(boxes[0].rect.width, 1.2));
        assert!(approx(boxes[1].rect.x, 1.2));
        assert!(approx(boxes[1].rect.width, 2.0));
        assert!(approx(boxes[3].rect.x, 4.0));
        assert!(approx(boxes[3].rect.width, 2.4));
        assert_eq!(boxes[1].placement, Placement::Above);
    }

    #[test]
    fn test_new_rejects_field_outside_width() {
        let value = BitValue::new(0, 8).unwrap();
        let err = BitField::new(value, vec![FieldSpec::new("x", 4, 8)]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::FieldOutOfRange {
                label: "x".to_string(),
                high_bit: 8,
                width: 8
            }
        );
    }

    #[test]
    fn test_decimal_labels() {
        let value = BitValue::new(0x6CD8932F, 32).unwrap();
        let row = BitField::new(value, Vec::new())
            .unwrap()
            .with_decimal(DecimalLabel::Signed);
        assert_eq!(row.decimal_text().as_deref(), Some("= 1808827695"));

        let negated = BitField::new(value.negated(), Vec::new())
            .unwrap()
            .with_decimal(DecimalLabel::Signed);
        assert_eq!(negated.decimal_text().as_deref(), Some("= -1808827695"));

        let unsigned = BitField::new(value.negated(), Vec::new())
            .unwrap()
            .with_decimal(DecimalLabel::Unsigned);
        assert_eq!(unsigned.decimal_text().as_deref(), Some("= 2486139601"));
    }

    #[test]
    fn test_decimal_anchor_after_grouped_cells() {
        let value = BitValue::new(0x6CD8932F, 32).unwrap();
        let row = BitField::new(value, Vec::new())
            .unwrap()
            .with_groups(8)
            .with_decimal(DecimalLabel::Signed);
        let layout = row.render(Point::default(), &CellStyle::default());
        assert!(approx(layout.bounds.right(), 13.1));
        let decimal = layout.decimal.unwrap();
        assert!(approx(decimal.anchor.x, 13.38));
    }

    #[test]
    fn test_diagram_rows_and_arrows() {
        let source = BitField::new(BitValue::new(0xE9, 16).unwrap(), Vec::new()).unwrap();
        let diagram = Diagram::compile(
            CellStyle::default(),
            1.0,
            vec![source, utf8_row()],
            vec![Arrow {
                from_row: 0,
                from_cell: 7.5,
                to_row: 1,
                to_cell: 5.5,
            }],
        )
        .unwrap();

        let layout = diagram.layout();
        assert!(approx(layout.rows[0].bounds.y, 1.0));
        assert!(approx(layout.rows[1].bounds.y, 0.0));

        let arrow = layout.arrows[0];
        assert!(approx(arrow.from.x, 3.0));
        assert!(approx(arrow.from.y, 0.95));
        assert!(approx(arrow.to.x, 2.2));
        assert!(approx(arrow.to.y, 0.45));
    }

    #[test]
    fn test_diagram_rejects_bad_arrows() {
        let row = utf8_row();
        let missing = Arrow {
            from_row: 0,
            from_cell: 0.0,
            to_row: 3,
            to_cell: 0.0,
        };
        assert!(matches!(
            Diagram::compile(CellStyle::default(), 1.0, vec![row.clone()], vec![missing]),
            Err(LayoutError::InvalidRow(_))
        ));

        let self_loop = Arrow {
            from_row: 0,
            from_cell: 0.0,
            to_row: 0,
            to_cell: 1.0,
        };
        assert!(matches!(
            Diagram::compile(CellStyle::default(), 1.0, vec![row], vec![self_loop]),
            Err(LayoutError::InvalidRow(_))
        ));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let diagram = Diagram::compile(CellStyle::default(), 1.0, vec![utf8_row()], Vec::new()).unwrap();
        assert_eq!(diagram.layout(), diagram.layout());
    }
}
