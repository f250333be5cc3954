//! Geometry and the deterministic layout arithmetic for cells, brackets and fields.
//!
//! Coordinates are diagram units (centimetres) with `y` pointing up, so a
//! cell at `(x, y)` extends to `(x + size, y + size)`. Surfaces convert to
//! their own coordinate system when painting.

use crate::{field::Shade, glyph::Placement};

/// Vertical distance between the bottom of a cell and the text baseline.
pub const BASELINE: f64 = 0.07;
/// Inner gap between a cell edge and the start of a nibble bracket.
pub const BRACKET_GAP: f64 = 0.03;
/// Height of a nibble bracket's legs.
pub const BRACKET_LEG: f64 = 0.04;
/// Distance between a cell edge and a nibble label.
pub const NIBBLE_LABEL_OFFSET: f64 = 0.14;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Sizes shared by every row of a diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellStyle {
    /// Edge length of a bit cell.
    pub cell_size: f64,
    /// Extra horizontal space inserted after every group of bits.
    pub group_gap: f64,
}

impl Default for CellStyle {
    fn default() -> Self {
        CellStyle {
            cell_size: 0.4,
            group_gap: 0.1,
        }
    }
}

impl CellStyle {
    /// Left edge of the cell at MSB-first `index`.
    ///
    /// With `group_bits` set, `group_gap` is added once per completed group.
    pub fn cell_x(&self, origin_x: f64, index: u32, group_bits: Option<u32>) -> f64 {
        let groups = match group_bits {
            Some(n) if n > 0 => index / n,
            _ => 0,
        };
        origin_x + f64::from(index) * self.cell_size + f64::from(groups) * self.group_gap
    }
}

/// A three-segment bracket spanning a nibble, open towards the cells.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bracket {
    pub points: [Point; 4],
}

impl Bracket {
    /// Bracket over the cells between `left` and `right`, inset by `0.2 *
    /// cell` at both ends and attached to the edge at `edge_y` on the
    /// `placement` side.
    pub fn over_nibble(left: f64, right: f64, edge_y: f64, cell: f64, placement: Placement) -> Self {
        let sign = match placement {
            Placement::Above => 1.0,
            Placement::Below => -1.0,
        };
        let near = edge_y + sign * BRACKET_GAP;
        let far = edge_y + sign * (BRACKET_GAP + BRACKET_LEG);
        let x0 = left + 0.2 * cell;
        let x1 = right - 0.2 * cell;

        Bracket {
            points: [
                Point::new(x0, near),
                Point::new(x0, far),
                Point::new(x1, far),
                Point::new(x1, near),
            ],
        }
    }
}

/// Options for [layout_partition].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionOptions {
    /// Lower-left corner of the first field.
    pub origin: Point,
    /// Width of one bit; also the height of every field box.
    pub cell_size: f64,
    /// Horizontal space between consecutive fields.
    pub gap: f64,
    /// Side of the box the caption goes on.
    pub caption: Placement,
    /// Distance between the box edge and the caption anchor.
    pub caption_offset: f64,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        PartitionOptions {
            origin: Point::default(),
            cell_size: 0.4,
            gap: 0.0,
            caption: Placement::Below,
            caption_offset: 0.2,
        }
    }
}

/// A laid out field: its box and where its caption goes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldBox {
    pub label: String,
    pub bits: u32,
    pub rect: Rect,
    pub shade: Shade,
    /// Horizontally centred caption anchor.
    pub caption: Point,
    pub placement: Placement,
}

/// Lays out fields left to right in the given order.
///
/// Each field gets a box `bits * cell_size` wide; the running offset grows by
/// the box width plus `gap`. There is no reflow or collision handling.
pub fn layout_partition<S: AsRef<str>>(parts: &[(S, u32)], options: &PartitionOptions) -> Vec<FieldBox> {
    let mut boxes = Vec::with_capacity(parts.len());
    let mut x = options.origin.x;
    let y = options.origin.y;

    for (label, bits) in parts {
        let rect = Rect::new(x, y, f64::from(*bits) * options.cell_size, options.cell_size);
        let caption_y = match options.caption {
            Placement::Above => rect.top() + options.caption_offset,
            Placement::Below => rect.y - options.caption_offset,
        };

        boxes.push(FieldBox {
            label: label.as_ref().to_string(),
            bits: *bits,
            rect,
            shade: Shade::None,
            caption: Point::new(rect.center().x, caption_y),
            placement: options.caption,
        });

        x = rect.right() + options.gap;
    }

    boxes
}
