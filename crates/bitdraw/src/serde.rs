//! JSON‑deserializable diagram description.
//!
//! These types describe *what* a diagram shows: the values, their widths,
//! the fields to outline and how rows are connected. They are meant to be
//! read from a diagram file and then compiled into a
//! [`Diagram`](crate::diagram::Diagram) with `Diagram::try_from`.
//!
//! ```json
//! {
//!   "rows": [
//!     { "value": 233, "width": 16, "nibbles": "Above",
//!       "fields": [{ "label": "", "low_bit": 11, "high_bit": 15, "shade": "Dark" }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top‑level diagram definition.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DiagramDef {
    /// Edge length of a bit cell in centimetres; defaults to 0.4.
    #[serde(default)]
    pub cell_size: Option<f64>,
    /// Space inserted between bit groups; defaults to 0.1.
    #[serde(default)]
    pub group_gap: Option<f64>,
    /// Vertical distance between rows; defaults to 1.0.
    #[serde(default)]
    pub row_spacing: Option<f64>,
    /// Rows from top to bottom.
    pub rows: Vec<RowDef>,
    /// Arrows connecting positions on different rows.
    #[serde(default)]
    pub arrows: Vec<ArrowDef>,
}

/// One value drawn as a row of bit cells.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RowDef {
    /// The value to display.
    pub value: u64,
    /// Width in bits, 1..=64.
    pub width: u32,
    /// Field spans to outline or shade.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Side of the hex digits; omitted hides them.
    #[serde(default)]
    pub nibbles: Option<PlacementDef>,
    /// Insert a gap after every `group_bits` bits.
    #[serde(default)]
    pub group_bits: Option<u32>,
    /// Decimal label after the row.
    #[serde(default)]
    pub decimal: Option<DecimalDef>,
}

/// A named span of bits, bit 0 being the least significant.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    /// Caption; may be empty.
    #[serde(default)]
    pub label: String,
    pub low_bit: u32,
    pub high_bit: u32,
    /// Optional fill; defaults to an outline.
    #[serde(default)]
    pub shade: Option<ShadeDef>,
}

/// Fill of a field box.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub enum ShadeDef {
    #[default]
    /// Outline only.
    None,
    /// Light grey.
    Light,
    /// Dark grey.
    Dark,
}

/// Side of a row.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub enum PlacementDef {
    Above,
    Below,
}

/// Format of the decimal label.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub enum DecimalDef {
    /// Plain unsigned value.
    Unsigned,
    /// Two's‑complement value.
    Signed,
}

/// Arrow between two rows; cell positions may be fractional.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ArrowDef {
    pub from_row: usize,
    pub from_cell: f64,
    pub to_row: usize,
    pub to_cell: f64,
}
