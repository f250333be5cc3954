//! # bitdraw
//!
//! Layout and label computation for teaching diagrams of binary data.
//!
//! Give a value, its bit width and the named fields it consists of; get
//! back the bit digits, the hex nibbles and the rectangles and text anchors
//! needed to draw them. Rows can be stacked into a diagram and connected
//! with arrows, e.g. to show how the bits of a code point move into a UTF-8
//! byte sequence.
//!
//! ## Example
//!
//! ```
//! use bitdraw::diagram::{BitField, DecimalLabel};
//! use bitdraw::glyph::Placement;
//! use bitdraw::layout::{CellStyle, Point};
//! use bitdraw::value::BitValue;
//!
//! let value = BitValue::new(0x6CD8932F, 32).unwrap();
//! let row = BitField::new(value.negated(), vec![])
//!     .unwrap()
//!     .with_nibbles(Placement::Above)
//!     .with_groups(8)
//!     .with_decimal(DecimalLabel::Signed);
//!
//! let layout = row.render(Point::default(), &CellStyle::default());
//! assert_eq!(layout.cells.len(), 32);
//! assert_eq!(layout.nibbles[0].glyph.text(), "9");
//! assert_eq!(layout.decimal.unwrap().text, "= -1808827695");
//! ```

pub mod bits;
pub mod diagram;
pub mod encoding;
pub mod errors;
pub mod field;
pub mod glyph;
pub mod layout;
pub mod presets;
#[cfg(feature = "serde")]
pub mod serde;
pub mod value;
