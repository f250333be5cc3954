//! Fixed-width unsigned values.

use crate::{bits, errors::LayoutError};

/// An unsigned integer with a declared bit width.
///
/// The width is fixed at construction and the value always fits into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitValue {
    value: u64,
    width: u32,
}

impl BitValue {
    pub fn new(value: u64, width: u32) -> Result<Self, LayoutError> {
        if width == 0 || width > 64 {
            return Err(LayoutError::InvalidWidth(width));
        }

        if value & !bits::width_mask(width) != 0 {
            return Err(LayoutError::ValueOutOfRange { value, width });
        }

        Ok(BitValue { value, width })
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Binary digits, most significant first.
    pub fn bits(&self) -> Vec<u8> {
        bits::bit_digits(self.value, self.width)
    }

    /// Hex digits, most significant nibble first.
    pub fn nibbles(&self) -> Vec<u8> {
        bits::nibble_digits(self.value, self.width)
    }

    /// The two's-complement negation within the same width.
    pub fn negated(&self) -> Self {
        BitValue {
            value: bits::negate(self.value, self.width),
            width: self.width,
        }
    }

    /// The value read as a two's-complement number.
    pub fn signed(&self) -> i128 {
        bits::signed_value(self.value, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_width() {
        assert_eq!(BitValue::new(0, 0), Err(LayoutError::InvalidWidth(0)));
        assert_eq!(BitValue::new(0, 65), Err(LayoutError::InvalidWidth(65)));
    }

    #[test]
    fn test_new_rejects_value_out_of_range() {
        assert_eq!(
            BitValue::new(0x1_0000, 16),
            Err(LayoutError::ValueOutOfRange {
                value: 0x1_0000,
                width: 16
            })
        );
        assert!(BitValue::new(0xFFFF, 16).is_ok());
        assert!(BitValue::new(u64::MAX, 64).is_ok());
    }

    #[test]
    fn test_negated() {
        let value = BitValue::new(0x6CD8932F, 32).unwrap();
        assert_eq!(value.signed(), 1808827695);
        assert_eq!(value.negated().value(), 0x93276CD1);
        assert_eq!(value.negated().signed(), -1808827695);
        assert_eq!(value.negated().negated(), value);
    }
}
