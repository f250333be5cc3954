//! Named bit spans used to group the cells of a [crate::value::BitValue].

use crate::errors::{LayoutError, PartitionIssue};

/// Fill used for a field rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Shade {
    /// Outline only.
    #[default]
    None,
    /// Light grey fill (marker bits of a UTF-8 sequence).
    Light,
    /// Dark grey fill (bits that carry no payload).
    Dark,
}

impl Shade {
    /// Grey level in 0.0 (black) ..= 1.0 (white), if the field is filled.
    pub fn grey(&self) -> Option<f64> {
        match self {
            Shade::None => None,
            Shade::Light => Some(0.8),
            Shade::Dark => Some(0.5),
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::ShadeDef> for Shade {
    fn from(value: crate::serde::ShadeDef) -> Self {
        match value {
            crate::serde::ShadeDef::None => Shade::None,
            crate::serde::ShadeDef::Light => Shade::Light,
            crate::serde::ShadeDef::Dark => Shade::Dark,
        }
    }
}

/// A named, contiguous span `[low_bit, high_bit]` of a value.
///
/// Bit 0 is the least significant bit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldSpec {
    /// Caption shown with the field.
    pub label: String,
    pub low_bit: u32,
    pub high_bit: u32,
    pub shade: Shade,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, low_bit: u32, high_bit: u32) -> Self {
        FieldSpec {
            label: label.into(),
            low_bit,
            high_bit,
            shade: Shade::None,
        }
    }

    pub fn shaded(mut self, shade: Shade) -> Self {
        self.shade = shade;
        self
    }

    /// Number of bits covered by the span.
    pub fn len_bits(&self) -> u32 {
        self.high_bit - self.low_bit + 1
    }

    /// Checks that the span is ordered and lies inside a value of `width` bits.
    pub fn validate(&self, width: u32) -> Result<(), LayoutError> {
        if self.low_bit > self.high_bit {
            return Err(LayoutError::InvalidFieldSpan {
                label: self.label.clone(),
                low_bit: self.low_bit,
                high_bit: self.high_bit,
            });
        }

        if self.high_bit >= width {
            return Err(LayoutError::FieldOutOfRange {
                label: self.label.clone(),
                high_bit: self.high_bit,
                width,
            });
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldDef> for FieldSpec {
    fn from(value: crate::serde::FieldDef) -> Self {
        FieldSpec {
            label: value.label,
            low_bit: value.low_bit,
            high_bit: value.high_bit,
            shade: value.shade.map(Into::into).unwrap_or_default(),
        }
    }
}

/// Builds MSB-first fields from `(label, bit_count)` pairs, e.g. the
/// sign/exponent/mantissa split of a float.
pub fn fields_from_counts<S: AsRef<str>>(width: u32, parts: &[(S, u32)]) -> Vec<FieldSpec> {
    let mut fields = Vec::with_capacity(parts.len());
    let mut high = width;

    for (label, count) in parts {
        if *count == 0 || *count > high {
            continue;
        }
        fields.push(FieldSpec::new(label.as_ref(), high - count, high - 1));
        high -= count;
    }

    fields
}

/// Reports gaps and overlaps in how `fields` cover the bits `0..width`.
///
/// Fields reaching past `width` are clipped; use [FieldSpec::validate] to
/// reject them.
pub fn check_partition(fields: &[FieldSpec], width: u32) -> Vec<PartitionIssue> {
    if width == 0 {
        return Vec::new();
    }

    let mut owner: Vec<Option<usize>> = vec![None; width as usize];
    let mut issues = Vec::new();

    for (i, field) in fields.iter().enumerate() {
        if field.low_bit > field.high_bit {
            continue;
        }
        for bit in field.low_bit..=field.high_bit.min(width.saturating_sub(1)) {
            match owner[bit as usize] {
                Some(first) => issues.push(PartitionIssue::Overlap {
                    first: fields[first].label.clone(),
                    second: field.label.clone(),
                    bit,
                }),
                None => owner[bit as usize] = Some(i),
            }
        }
    }

    let mut bit = 0;
    while bit < width {
        if owner[bit as usize].is_none() {
            let low = bit;
            while bit + 1 < width && owner[bit as usize + 1].is_none() {
                bit += 1;
            }
            issues.push(PartitionIssue::Gap { low, high: bit });
        }
        bit += 1;
    }

    issues
}
