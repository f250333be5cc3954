//! Error types for building bit values, field spans and diagrams.

use thiserror::Error;

/// Errors produced when compiling values, fields or rows into a renderable [crate::diagram::Diagram].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Width is 0 or greater than 64 bits.
    #[error("bit width {0} is outside 1..=64")]
    InvalidWidth(u32),
    /// Value does not fit into the declared width.
    #[error("value {value:#x} does not fit into {width} bits")]
    ValueOutOfRange { value: u64, width: u32 },
    /// Field has `low_bit > high_bit`.
    #[error("field `{label}` has low bit {low_bit} above high bit {high_bit}")]
    InvalidFieldSpan {
        label: String,
        low_bit: u32,
        high_bit: u32,
    },
    /// Field reaches past the most significant bit of its value.
    #[error("field `{label}` ends at bit {high_bit} but the value is only {width} bits wide")]
    FieldOutOfRange {
        label: String,
        high_bit: u32,
        width: u32,
    },
    /// Row or arrow configuration is unusable (e.g. arrow refers to a missing row).
    #[error("invalid row: {0}")]
    InvalidRow(String),
}

/// A defect in how a set of [crate::field::FieldSpec]s covers a width.
///
/// The renderer draws fields as given; these are only reported by
/// [crate::field::check_partition].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionIssue {
    /// Bits `low..=high` belong to no field.
    #[error("bits {low}..={high} are not covered by any field")]
    Gap { low: u32, high: u32 },
    /// Two fields claim the same bit.
    #[error("fields `{first}` and `{second}` overlap at bit {bit}")]
    Overlap {
        first: String,
        second: String,
        bit: u32,
    },
}
