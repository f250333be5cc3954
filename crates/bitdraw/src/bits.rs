//! Bit and nibble extraction for display.
//!
//! Digits are produced in MSB-first order: index 0 is the most significant
//! bit (or nibble) of the value. None of these functions fail; a value wider
//! than `width` simply loses its high bits.

/// Mask covering the low `width` bits (`width` up to 64).
pub fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Returns the bit at MSB-first position `index` of a `width`-bit value. Returns 0 or 1.
///
/// Positions outside the width read as 0.
pub fn bit_at(value: u64, width: u32, index: u32) -> u8 {
    width
        .checked_sub(index)
        .and_then(|n| n.checked_sub(1))
        .and_then(|shift| value.checked_shr(shift))
        .map_or(0, |v| (v & 1) as u8)
}

/// Returns the `width` binary digits of `value`, most significant first.
pub fn bit_digits(value: u64, width: u32) -> Vec<u8> {
    (0..width).map(|i| bit_at(value, width, i)).collect()
}

/// Returns nibble `k` (MSB-first) of a `width`-bit value, in 0..=15.
///
/// Nibbles outside the width read as 0.
pub fn nibble_at(value: u64, width: u32, k: u32) -> u8 {
    k.checked_mul(4)
        .and_then(|bits| bits.checked_add(4))
        .and_then(|bits| width.checked_sub(bits))
        .and_then(|shift| value.checked_shr(shift))
        .map_or(0, |v| (v & 0xF) as u8)
}

/// Returns the `width / 4` hexadecimal digits of `value`, most significant first.
///
/// Trailing bits of a width that is not a multiple of 4 are ignored.
pub fn nibble_digits(value: u64, width: u32) -> Vec<u8> {
    (0..width / 4).map(|k| nibble_at(value, width, k)).collect()
}

/// Uppercase hexadecimal character for a nibble.
pub fn hex_char(nibble: u8) -> char {
    char::from_digit(u32::from(nibble & 0xF), 16)
        .unwrap_or('0')
        .to_ascii_uppercase()
}

/// Renders the nibbles of `value` as an uppercase hex string, e.g. `"6CD8932F"`.
pub fn hex_string(value: u64, width: u32) -> String {
    nibble_digits(value, width).into_iter().map(hex_char).collect()
}

/// True if the most significant bit of a `width`-bit value is set.
///
/// A width of 0 has no sign bit.
pub fn sign_bit(value: u64, width: u32) -> bool {
    width
        .checked_sub(1)
        .and_then(|shift| value.checked_shr(shift))
        .is_some_and(|v| v & 1 == 1)
}

/// Two's-complement negation: invert all `width` bits, then add one.
pub fn negate(value: u64, width: u32) -> u64 {
    let mask = width_mask(width);
    ((value ^ mask) & mask).wrapping_add(1) & mask
}

/// Interprets a `width`-bit pattern as a two's-complement number.
///
/// With the sign bit set the result is `-((value ^ mask) + 1)`, otherwise
/// `value` itself. `i128` keeps the magnitude of the 64-bit minimum exact.
/// A width of 0 reads as 0.
pub fn signed_value(value: u64, width: u32) -> i128 {
    if width == 0 {
        return 0;
    }
    let mask = width_mask(width);
    let value = value & mask;
    if sign_bit(value, width) {
        -(i128::from(value ^ mask) + 1)
    } else {
        i128::from(value)
    }
}
