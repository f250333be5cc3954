//! UTF-8 byte packing used to illustrate 2- and 3-byte encodings.
//!
//! These are fixed arithmetic formulas that place the payload bits of a code
//! point into the `110xxxxx 10xxxxxx` and `1110xxxx 10xxxxxx 10xxxxxx`
//! templates. They do not validate their input and do not cover 1- or 4-byte
//! sequences or surrogates; use [`char::encode_utf8`] for real encoding.

/// Packs a code point into the 2-byte template `0xC080`.
///
/// `pack_utf8_2(0xE9) == 0xC3A9` (é).
pub fn pack_utf8_2(cp: u32) -> u32 {
    0xC080 + (((cp >> 6) & 0x1F) << 8) + (cp & 0x3F)
}

/// Packs a code point into the 3-byte template `0xE08080`.
///
/// `pack_utf8_3(0x221E) == 0xE288BE` (∞).
pub fn pack_utf8_3(cp: u32) -> u32 {
    0xE08080 + (((cp >> 12) & 0x0F) << 16) + (((cp >> 6) & 0x3F) << 8) + (cp & 0x3F)
}

/// Hex text of the byte sequence shown for `cp` in the Unicode table.
///
/// Two digits for ASCII, four for the 2-byte range, six for the rest of the
/// Basic Multilingual Plane. Code points above U+FFFF have no entry.
pub fn table_hex(cp: u32) -> Option<String> {
    match cp {
        0..=0x7F => Some(format!("{cp:02X}")),
        0x80..=0x7FF => Some(format!("{:04X}", pack_utf8_2(cp))),
        0x800..=0xFFFF => Some(format!("{:06X}", pack_utf8_3(cp))),
        _ => None,
    }
}
