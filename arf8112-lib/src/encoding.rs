//! Small conversions shared by the decoder and callers working with raw
//! ARF8112 frames.

use crate::constants::NIBBLE_MASK;

/// Uppercase hex without prefix, e.g. `9F1A`
pub fn to_hex_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Packed BCD, most significant byte first. Nibbles are not validated.
///
/// Returns `None` when the value does not fit in a `u64`.
pub fn bcd_to_number(bytes: &[u8]) -> Option<u64> {
    bytes.iter().try_fold(0u64, |acc, &b| {
        let high = (b >> 4) as u64;
        let low = (b & NIBBLE_MASK) as u64;
        acc.checked_mul(100)?.checked_add(high * 10 + low)
    })
}

/// 16-bit float with 1 sign bit, 8 exponent bits (bias 127) and 7 significand bits.
///
/// An all-ones exponent decodes to 0.0 rather than infinity/NaN.
pub fn half_float_to_f32(raw: u16) -> f32 {
    let sign = if raw & 0x8000 != 0 { -1.0 } else { 1.0 };
    let exponent = ((raw >> 7) & 0xFF) as i32 - 127;
    let significand = (raw & 0x7F) as f32;

    match exponent {
        128 => 0.0,
        -127 if significand == 0.0 => sign * 0.0,
        -127 => sign * (significand / 64.0) * 2f32.powi(-126),
        _ => sign * ((significand + 128.0) / 128.0) * 2f32.powi(exponent),
    }
}
