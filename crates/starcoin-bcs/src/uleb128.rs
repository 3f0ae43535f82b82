//! ULEB128 encoding for lengths and variant indices.
//!
//! Seven value bits per byte, low group first, high bit set on every byte
//! except the last. BCS restricts these to `u32` and requires the minimal
//! form, so a given count has exactly one valid encoding.

use crate::BcsError;

/// Maximum number of bytes a `u32` ULEB128 value may occupy.
pub const MAX_ULEB128_U32_BYTES: usize = 5;

/// Append the minimal ULEB128 encoding of `value` to `out`.
pub fn encode(mut value: u32, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Return the number of bytes the minimal encoding of `value` occupies.
pub fn encoded_len(value: u32) -> usize {
    let mut len = 1;
    let mut v = value >> 7;
    while v != 0 {
        len += 1;
        v >>= 7;
    }
    len
}

/// Decode a ULEB128 `u32` from the front of `data`.
///
/// # Returns
/// The value and the number of bytes consumed, or `MalformedLength` for a
/// non-minimal or overflowing encoding and `UnexpectedEof` for truncation.
pub fn decode(data: &[u8]) -> Result<(u32, usize), BcsError> {
    let mut value: u64 = 0;
    for (i, shift) in (0..32).step_by(7).enumerate() {
        let byte = *data.get(i).ok_or(BcsError::UnexpectedEof {
            needed: 1,
            remaining: 0,
        })?;
        let digit = byte & 0x7f;
        value |= u64::from(digit) << shift;
        if digit == byte {
            if shift > 0 && digit == 0 {
                return Err(BcsError::MalformedLength(
                    "non-canonical uleb128 encoding".to_string(),
                ));
            }
            let value = u32::try_from(value).map_err(|_| {
                BcsError::MalformedLength("uleb128 value overflows u32".to_string())
            })?;
            return Ok((value, i + 1));
        }
    }
    Err(BcsError::MalformedLength(
        "uleb128 encoding longer than 5 bytes".to_string(),
    ))
}
