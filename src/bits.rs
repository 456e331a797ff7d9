//! Conversions between bit vectors and their textual `"0101"` form, plus
//! compression-ratio reporting.

use crate::error::{Error, Result};

/// Render a bit vector as a string of `'0'` and `'1'`.
///
/// # Errors
/// Returns `Error::MalformedStream` at the first element that is not 0 or 1.
pub fn to_bit_string(bits: &[u8]) -> Result<String> {
    bits.iter()
        .enumerate()
        .map(|(pos, &b)| match b {
            0 => Ok('0'),
            1 => Ok('1'),
            other => Err(Error::malformed(pos, format!("not a bit: {other}"))),
        })
        .collect()
}

/// Parse a string of `'0'` and `'1'` into a bit vector.
///
/// # Errors
/// Returns `Error::MalformedStream` at the first other character.
pub fn parse_bit_string(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(pos, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(Error::malformed(pos, format!("not a bit: {other:?}"))),
        })
        .collect()
}

/// Encoded size relative to 8 bits per input symbol.
///
/// Returns `None` for an empty message.
pub fn compression_ratio(encoded_bits: usize, symbols: usize) -> Option<f64> {
    if symbols == 0 {
        return None;
    }
    Some(encoded_bits as f64 / (symbols as f64 * 8.0))
}
