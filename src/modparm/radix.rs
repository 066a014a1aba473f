//! Numeric parsing and formatting.
//!
//! The session radix only decides how operator input is parsed. Every rendered
//! value is shown in decimal and hex at once, bitmask values also in binary.

use crate::error::{ModparmError, Result};
use crate::model::Radix;

/// Width of the binary rendering of a bitmask value.
pub const BITMASK_WIDTH: u32 = 8;

/// Parses an edit value typed by the operator.
///
/// Returns `Ok(None)` for empty (whitespace-only) input, which callers treat
/// as "keep the current value".
pub fn parse_value(input: &str, radix: Radix) -> Result<Option<i64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits = match radix {
        Radix::Hex => unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
            .unwrap_or(unsigned),
        Radix::Decimal => unsigned,
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix.base())) {
        return Err(ModparmError::InvalidNumber(trimmed.to_string()));
    }

    // Parse with the sign attached so i64::MIN stays representable.
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    i64::from_str_radix(&signed, radix.base())
        .map(Some)
        .map_err(|_| ModparmError::InvalidNumber(trimmed.to_string()))
}

/// Reads the leading decimal integer of a parameter file, `cat`-style.
///
/// Returns `None` when the content does not start with an integer.
pub fn parse_leading_int(content: &str) -> Option<i64> {
    let text = content.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digit_len = text[sign_len..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digit_len == 0 {
        return None;
    }
    text[..sign_len + digit_len].parse().ok()
}

/// Zero-padded, at least two-digit lower-case hex (without prefix).
pub fn format_hex(value: i64) -> String {
    format!("{:02x}", value)
}

/// Fixed-width binary of the low byte, most significant bit first.
pub fn format_binary(value: i64) -> String {
    (0..BITMASK_WIDTH)
        .map(|i| {
            if (value >> (BITMASK_WIDTH - 1 - i)) & 1 == 1 {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}
