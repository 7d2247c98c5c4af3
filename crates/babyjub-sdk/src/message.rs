//! Parsing of field elements given as text

use crate::error::{Result, SdkError};
use num_bigint::BigUint;
use num_traits::Num;

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
///
/// Range checks against the field modulus happen where the value is used.
pub fn parse_field_element(text: &str) -> Result<BigUint> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => BigUint::from_str_radix(hex, 16),
        None => BigUint::from_str_radix(text, 10),
    };
    parsed.map_err(|_| SdkError::InvalidNumber(text.to_string()))
}

/// Parse a comma-separated list of field elements. Empty items are skipped.
pub fn parse_field_list(text: &str) -> Result<Vec<BigUint>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_field_element)
        .collect()
}
