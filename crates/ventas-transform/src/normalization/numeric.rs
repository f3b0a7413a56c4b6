//! Quantity and price parsing.

use std::collections::BTreeMap;

use ventas_common::parse_f64;

/// Parses a quantity, mapping spelled-out words (`dos`) to digits first.
///
/// Only finite whole numbers are accepted: `2`, `2.0` and `dos` give `2`,
/// while `2.5`, `abc` and blanks give `None`. Word lookup ignores case and
/// surrounding whitespace.
pub fn parse_quantity(value: &str, words: &BTreeMap<String, String>) -> Option<i64> {
    let trimmed = value.trim();
    let candidate = words
        .get(&trimmed.to_lowercase())
        .map_or(trimmed, String::as_str);
    let number = parse_f64(candidate)?;
    if !number.is_finite() || number.fract() != 0.0 || number.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(number as i64)
}

/// Parses a unit price after removing every character of `strip_chars`.
///
/// Non-finite results (`nan`, `inf`) are treated as unparseable.
pub fn parse_price(value: &str, strip_chars: &str) -> Option<f64> {
    let cleaned: String = value.chars().filter(|c| !strip_chars.contains(*c)).collect();
    parse_f64(&cleaned).filter(|price| price.is_finite())
}
