//! Shared helpers used by all section validators.

use regex::Regex;
use std::sync::LazyLock;

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// True for `#RRGGBB` strings.
pub fn is_hex_color(value: &str) -> bool {
    HEX_RE.is_match(value)
}

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is outside `[min, max]` (float).
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error unless `value` is a `#RRGGBB` color.
pub(crate) fn validate_hex(errors: &mut Vec<String>, name: &str, value: &str) {
    if !is_hex_color(value) {
        errors.push(format!("{name} = {value:?} is not a #RRGGBB color"));
    }
}
