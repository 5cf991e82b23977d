//! Numeric field cleaning.

use std::sync::LazyLock;

use regex::Regex;

/// First run of ASCII digits. `\d` would also match non-ASCII digits.
static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("Invalid digit regex"));

/// Extracts the first run of ASCII digits in `value` as an integer.
///
/// Returns `None` when the field has no digits, or when the run does not fit
/// in a `u32`.
pub fn clean_value(value: &str) -> Option<u32> {
    DIGITS
        .find(value)
        .and_then(|found| found.as_str().parse().ok())
}
