//! Number formatting primitives: fixed fraction digits and thousands separators.
//!
//! Rounding is half away from zero, the way browsers round locale output.

use rust_decimal::{Decimal, RoundingStrategy};

/// Adds thousands separators to a string of ASCII digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format `value` with between `min_frac` and `max_frac` fraction digits.
///
/// Trailing zeros past `min_frac` are trimmed. With `grouping` the integer
/// part gets thousands separators.
pub fn format_fraction(value: &Decimal, min_frac: u32, max_frac: u32, grouping: bool) -> String {
    let rounded = value.round_dp_with_strategy(max_frac, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.abs().to_string();

    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.trim_end_matches('0').to_string()),
        None => (text, String::new()),
    };

    let mut fraction = fraction;
    while (fraction.len() as u32) < min_frac {
        fraction.push('0');
    }

    let integer = if grouping {
        group_thousands(&integer)
    } else {
        integer
    };
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}.{}", sign, integer, fraction)
    }
}

/// Format `value` with exactly `decimals` fraction digits.
pub fn format_fixed(value: &Decimal, decimals: u32, grouping: bool) -> String {
    format_fraction(value, decimals, decimals, grouping)
}
