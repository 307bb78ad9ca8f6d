//! Display helpers for CoinCap's decimal strings.
//!
//! Values are parsed into `rust_decimal::Decimal` so that prices with many
//! fraction digits and market caps in the trillions format exactly.

use super::num::{format_fixed, format_fraction};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

/// Rendered for missing or unparsable values.
pub const PLACEHOLDER: &str = "-";

static BILLION: OnceLock<Decimal> = OnceLock::new();

fn get_billion() -> &'static Decimal {
    BILLION.get_or_init(|| Decimal::from(1_000_000_000u64))
}

/// Parse a numeric string in plain or scientific notation.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// `$` + value with 2 to 8 fraction digits: `"1234.5"` → `"$1,234.50"`.
pub fn format_price(value: &str) -> String {
    match parse_decimal(value) {
        Some(d) => format!("${}", format_fraction(&d, 2, 8, true)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Value in billions with two decimals: `"2500000000"` → `"$2.50B"`.
pub fn format_big_number(value: &str) -> String {
    match parse_decimal(value) {
        Some(d) => format!("${}B", format_fixed(&(d / get_billion()), 2, false)),
        None => PLACEHOLDER.to_string(),
    }
}

/// `$` + value with exactly two decimals, grouped.
pub fn format_volume(value: &str) -> String {
    match parse_decimal(value) {
        Some(d) => format!("${}", format_fixed(&d, 2, true)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Whole units, grouped. `None` and unparsable input render as `"-"`.
pub fn format_supply(value: Option<&str>) -> String {
    match value.and_then(parse_decimal) {
        Some(d) => format_fixed(&d, 0, true),
        None => PLACEHOLDER.to_string(),
    }
}

/// Percent change with two decimals: `"-1.2345"` → `"-1.23%"`.
pub fn format_percent(value: &str) -> String {
    match parse_decimal(value) {
        Some(d) => format!("{}%", format_fixed(&d, 2, false)),
        None => PLACEHOLDER.to_string(),
    }
}
