//! Display formatting for prices, volumes and supplies.
//!
//! All helpers take the raw decimal strings CoinCap returns and never fail:
//! input that does not parse as a number renders as [`PLACEHOLDER`].

pub mod decimal;
pub mod num;

pub use decimal::{
    format_big_number, format_percent, format_price, format_supply, format_volume,
    parse_decimal, PLACEHOLDER,
};
