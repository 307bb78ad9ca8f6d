//! Asset domain: validated snapshots and live price direction.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::fmt::parse_decimal;
use crate::shared::AssetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub use state::{AssetBoard, LiveAsset};

// ─── Asset ───────────────────────────────────────────────────────────────────

/// A validated asset snapshot.
///
/// Numeric fields keep CoinCap's decimal strings verbatim; use the accessor
/// methods for parsed values. An empty string stands for a value CoinCap
/// reported as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub rank: u32,
    pub symbol: String,
    pub name: String,
    pub price_usd: String,
    pub change_percent_24h: String,
    pub market_cap_usd: String,
    pub volume_usd_24h: String,
    pub supply: Option<String>,
    pub max_supply: Option<String>,
    pub vwap_24h: Option<String>,
    pub explorer: Option<String>,
}

impl Asset {
    pub fn price(&self) -> Option<Decimal> {
        parse_decimal(&self.price_usd)
    }

    pub fn change_percent(&self) -> Option<Decimal> {
        parse_decimal(&self.change_percent_24h)
    }

    /// Sign of the 24h change. A missing change counts as positive.
    pub fn trend(&self) -> Trend {
        match self.change_percent() {
            Some(c) if c.is_sign_negative() && !c.is_zero() => Trend::Negative,
            _ => Trend::Positive,
        }
    }

    /// Case-insensitive substring match on name or symbol.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.symbol.to_lowercase().contains(&term)
    }
}

/// Sign of a 24h percent change, used to color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
}

/// Assets from a list fetch, plus the entries that failed validation.
#[derive(Debug, Clone, Default)]
pub struct AssetsResult {
    pub assets: Vec<Asset>,
    pub validation_errors: Vec<String>,
}

// ─── PriceDirection ──────────────────────────────────────────────────────────

/// Direction of a live price move relative to the previously stored price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
    #[default]
    Unchanged,
}

impl PriceDirection {
    /// Compare two decimal strings. Unparsable input compares as unchanged.
    pub fn between(previous: &str, current: &str) -> Self {
        match (parse_decimal(previous), parse_decimal(current)) {
            (Some(prev), Some(curr)) => match curr.cmp(&prev) {
                Ordering::Greater => PriceDirection::Up,
                Ordering::Less => PriceDirection::Down,
                Ordering::Equal => PriceDirection::Unchanged,
            },
            _ => PriceDirection::Unchanged,
        }
    }

    /// CSS class that highlights a move.
    pub fn flash_class(&self) -> &'static str {
        match self {
            PriceDirection::Up => "flash-green",
            PriceDirection::Down => "flash-red",
            PriceDirection::Unchanged => "",
        }
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(String, Vec<ValidationError>),
    MissingId,
    MissingName,
    MissingSymbol,
    MissingPrice,
    InvalidRank(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Multiple(id, errors) => {
                writeln!(f, "Asset validation errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::MissingId => write!(f, "Missing id"),
            ValidationError::MissingName => write!(f, "Missing name"),
            ValidationError::MissingSymbol => write!(f, "Missing symbol"),
            ValidationError::MissingPrice => write!(f, "Missing price"),
            ValidationError::InvalidRank(rank) => write!(f, "Invalid rank: {}", rank),
        }
    }
}

impl std::error::Error for ValidationError {}
