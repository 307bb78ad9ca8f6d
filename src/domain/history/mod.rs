//! Price history domain: chart points per interval.

#[cfg(feature = "http")]
pub mod client;
pub mod state;
pub mod wire;

use crate::shared::fmt::parse_decimal;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

pub use state::HistoryState;

/// A single point of an asset's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Price as a decimal string.
    pub price_usd: String,
    /// Unix timestamp in milliseconds.
    pub time: i64,
}

impl HistoryPoint {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.time)
    }

    /// Price as f64 for plotting. Unparsable prices plot as NaN.
    pub fn value(&self) -> f64 {
        parse_decimal(&self.price_usd)
            .and_then(|d| d.to_f64())
            .unwrap_or(f64::NAN)
    }
}

impl From<wire::HistoryPointResponse> for HistoryPoint {
    fn from(p: wire::HistoryPointResponse) -> Self {
        Self {
            price_usd: p.price_usd,
            time: p.time,
        }
    }
}
