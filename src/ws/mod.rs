//! WebSocket layer — the CoinCap prices feed.
//!
//! The actual WS transport is compile-time dispatched:
//! - `ws-native` feature → `tokio-tungstenite` (native.rs)
//! - `ws-wasm` feature → `web-sys::WebSocket` (wasm.rs)
//!
//! Both implement [`FeedConnector`] and hand out the same [`PriceFeed`]
//! stream. This module defines the shared message and config types.

pub mod feed;
pub mod subscriptions;

#[cfg(feature = "ws-native")]
pub mod native;

#[cfg(all(feature = "ws-wasm", target_arch = "wasm32"))]
pub mod wasm;

use crate::shared::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use feed::{FeedConnector, LivePrices, PriceFeed, PriceSink};
pub use subscriptions::SubscriptionKey;

// ─── Inbound messages ────────────────────────────────────────────────────────

/// One batch pushed by the prices channel: asset id → latest price.
///
/// Wire format is a flat JSON object, e.g. `{"bitcoin":"67012.31"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceUpdate(HashMap<AssetId, String>);

impl PriceUpdate {
    pub fn new(prices: HashMap<AssetId, String>) -> Self {
        Self(prices)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<AssetId>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, id: &AssetId) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> HashMap<AssetId, String> {
        self.0
    }
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Configuration for the prices feed.
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Base URL; the feed connects to `{url}/prices?assets=...`.
    pub url: String,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: crate::network::DEFAULT_WS_URL.to_string(),
        }
    }
}
