//! High-level client — `RatesClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the accessor methods and [`AssetSource`],
//! the seam views fetch through.

use async_trait::async_trait;

use crate::domain::asset::{Asset, AssetsResult};
use crate::domain::history::HistoryPoint;
use crate::error::RatesError;
use crate::shared::{AssetId, Interval};

#[cfg(feature = "http")]
use crate::config::{RatesConfig, DEFAULT_TIMEOUT};
#[cfg(feature = "http")]
use crate::domain::asset::client::Assets;
#[cfg(feature = "http")]
use crate::domain::history::client::History;
#[cfg(feature = "http")]
use crate::http::CoinCapHttp;
#[cfg(feature = "http")]
use crate::ws::WsConfig;
#[cfg(feature = "http")]
use std::time::Duration;

// Re-export sub-client types for convenience.
#[cfg(feature = "http")]
pub use crate::domain::asset::client::Assets as AssetsClient;
#[cfg(feature = "http")]
pub use crate::domain::history::client::History as HistoryClient;

// ─── AssetSource ─────────────────────────────────────────────────────────────

/// Where views get their baseline data.
///
/// [`RatesClient`] is the production implementation; tests script their own.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AssetSource {
    async fn assets(&self) -> Result<AssetsResult, RatesError>;
    async fn asset(&self, id: &AssetId) -> Result<Asset, RatesError>;
    async fn history(&self, id: &AssetId, interval: Interval) -> Result<Vec<HistoryPoint>, RatesError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: AssetSource + Sync + ?Sized> AssetSource for &T {
    async fn assets(&self) -> Result<AssetsResult, RatesError> {
        (**self).assets().await
    }

    async fn asset(&self, id: &AssetId) -> Result<Asset, RatesError> {
        (**self).asset(id).await
    }

    async fn history(&self, id: &AssetId, interval: Interval) -> Result<Vec<HistoryPoint>, RatesError> {
        (**self).history(id, interval).await
    }
}

// ─── RatesClient ─────────────────────────────────────────────────────────────

/// The primary entry point for the CoinCap API.
///
/// Provides nested sub-client accessors for each domain:
/// `client.assets()`, `client.history()`.
#[cfg(feature = "http")]
#[derive(Clone)]
pub struct RatesClient {
    pub(crate) http: CoinCapHttp,
    pub(crate) ws_config: WsConfig,
}

#[cfg(feature = "http")]
impl RatesClient {
    pub fn builder() -> RatesClientBuilder {
        RatesClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    pub fn http(&self) -> &CoinCapHttp {
        &self.http
    }

    /// Get a WS config for opening price feeds.
    ///
    /// Feeds are not embedded in `RatesClient`: their lifetimes belong to
    /// whichever view consumes them.
    pub fn ws_config(&self) -> &WsConfig {
        &self.ws_config
    }

    /// Create a native feed connector from the current config.
    #[cfg(feature = "ws-native")]
    pub fn native_connector(&self) -> crate::ws::native::NativeConnector {
        crate::ws::native::NativeConnector::new(self.ws_config.clone())
    }

    /// Create a browser feed connector from the current config.
    #[cfg(all(feature = "ws-wasm", target_arch = "wasm32"))]
    pub fn wasm_connector(&self) -> crate::ws::wasm::WasmConnector {
        crate::ws::wasm::WasmConnector::new(self.ws_config.clone())
    }
}

#[cfg(feature = "http")]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AssetSource for RatesClient {
    async fn assets(&self) -> Result<AssetsResult, RatesError> {
        Assets { client: self }.list().await
    }

    async fn asset(&self, id: &AssetId) -> Result<Asset, RatesError> {
        Assets { client: self }.get(id.as_str()).await
    }

    async fn history(&self, id: &AssetId, interval: Interval) -> Result<Vec<HistoryPoint>, RatesError> {
        History { client: self }.get(id.as_str(), interval).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "http")]
pub struct RatesClientBuilder {
    base_url: String,
    ws_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

#[cfg(feature = "http")]
impl Default for RatesClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            ws_url: crate::network::DEFAULT_WS_URL.to_string(),
            api_key: None,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

#[cfg(feature = "http")]
impl RatesClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn ws_url(mut self, url: &str) -> Self {
        self.ws_url = url.to_string();
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Request timeout. `None` disables it. Ignored on wasm.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Take every setting from a [`RatesConfig`].
    pub fn from_config(config: &RatesConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            ws_url: config.ws_url.clone(),
            api_key: config.api_key.clone(),
            timeout: Some(config.timeout),
        }
    }

    pub fn build(self) -> Result<RatesClient, RatesError> {
        Ok(RatesClient {
            http: CoinCapHttp::new(&self.base_url, self.api_key, self.timeout)?,
            ws_config: WsConfig {
                url: self.ws_url.trim_end_matches('/').to_string(),
            },
        })
    }
}
