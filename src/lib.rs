//! # coinrates
//!
//! A Rust client for a CoinCap-backed crypto rates app, for native and WASM
//! targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Newtypes, formatting, domain models (always available, WASM-safe)
//! 2. **HTTP API** — `CoinCapHttp`, one method per endpoint
//! 3. **WebSocket** — Compile-time dispatch: `tokio-tungstenite` (native) / `web-sys` (WASM)
//! 4. **Theme** — Light/dark store over pluggable storage
//! 5. **High-Level Client** — `RatesClient` with nested sub-clients
//! 6. **Views** — Rates list and asset detail view models
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinrates::prelude::*;
//!
//! let client = RatesClient::builder().build()?;
//!
//! let mut rates = RatesView::new();
//! rates.load(&client).await?;
//!
//! let mut live = LivePrices::new(client.native_connector());
//! live.set_assets(rates.subscription_assets());
//! while let Some(update) = live.next().await {
//!     rates.apply_prices(&update);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting helpers.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Crate error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Runtime configuration.
pub mod config;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client for the CoinCap REST API.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: WebSocket ───────────────────────────────────────────────────────

/// Prices feed: subscription keys, feed stream, transports.
pub mod ws;

// ── Layer 4: Theme ───────────────────────────────────────────────────────────

/// Theme store, storage backends, chart palette.
pub mod theme;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `RatesClient` — the primary entry point — and the `AssetSource` seam.
pub mod client;

// ── Layer 6: Views ───────────────────────────────────────────────────────────

/// Page view models.
pub mod view;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + formatting
    pub use crate::shared::fmt::{
        format_big_number, format_percent, format_price, format_supply, format_volume,
    };
    pub use crate::shared::{AssetId, Interval};

    // Domain types
    pub use crate::domain::asset::{Asset, AssetBoard, AssetsResult, LiveAsset, PriceDirection, Trend};
    pub use crate::domain::history::{HistoryPoint, HistoryState};

    // Errors
    pub use crate::error::{FetchError, RatesError, StorageError, TransportError};

    // Network + config
    pub use crate::config::RatesConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_WS_URL};

    // Client + sub-clients
    pub use crate::client::AssetSource;
    #[cfg(feature = "http")]
    pub use crate::client::{AssetsClient, HistoryClient, RatesClient, RatesClientBuilder};

    // WebSocket types
    pub use crate::ws::{FeedConnector, LivePrices, PriceFeed, PriceUpdate, SubscriptionKey, WsConfig};
    #[cfg(feature = "ws-native")]
    pub use crate::ws::native::NativeConnector;
    #[cfg(all(feature = "ws-wasm", target_arch = "wasm32"))]
    pub use crate::ws::wasm::WasmConnector;

    // Theme
    pub use crate::theme::{FileStorage, MemoryStorage, Palette, Theme, ThemeStorage, ThemeStore};

    // Views
    pub use crate::view::{
        Cancelled, ChartSeries, DetailRender, DetailView, RatesRender, RatesView, ViewLifetime,
    };
}
