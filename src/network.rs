//! Network URL constants for the CoinCap API.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coincap.io/v2";

/// Default WebSocket base URL. The prices channel lives at `/prices`.
pub const DEFAULT_WS_URL: &str = "wss://ws.coincap.io";
