//! Low-level HTTP client — `CoinCapHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). No retries and no caching: every call is
//! exactly one request.

use crate::domain::asset::wire::{AssetDetailResponse, AssetsResponse};
use crate::domain::history::wire::HistoryResponse;
use crate::error::FetchError;
use crate::shared::Interval;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the CoinCap REST API.
#[derive(Clone)]
pub struct CoinCapHttp {
    base_url: String,
    client: Client,
    /// Optional API key, sent as a bearer token.
    api_key: Option<String>,
}

impl CoinCapHttp {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.pool_max_idle_per_host(10);
            if let Some(t) = timeout {
                builder = builder.timeout(t);
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Assets ───────────────────────────────────────────────────────────

    pub async fn get_assets(&self) -> Result<AssetsResponse, FetchError> {
        let url = format!("{}/assets", self.base_url);
        self.get(&url).await
    }

    pub async fn get_asset(&self, id: &str) -> Result<AssetDetailResponse, FetchError> {
        let url = format!("{}/assets/{}", self.base_url, urlencoding::encode(id));
        self.get(&url).await
    }

    // ── History ──────────────────────────────────────────────────────────

    pub async fn get_asset_history(
        &self,
        id: &str,
        interval: Interval,
    ) -> Result<HistoryResponse, FetchError> {
        let url = history_url(&self.base_url, id, interval);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(url = %url, "GET");
        let mut req = self.client.get(url);

        if let Some(key) = self.api_key.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let body_text = resp.text().await.unwrap_or_default();
        tracing::debug!(url = %url, status = status.as_u16(), "Request failed");
        Err(FetchError::from_status(status.as_u16(), body_text))
    }
}

fn history_url(base_url: &str, id: &str, interval: Interval) -> String {
    format!(
        "{}/assets/{}/history?interval={}",
        base_url,
        urlencoding::encode(id),
        interval.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = CoinCapHttp::new("https://api.coincap.io/v2/", None, None).unwrap();
        assert_eq!(http.base_url(), "https://api.coincap.io/v2");
    }

    #[test]
    fn test_history_url() {
        assert_eq!(
            history_url("https://api.coincap.io/v2", "bitcoin", Interval::Hour6),
            "https://api.coincap.io/v2/assets/bitcoin/history?interval=h6"
        );
    }

    #[test]
    fn test_history_url_encodes_id() {
        assert_eq!(
            history_url("http://x", "usd coin", Interval::Day1),
            "http://x/assets/usd%20coin/history?interval=d1"
        );
    }
}
