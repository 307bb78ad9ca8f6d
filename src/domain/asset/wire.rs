//! Wire types for asset responses (REST).

use serde::{Deserialize, Serialize};

/// CoinCap wraps every payload in `{ "data": ..., "timestamp": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataResponse<T> {
    pub data: T,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

pub type AssetsResponse = DataResponse<Vec<AssetResponse>>;
pub type AssetDetailResponse = DataResponse<AssetResponse>;

/// Raw asset from the REST API. CoinCap sends `null` for unknown values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetResponse {
    pub id: String,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub supply: Option<String>,
    #[serde(rename = "maxSupply", default)]
    pub max_supply: Option<String>,
    #[serde(rename = "marketCapUsd", default)]
    pub market_cap_usd: Option<String>,
    #[serde(rename = "volumeUsd24Hr", default)]
    pub volume_usd_24h: Option<String>,
    #[serde(rename = "priceUsd", default)]
    pub price_usd: Option<String>,
    #[serde(rename = "changePercent24Hr", default)]
    pub change_percent_24h: Option<String>,
    #[serde(rename = "vwap24Hr", default)]
    pub vwap_24h: Option<String>,
    #[serde(default)]
    pub explorer: Option<String>,
}
