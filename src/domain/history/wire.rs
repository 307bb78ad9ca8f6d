//! Wire types for price history (REST).

use crate::domain::asset::wire::DataResponse;
use serde::{Deserialize, Serialize};

/// A single history sample from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPointResponse {
    #[serde(rename = "priceUsd")]
    pub price_usd: String,
    pub time: i64,
    /// ISO 8601 rendering of `time`; redundant, kept for completeness.
    #[serde(default)]
    pub date: Option<String>,
}

pub type HistoryResponse = DataResponse<Vec<HistoryPointResponse>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_envelope() {
        let json = r#"{
            "data": [
                { "priceUsd": "6379.39", "time": 1530403200000, "date": "2018-07-01T00:00:00.000Z" },
                { "priceUsd": "6466.23", "time": 1530489600000, "date": "2018-07-02T00:00:00.000Z" }
            ],
            "timestamp": 1533581100966
        }"#;
        let resp: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[1].time, 1530489600000);
    }
}
