//! Price history sub-client.

use super::HistoryPoint;
use crate::client::RatesClient;
use crate::error::RatesError;
use crate::shared::Interval;

/// Sub-client for price history operations.
pub struct History<'a> {
    pub(crate) client: &'a RatesClient,
}

impl<'a> History<'a> {
    /// Fetch an asset's history at `interval`, oldest point first.
    pub async fn get(&self, id: &str, interval: Interval) -> Result<Vec<HistoryPoint>, RatesError> {
        let resp = self.client.http.get_asset_history(id, interval).await?;
        let mut points: Vec<HistoryPoint> = resp.data.into_iter().map(HistoryPoint::from).collect();
        points.sort_by_key(|p| p.time);
        Ok(points)
    }
}
