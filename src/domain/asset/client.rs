//! Assets sub-client: list and fetch by id.

use crate::client::RatesClient;
use crate::domain::asset::{self, Asset, AssetsResult};
use crate::error::RatesError;

/// Sub-client for asset operations.
pub struct Assets<'a> {
    pub(crate) client: &'a RatesClient,
}

impl<'a> Assets<'a> {
    /// Fetch the asset list. Invalid entries are skipped and reported.
    pub async fn list(&self) -> Result<AssetsResult, RatesError> {
        let resp = self.client.http.get_assets().await?;
        let mut result = AssetsResult::default();
        for raw in resp.data {
            match Asset::try_from(raw) {
                Ok(a) => result.assets.push(a),
                Err(e) => {
                    tracing::warn!("Skipping invalid asset: {}", e);
                    result.validation_errors.push(e.to_string());
                }
            }
        }
        Ok(result)
    }

    /// Fetch a single asset by id.
    pub async fn get(&self, id: &str) -> Result<Asset, RatesError> {
        let resp = self.client.http.get_asset(id).await?;
        resp.data
            .try_into()
            .map_err(|e: asset::ValidationError| RatesError::Validation(e.to_string()))
    }
}
