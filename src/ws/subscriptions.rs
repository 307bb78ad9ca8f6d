//! Subscription keys for the prices channel.

use super::WsConfig;
use crate::error::TransportError;
use crate::shared::AssetId;
use std::collections::BTreeSet;

/// A normalized, non-empty set of asset ids.
///
/// Ids are sorted and de-duplicated, so sets that are equal as sets produce
/// equal keys regardless of input order. The key identifies one connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionKey {
    ids: Vec<AssetId>,
    joined: String,
}

impl SubscriptionKey {
    pub fn new<I, T>(ids: I) -> Result<Self, TransportError>
    where
        I: IntoIterator<Item = T>,
        T: Into<AssetId>,
    {
        let set: BTreeSet<AssetId> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id: &AssetId| !id.as_str().trim().is_empty())
            .collect();

        if set.is_empty() {
            return Err(TransportError::EmptyAssetSet);
        }

        let ids: Vec<AssetId> = set.into_iter().collect();
        let joined = ids
            .iter()
            .map(AssetId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        Ok(Self { ids, joined })
    }

    pub fn ids(&self) -> &[AssetId] {
        &self.ids
    }

    pub fn as_str(&self) -> &str {
        &self.joined
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Connection URL for this key.
    pub fn url(&self, config: &WsConfig) -> String {
        let encoded = self
            .ids
            .iter()
            .map(|id| urlencoding::encode(id.as_str()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}/prices?assets={}",
            config.url.trim_end_matches('/'),
            encoded
        )
    }
}

impl std::fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.joined)
    }
}
