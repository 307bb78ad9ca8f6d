//! Asset state containers. The app owns them; the update logic lives here.

use super::{Asset, PriceDirection};
use crate::shared::AssetId;
use crate::ws::PriceUpdate;

/// An asset snapshot with its live price and the last move.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveAsset {
    pub asset: Asset,
    pub price_usd: String,
    pub prev_price_usd: String,
    pub direction: PriceDirection,
}

impl From<Asset> for LiveAsset {
    fn from(asset: Asset) -> Self {
        Self {
            price_usd: asset.price_usd.clone(),
            prev_price_usd: asset.price_usd.clone(),
            direction: PriceDirection::Unchanged,
            asset,
        }
    }
}

impl LiveAsset {
    /// Record a new live price and the direction of the move.
    pub fn apply_price(&mut self, price: &str) {
        self.direction = PriceDirection::between(&self.price_usd, price);
        self.prev_price_usd = std::mem::replace(&mut self.price_usd, price.to_string());
    }
}

/// The baseline asset list plus live prices merged on top.
///
/// The app owns instances of this type; merging happens through its methods.
#[derive(Debug, Clone, Default)]
pub struct AssetBoard {
    entries: Vec<LiveAsset>,
}

impl AssetBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the baseline (e.g. from a REST fetch). Live prices are reset.
    pub fn replace(&mut self, assets: Vec<Asset>) {
        self.entries = assets.into_iter().map(LiveAsset::from).collect();
    }

    /// Merge a live price batch.
    ///
    /// Only entries named in the batch change; ids the board does not know
    /// are ignored. Returns the number of entries updated.
    pub fn apply_prices(&mut self, update: &PriceUpdate) -> usize {
        let mut updated = 0;
        for entry in &mut self.entries {
            if let Some(price) = update.get(&entry.asset.id) {
                entry.apply_price(price);
                updated += 1;
            }
        }
        updated
    }

    pub fn get(&self, id: &AssetId) -> Option<&LiveAsset> {
        self.entries.iter().find(|e| &e.asset.id == id)
    }

    pub fn entries(&self) -> &[LiveAsset] {
        &self.entries
    }

    /// Ids of every asset on the board, in board order.
    pub fn ids(&self) -> Vec<AssetId> {
        self.entries.iter().map(|e| e.asset.id.clone()).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
