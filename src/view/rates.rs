//! The rates list page: every asset with live prices and a search filter.

use crate::client::AssetSource;
use crate::domain::asset::{AssetBoard, LiveAsset, PriceDirection, Trend};
use crate::shared::fmt::{format_big_number, format_percent, format_price};
use crate::shared::AssetId;
use crate::view::lifetime::{Cancelled, ViewLifetime};
use crate::ws::PriceUpdate;

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Loading,
    Failed(String),
    Ready,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRow {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    /// `/icons/{symbol}.svg`, lowercased.
    pub icon: String,
    /// Link to the detail page.
    pub href: String,
    pub price: String,
    pub change: String,
    pub trend: Trend,
    pub volume: String,
    pub market_cap: String,
    pub flash: PriceDirection,
}

impl From<&LiveAsset> for AssetRow {
    fn from(live: &LiveAsset) -> Self {
        let asset = &live.asset;
        Self {
            id: asset.id.clone(),
            symbol: asset.symbol.clone(),
            name: asset.name.clone(),
            icon: format!("/icons/{}.svg", asset.symbol.to_lowercase()),
            href: format!("/rates/{}", asset.id),
            price: format_price(&live.price_usd),
            change: format_percent(&asset.change_percent_24h),
            trend: asset.trend(),
            volume: format_big_number(&asset.volume_usd_24h),
            market_cap: format_big_number(&asset.market_cap_usd),
            flash: live.direction,
        }
    }
}

/// The filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct RatesTable {
    pub rows: Vec<AssetRow>,
    /// The search matched nothing.
    pub no_results: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RatesRender {
    Loading,
    Error(String),
    Ready(RatesTable),
}

/// View state of the rates list.
#[derive(Debug)]
pub struct RatesView {
    board: AssetBoard,
    status: Status,
    search: String,
    validation_errors: Vec<String>,
    lifetime: ViewLifetime,
}

impl Default for RatesView {
    fn default() -> Self {
        Self::new()
    }
}

impl RatesView {
    pub fn new() -> Self {
        Self {
            board: AssetBoard::new(),
            status: Status::Loading,
            search: String::new(),
            validation_errors: Vec::new(),
            lifetime: ViewLifetime::new(),
        }
    }

    /// Fetch the asset list.
    ///
    /// A failed fetch is kept as the page error. Returns `Err(Cancelled)`,
    /// leaving the view untouched, when the view closed first.
    pub async fn load<S: AssetSource + ?Sized>(&mut self, source: &S) -> Result<(), Cancelled> {
        if self.lifetime.is_cancelled() {
            return Err(Cancelled);
        }

        match self.lifetime.run(source.assets()).await? {
            Ok(result) => {
                tracing::debug!(count = result.assets.len(), "Rates loaded");
                self.board.replace(result.assets);
                self.validation_errors = result.validation_errors;
                self.status = Status::Ready;
            }
            Err(e) => {
                tracing::warn!("Failed to load rates: {}", e);
                self.status = Status::Failed(e.to_string());
            }
        }
        Ok(())
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Merge a live batch. Returns the number of rows that changed.
    pub fn apply_prices(&mut self, update: &PriceUpdate) -> usize {
        self.board.apply_prices(update)
    }

    /// Ids the price feed should cover.
    pub fn subscription_assets(&self) -> Vec<AssetId> {
        self.board.ids()
    }

    pub fn board(&self) -> &AssetBoard {
        &self.board
    }

    /// Entries of the last list fetch that failed validation.
    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    pub fn render(&self) -> RatesRender {
        match &self.status {
            Status::Failed(message) => RatesRender::Error(super::error_text(message)),
            Status::Loading => RatesRender::Loading,
            Status::Ready => {
                let rows: Vec<AssetRow> = self
                    .board
                    .entries()
                    .iter()
                    .filter(|live| live.asset.matches(&self.search))
                    .map(AssetRow::from)
                    .collect();
                RatesRender::Ready(RatesTable {
                    no_results: rows.is_empty(),
                    rows,
                })
            }
        }
    }

    pub fn lifetime(&self) -> &ViewLifetime {
        &self.lifetime
    }

    /// Cancel in-flight fetches. Later loads return `Err(Cancelled)`.
    pub fn close(&self) {
        self.lifetime.cancel();
    }
}

impl Drop for RatesView {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::{Asset, AssetsResult};
    use crate::domain::history::HistoryPoint;
    use crate::error::{FetchError, RatesError};
    use crate::shared::Interval;
    use async_trait::async_trait;

    fn asset(id: &str, symbol: &str, name: &str, price: &str) -> Asset {
        Asset {
            id: AssetId::from(id),
            rank: 1,
            symbol: symbol.into(),
            name: name.into(),
            price_usd: price.into(),
            change_percent_24h: "-1.234".into(),
            market_cap_usd: "1300000000000".into(),
            volume_usd_24h: "25000000000".into(),
            supply: None,
            max_supply: None,
            vwap_24h: None,
            explorer: None,
        }
    }

    struct Fixed(Result<Vec<Asset>, u16>);

    #[async_trait]
    impl AssetSource for Fixed {
        async fn assets(&self) -> Result<AssetsResult, RatesError> {
            match &self.0 {
                Ok(assets) => Ok(AssetsResult {
                    assets: assets.clone(),
                    validation_errors: vec![],
                }),
                Err(status) => Err(FetchError::from_status(*status, "unavailable".into()).into()),
            }
        }

        async fn asset(&self, _id: &AssetId) -> Result<Asset, RatesError> {
            unimplemented!()
        }

        async fn history(&self, _id: &AssetId, _interval: Interval) -> Result<Vec<HistoryPoint>, RatesError> {
            unimplemented!()
        }
    }

    fn market() -> Fixed {
        Fixed(Ok(vec![
            asset("bitcoin", "BTC", "Bitcoin", "67000.5"),
            asset("ethereum", "ETH", "Ethereum", "3500"),
        ]))
    }

    #[tokio::test]
    async fn test_starts_loading_then_ready() {
        let mut view = RatesView::new();
        assert_eq!(view.render(), RatesRender::Loading);

        view.load(&market()).await.unwrap();
        let RatesRender::Ready(table) = view.render() else {
            panic!("expected rows");
        };
        assert_eq!(table.rows.len(), 2);
        assert!(!table.no_results);

        let btc = &table.rows[0];
        assert_eq!(btc.price, "$67,000.50");
        assert_eq!(btc.change, "-1.23%");
        assert_eq!(btc.trend, Trend::Negative);
        assert_eq!(btc.volume, "$25.00B");
        assert_eq!(btc.market_cap, "$1300.00B");
        assert_eq!(btc.icon, "/icons/btc.svg");
        assert_eq!(btc.href, "/rates/bitcoin");
        assert_eq!(btc.flash, PriceDirection::Unchanged);
    }

    #[tokio::test]
    async fn test_load_failure_renders_error() {
        let mut view = RatesView::new();
        view.load(&Fixed(Err(503))).await.unwrap();
        assert_eq!(
            view.render(),
            RatesRender::Error("Error: Server error 503: unavailable".into())
        );
    }

    #[tokio::test]
    async fn test_search_filters_by_name_or_symbol() {
        let mut view = RatesView::new();
        view.load(&market()).await.unwrap();

        view.set_search("eth");
        let RatesRender::Ready(table) = view.render() else {
            panic!("expected rows");
        };
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].id.as_str(), "ethereum");

        view.set_search("BITC");
        let RatesRender::Ready(table) = view.render() else {
            panic!("expected rows");
        };
        assert_eq!(table.rows[0].symbol, "BTC");

        view.set_search("doge");
        let RatesRender::Ready(table) = view.render() else {
            panic!("expected rows");
        };
        assert!(table.rows.is_empty());
        assert!(table.no_results);
    }

    #[tokio::test]
    async fn test_unknown_id_leaves_rows_unchanged() {
        let mut view = RatesView::new();
        view.load(&market()).await.unwrap();

        let updated = view.apply_prices(&PriceUpdate::from_pairs([
            ("bitcoin", "68000"),
            ("dogecoin", "0.1"),
        ]));
        assert_eq!(updated, 1);

        let RatesRender::Ready(table) = view.render() else {
            panic!("expected rows");
        };
        assert_eq!(table.rows[0].price, "$68,000.00");
        assert_eq!(table.rows[0].flash, PriceDirection::Up);
        assert_eq!(table.rows[1].price, "$3,500.00");
        assert_eq!(table.rows[1].flash, PriceDirection::Unchanged);
        assert_eq!(table.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_load_after_close_is_cancelled() {
        let mut view = RatesView::new();
        view.close();
        assert_eq!(view.load(&market()).await, Err(Cancelled));
        assert_eq!(view.render(), RatesRender::Loading);
    }

    #[tokio::test]
    async fn test_subscription_assets() {
        let mut view = RatesView::new();
        assert!(view.subscription_assets().is_empty());
        view.load(&market()).await.unwrap();
        assert_eq!(
            view.subscription_assets(),
            vec![AssetId::from("bitcoin"), AssetId::from("ethereum")]
        );
    }
}
