//! The asset detail page: info panel, live price and a history chart.

use std::time::{Duration, Instant};

use crate::client::AssetSource;
use crate::domain::asset::{Asset, PriceDirection, Trend};
use crate::domain::history::HistoryState;
use crate::shared::fmt::{format_big_number, format_percent, format_price, format_supply, format_volume};
use crate::shared::{AssetId, Interval};
use crate::theme::Theme;
use crate::view::chart::ChartSeries;
use crate::view::lifetime::{Cancelled, ViewLifetime};
use crate::ws::PriceUpdate;

/// How long a price move stays highlighted.
pub const FLASH_DURATION: Duration = Duration::from_secs(1);

/// A highlighted price move, live until `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFlash {
    pub direction: PriceDirection,
    pub until: Instant,
}

impl PriceFlash {
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.until
    }
}

/// One label/value line of the info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
    /// Set on the price row while a move is highlighted.
    pub flash: Option<PriceDirection>,
    /// Set on the 24h change row.
    pub trend: Option<Trend>,
}

impl InfoRow {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            flash: None,
            trend: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalButton {
    pub interval: Interval,
    /// Upper-cased wire token, e.g. `"H12"`.
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    /// `"{name} ({symbol})"`.
    pub title: String,
    pub info: Vec<InfoRow>,
    pub intervals: Vec<IntervalButton>,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailRender {
    Loading,
    Error(String),
    Ready(DetailPage),
}

/// View state of one asset's detail page.
#[derive(Debug)]
pub struct DetailView {
    id: AssetId,
    asset: Option<Asset>,
    live_price: Option<String>,
    flash: Option<PriceFlash>,
    history: HistoryState,
    asset_error: Option<String>,
    history_error: Option<String>,
    theme: Theme,
    lifetime: ViewLifetime,
}

impl DetailView {
    pub fn new(id: impl Into<AssetId>) -> Self {
        let id = id.into();
        Self {
            history: HistoryState::new(id.clone(), Interval::default()),
            id,
            asset: None,
            live_price: None,
            flash: None,
            asset_error: None,
            history_error: None,
            theme: Theme::default(),
            lifetime: ViewLifetime::new(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    pub fn interval(&self) -> Interval {
        self.history.interval()
    }

    pub fn asset(&self) -> Option<&Asset> {
        self.asset.as_ref()
    }

    pub fn live_price(&self) -> Option<&str> {
        self.live_price.as_deref()
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    /// The page error. An asset failure is shown before a history failure.
    pub fn error(&self) -> Option<&str> {
        self.asset_error
            .as_deref()
            .or(self.history_error.as_deref())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Fetch the asset and its history for the current interval.
    ///
    /// Errors from earlier fetches are replaced by this load's outcome;
    /// either failure becomes the page error. Returns `Err(Cancelled)`,
    /// leaving the view untouched, when the view closed first.
    pub async fn load<S: AssetSource + ?Sized>(&mut self, source: &S) -> Result<(), Cancelled> {
        if self.lifetime.is_cancelled() {
            return Err(Cancelled);
        }
        let interval = self.history.interval();
        let id = self.id.clone();

        let (asset, history) = self
            .lifetime
            .run(futures_util::future::join(
                source.asset(&id),
                source.history(&id, interval),
            ))
            .await?;

        self.asset_error = None;
        self.history_error = None;
        match asset {
            Ok(asset) => {
                self.live_price = Some(asset.price_usd.clone());
                self.asset = Some(asset);
            }
            Err(e) => self.asset_error = Some(self.failure(e.to_string())),
        }
        match history {
            Ok(points) => {
                self.history.apply(interval, points);
            }
            Err(e) => {
                self.history.clear();
                self.history_error = Some(self.failure(e.to_string()));
            }
        }
        Ok(())
    }

    /// Switch the chart interval.
    ///
    /// Selecting the current interval does nothing and returns `Ok(false)`.
    /// Otherwise the old sequence is dropped and exactly one history
    /// request is made for the new interval. A history error from an
    /// earlier fetch is dropped with the old sequence.
    pub async fn select_interval<S: AssetSource + ?Sized>(
        &mut self,
        source: &S,
        interval: Interval,
    ) -> Result<bool, Cancelled> {
        if self.lifetime.is_cancelled() {
            return Err(Cancelled);
        }
        if !self.history.select(interval) {
            return Ok(false);
        }
        tracing::debug!(asset = %self.id, interval = %interval, "Interval selected");
        self.history_error = None;

        let id = self.id.clone();
        match self.lifetime.run(source.history(&id, interval)).await? {
            Ok(points) => {
                self.history.apply(interval, points);
            }
            Err(e) => self.history_error = Some(self.failure(e.to_string())),
        }
        Ok(true)
    }

    /// Merge a live batch, highlighting the price for [`FLASH_DURATION`]
    /// when it moved. Returns whether the batch carried this asset.
    pub fn apply_prices(&mut self, update: &PriceUpdate) -> bool {
        self.apply_prices_at(update, Instant::now())
    }

    pub fn apply_prices_at(&mut self, update: &PriceUpdate, now: Instant) -> bool {
        let Some(price) = update.get(&self.id) else {
            return false;
        };
        let Some(previous) = self.live_price.as_deref() else {
            // Nothing to compare against before the asset has loaded.
            return false;
        };

        let direction = PriceDirection::between(previous, price);
        if direction != PriceDirection::Unchanged {
            self.flash = Some(PriceFlash {
                direction,
                until: now + FLASH_DURATION,
            });
        }
        self.live_price = Some(price.to_string());
        true
    }

    /// The highlighted move at `now`, if any.
    pub fn flash(&self, now: Instant) -> Option<PriceDirection> {
        self.flash
            .filter(|f| f.is_active(now))
            .map(|f| f.direction)
    }

    pub fn render(&self, now: Instant) -> DetailRender {
        if let Some(message) = self.error() {
            return DetailRender::Error(super::error_text(message));
        }
        let (Some(asset), Some(points)) = (self.asset.as_ref(), self.history.points()) else {
            return DetailRender::Loading;
        };

        let price = self.live_price.as_deref().unwrap_or(&asset.price_usd);
        let info = vec![
            InfoRow {
                flash: self.flash(now),
                ..InfoRow::plain("Price", format_price(price))
            },
            InfoRow {
                trend: Some(asset.trend()),
                ..InfoRow::plain("Change Percent (24Hr)", format_percent(&asset.change_percent_24h))
            },
            InfoRow::plain("Market Cap", format_big_number(&asset.market_cap_usd)),
            InfoRow::plain("Volume", format_volume(&asset.volume_usd_24h)),
            InfoRow::plain("Supply", format_supply(asset.supply.as_deref())),
            InfoRow::plain("Max Supply", format_supply(asset.max_supply.as_deref())),
        ];

        let selected = self.history.interval();
        let intervals = Interval::ALL
            .iter()
            .map(|&interval| IntervalButton {
                interval,
                label: button_label(interval),
                selected: interval == selected,
            })
            .collect();

        DetailRender::Ready(DetailPage {
            title: format!("{} ({})", asset.name, asset.symbol),
            info,
            intervals,
            chart: ChartSeries::new(points, selected, self.theme),
        })
    }

    pub fn lifetime(&self) -> &ViewLifetime {
        &self.lifetime
    }

    /// Cancel in-flight fetches. Later loads return `Err(Cancelled)`.
    pub fn close(&self) {
        self.lifetime.cancel();
    }

    fn failure(&self, message: String) -> String {
        tracing::warn!(asset = %self.id, "Detail fetch failed: {}", message);
        message
    }
}

impl Drop for DetailView {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

fn button_label(interval: Interval) -> &'static str {
    match interval {
        Interval::Minute1 => "M1",
        Interval::Minute5 => "M5",
        Interval::Minute15 => "M15",
        Interval::Minute30 => "M30",
        Interval::Hour1 => "H1",
        Interval::Hour2 => "H2",
        Interval::Hour6 => "H6",
        Interval::Hour12 => "H12",
        Interval::Day1 => "D1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::AssetsResult;
    use crate::domain::history::HistoryPoint;
    use crate::error::{FetchError, RatesError};
    use async_trait::async_trait;

    struct Bitcoin;

    #[async_trait]
    impl AssetSource for Bitcoin {
        async fn assets(&self) -> Result<AssetsResult, RatesError> {
            unimplemented!()
        }

        async fn asset(&self, id: &AssetId) -> Result<Asset, RatesError> {
            if id.as_str() != "bitcoin" {
                return Err(FetchError::NotFound(format!("{} not found", id)).into());
            }
            Ok(Asset {
                id: id.clone(),
                rank: 1,
                symbol: "BTC".into(),
                name: "Bitcoin".into(),
                price_usd: "1234.5".into(),
                change_percent_24h: "2.5".into(),
                market_cap_usd: "2500000000".into(),
                volume_usd_24h: "987654.321".into(),
                supply: Some("19700000.4".into()),
                max_supply: None,
                vwap_24h: None,
                explorer: None,
            })
        }

        async fn history(&self, _id: &AssetId, _interval: Interval) -> Result<Vec<HistoryPoint>, RatesError> {
            Ok(vec![HistoryPoint {
                price_usd: "1200".into(),
                time: 1530403200000,
            }])
        }
    }

    #[tokio::test]
    async fn test_ready_page() {
        let mut view = DetailView::new("bitcoin").with_theme(Theme::Dark);
        assert_eq!(view.render(Instant::now()), DetailRender::Loading);

        view.load(&Bitcoin).await.unwrap();
        let DetailRender::Ready(page) = view.render(Instant::now()) else {
            panic!("expected page");
        };

        assert_eq!(page.title, "Bitcoin (BTC)");
        let values: Vec<(&str, &str)> = page
            .info
            .iter()
            .map(|r| (r.label, r.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Price", "$1,234.50"),
                ("Change Percent (24Hr)", "2.50%"),
                ("Market Cap", "$2.50B"),
                ("Volume", "$987,654.32"),
                ("Supply", "19,700,000"),
                ("Max Supply", "-"),
            ]
        );
        assert_eq!(page.info[1].trend, Some(Trend::Positive));
        assert_eq!(page.intervals.len(), 9);
        assert!(page.intervals[8].selected);
        assert_eq!(page.intervals[8].label, "D1");
        assert_eq!(page.chart.labels, vec!["7/1/2018"]);
        assert_eq!(page.chart.palette.text, "#ffffff");
    }

    #[tokio::test]
    async fn test_not_found_renders_error_without_chart() {
        let mut view = DetailView::new("bitcoinx");
        view.load(&Bitcoin).await.unwrap();
        assert_eq!(
            view.render(Instant::now()),
            DetailRender::Error("Error: Not found: bitcoinx not found".into())
        );
    }

    #[tokio::test]
    async fn test_price_flash_lasts_one_second() {
        let mut view = DetailView::new("bitcoin");
        view.load(&Bitcoin).await.unwrap();

        let t0 = Instant::now();
        assert!(view.apply_prices_at(&PriceUpdate::from_pairs([("bitcoin", "1300")]), t0));
        assert_eq!(view.flash(t0), Some(PriceDirection::Up));
        assert_eq!(view.flash(t0 + Duration::from_millis(999)), Some(PriceDirection::Up));
        assert_eq!(view.flash(t0 + FLASH_DURATION), None);

        let DetailRender::Ready(page) = view.render(t0) else {
            panic!("expected page");
        };
        assert_eq!(page.info[0].value, "$1,300.00");
        assert_eq!(page.info[0].flash, Some(PriceDirection::Up));

        let t1 = t0 + Duration::from_secs(5);
        view.apply_prices_at(&PriceUpdate::from_pairs([("bitcoin", "1250")]), t1);
        assert_eq!(view.flash(t1), Some(PriceDirection::Down));
    }

    #[tokio::test]
    async fn test_unchanged_price_does_not_flash() {
        let mut view = DetailView::new("bitcoin");
        view.load(&Bitcoin).await.unwrap();

        let now = Instant::now();
        assert!(view.apply_prices_at(&PriceUpdate::from_pairs([("bitcoin", "1234.50")]), now));
        assert_eq!(view.flash(now), None);
    }

    #[test]
    fn test_price_before_load_is_ignored() {
        let mut view = DetailView::new("bitcoin");
        assert!(!view.apply_prices(&PriceUpdate::from_pairs([("bitcoin", "1")])));
        assert_eq!(view.live_price(), None);
    }

    #[test]
    fn test_other_assets_ignored() {
        let mut view = DetailView::new("bitcoin");
        assert!(!view.apply_prices(&PriceUpdate::from_pairs([("ethereum", "1")])));
    }
}
