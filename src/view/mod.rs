//! View models for the rates list and the asset detail page.
//!
//! Views own their state, fetch through an [`AssetSource`](crate::client::AssetSource)
//! and merge live [`PriceUpdate`](crate::ws::PriceUpdate) batches. Rendering
//! produces plain data; drawing it is up to the caller.

pub mod chart;
pub mod detail;
pub mod lifetime;
pub mod rates;

pub use chart::ChartSeries;
pub use detail::{DetailPage, DetailRender, DetailView, InfoRow, IntervalButton, PriceFlash};
pub use lifetime::{Cancelled, ViewLifetime};
pub use rates::{AssetRow, RatesRender, RatesTable, RatesView};

/// Text shown in place of a page when a fetch failed.
pub(crate) fn error_text(message: &str) -> String {
    format!("Error: {}", message)
}
