//! Line chart series for an asset's price history.

use chrono::{DateTime, Utc};

use crate::domain::history::HistoryPoint;
use crate::shared::Interval;
use crate::theme::{Palette, Theme};

pub const SERIES_LABEL: &str = "Price (USD)";
const TENSION: f64 = 0.4;

/// Everything a line chart needs to draw one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub label: &'static str,
    pub palette: Palette,
    pub fill: bool,
    pub tension: f64,
}

impl ChartSeries {
    /// Intraday intervals label points by time of day, `d1` by date. UTC.
    pub fn new(history: &[HistoryPoint], interval: Interval, theme: Theme) -> Self {
        Self {
            labels: history
                .iter()
                .map(|p| p.datetime().map(|t| point_label(&t, interval)).unwrap_or_default())
                .collect(),
            values: history.iter().map(HistoryPoint::value).collect(),
            label: SERIES_LABEL,
            palette: Palette::for_theme(theme),
            fill: true,
            tension: TENSION,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn point_label(time: &DateTime<Utc>, interval: Interval) -> String {
    if interval.is_intraday() {
        time.format("%-I:%M:%S %p").to_string()
    } else {
        time.format("%-m/%-d/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<HistoryPoint> {
        vec![
            HistoryPoint {
                price_usd: "6379.40".into(),
                time: 1530403200000, // 2018-07-01T00:00:00Z
            },
            HistoryPoint {
                price_usd: "6500.5".into(),
                time: 1530457445000, // 2018-07-01T15:04:05Z
            },
        ]
    }

    #[test]
    fn test_daily_labels_are_dates() {
        let series = ChartSeries::new(&points(), Interval::Day1, Theme::Light);
        assert_eq!(series.labels, vec!["7/1/2018", "7/1/2018"]);
        assert_eq!(series.values, vec![6379.4, 6500.5]);
        assert_eq!(series.label, "Price (USD)");
        assert_eq!(series.palette.text, "#000000");
    }

    #[test]
    fn test_intraday_labels_are_times() {
        let series = ChartSeries::new(&points(), Interval::Minute5, Theme::Dark);
        assert_eq!(series.labels, vec!["12:00:00 AM", "3:04:05 PM"]);
        assert_eq!(series.palette.text, "#ffffff");
    }

    #[test]
    fn test_empty_history() {
        let series = ChartSeries::new(&[], Interval::Hour1, Theme::Light);
        assert!(series.is_empty());
        assert!(series.labels.is_empty());
    }
}
