//! Price history state for the selected interval.

use super::HistoryPoint;
use crate::shared::{AssetId, Interval};

/// History for one asset at the selected interval.
///
/// Selecting a different interval drops the sequence entirely; it is only
/// repopulated by a fetch for that interval.
#[derive(Debug, Clone)]
pub struct HistoryState {
    asset_id: AssetId,
    interval: Interval,
    points: Option<Vec<HistoryPoint>>,
}

impl HistoryState {
    pub fn new(asset_id: AssetId, interval: Interval) -> Self {
        Self {
            asset_id,
            interval,
            points: None,
        }
    }

    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Switch interval. Returns `false` (and keeps the data) when unchanged.
    pub fn select(&mut self, interval: Interval) -> bool {
        if interval == self.interval {
            return false;
        }
        self.interval = interval;
        self.points = None;
        true
    }

    /// Store a fetched sequence. Sequences for another interval are dropped.
    pub fn apply(&mut self, interval: Interval, points: Vec<HistoryPoint>) -> bool {
        if interval != self.interval {
            tracing::debug!(
                asset = %self.asset_id,
                expected = %self.interval,
                got = %interval,
                "Discarding history for stale interval"
            );
            return false;
        }
        self.points = Some(points);
        true
    }

    pub fn points(&self) -> Option<&[HistoryPoint]> {
        self.points.as_deref()
    }

    pub fn clear(&mut self) {
        self.points = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: i64, price: &str) -> HistoryPoint {
        HistoryPoint {
            price_usd: price.to_string(),
            time,
        }
    }

    #[test]
    fn test_apply_and_read() {
        let mut state = HistoryState::new(AssetId::from("bitcoin"), Interval::Day1);
        assert!(state.points().is_none());
        assert!(state.apply(Interval::Day1, vec![point(1, "10"), point(2, "11")]));
        assert_eq!(state.points().unwrap().len(), 2);
    }

    #[test]
    fn test_select_discards_previous_sequence() {
        let mut state = HistoryState::new(AssetId::from("bitcoin"), Interval::Day1);
        state.apply(Interval::Day1, vec![point(1, "10")]);
        assert!(state.select(Interval::Hour1));
        assert!(state.points().is_none());
        assert_eq!(state.interval(), Interval::Hour1);
    }

    #[test]
    fn test_select_same_interval_keeps_data() {
        let mut state = HistoryState::new(AssetId::from("bitcoin"), Interval::Day1);
        state.apply(Interval::Day1, vec![point(1, "10")]);
        assert!(!state.select(Interval::Day1));
        assert_eq!(state.points().unwrap().len(), 1);
    }

    #[test]
    fn test_apply_stale_interval_is_dropped() {
        let mut state = HistoryState::new(AssetId::from("bitcoin"), Interval::Minute5);
        assert!(!state.apply(Interval::Day1, vec![point(1, "10")]));
        assert!(state.points().is_none());
    }
}
