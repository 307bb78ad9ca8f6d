//! Channel-backed price feed and the subscription manager on top of it.
//!
//! A [`PriceFeed`] is a lazy, unbounded, non-restartable stream of
//! [`PriceUpdate`] batches for one [`SubscriptionKey`]. Transports push into
//! the paired [`PriceSink`]; the consumer pulls from the feed and releases
//! the connection with [`PriceFeed::unsubscribe`] (or by dropping it).

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::Stream;
use tokio::sync::mpsc;

use super::{PriceUpdate, SubscriptionKey};
use crate::error::TransportError;
use crate::shared::AssetId;

#[cfg(not(target_arch = "wasm32"))]
type Teardown = Box<dyn FnOnce() + Send>;
#[cfg(target_arch = "wasm32")]
type Teardown = Box<dyn FnOnce()>;

// ─── PriceSink ───────────────────────────────────────────────────────────────

/// Producer half of a feed, held by the transport.
#[derive(Debug, Clone)]
pub struct PriceSink {
    tx: mpsc::UnboundedSender<PriceUpdate>,
}

impl PriceSink {
    /// Forward a batch. Returns `false` once the consumer has gone away.
    pub fn send(&self, update: PriceUpdate) -> bool {
        self.tx.send(update).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ─── PriceFeed ───────────────────────────────────────────────────────────────

/// Consumer half of a feed. Ends when the transport stops.
pub struct PriceFeed {
    key: SubscriptionKey,
    rx: mpsc::UnboundedReceiver<PriceUpdate>,
    teardown: Option<Teardown>,
}

impl PriceFeed {
    /// Create a connected sink/feed pair for `key`.
    pub fn channel(key: SubscriptionKey) -> (PriceSink, PriceFeed) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            PriceSink { tx },
            PriceFeed {
                key,
                rx,
                teardown: None,
            },
        )
    }

    /// Run `f` when the feed is unsubscribed or dropped.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn on_teardown(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.teardown = Some(Box::new(f));
        self
    }

    /// Run `f` when the feed is unsubscribed or dropped.
    #[cfg(target_arch = "wasm32")]
    pub fn on_teardown(mut self, f: impl FnOnce() + 'static) -> Self {
        self.teardown = Some(Box::new(f));
        self
    }

    pub fn key(&self) -> &SubscriptionKey {
        &self.key
    }

    /// Wait for the next batch. `None` once the transport has stopped.
    pub async fn next_update(&mut self) -> Option<PriceUpdate> {
        self.rx.recv().await
    }

    /// Close the feed and release the underlying connection.
    ///
    /// Batches still buffered are discarded.
    pub fn unsubscribe(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
        if let Some(teardown) = self.teardown.take() {
            tracing::debug!(key = %self.key, "Tearing down price feed");
            teardown();
        }
    }
}

impl Stream for PriceFeed {
    type Item = PriceUpdate;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl Drop for PriceFeed {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for PriceFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceFeed").field("key", &self.key).finish()
    }
}

// ─── FeedConnector ───────────────────────────────────────────────────────────

/// Opens one streaming connection per call.
pub trait FeedConnector {
    fn open(&self, key: SubscriptionKey) -> Result<PriceFeed, TransportError>;
}

impl<C: FeedConnector + ?Sized> FeedConnector for &C {
    fn open(&self, key: SubscriptionKey) -> Result<PriceFeed, TransportError> {
        (**self).open(key)
    }
}

// ─── LivePrices ──────────────────────────────────────────────────────────────

/// Keeps at most one feed open for the asset set a view currently shows.
///
/// Re-setting an equal set (in any order) keeps the existing connection.
/// A changed set tears the old feed down and opens exactly one new feed.
/// Transport failures end the feed; they are logged, not returned, and no
/// reconnect happens until the set changes or [`LivePrices::restart`] runs.
pub struct LivePrices<C: FeedConnector> {
    connector: C,
    key: Option<SubscriptionKey>,
    feed: Option<PriceFeed>,
}

impl<C: FeedConnector> LivePrices<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            key: None,
            feed: None,
        }
    }

    /// Point the subscription at `ids`. Returns `true` if a new feed was opened.
    ///
    /// An empty set stops the current feed.
    pub fn set_assets<I, T>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Into<AssetId>,
    {
        let key = match SubscriptionKey::new(ids) {
            Ok(key) => key,
            Err(_) => {
                self.stop();
                return false;
            }
        };

        if self.key.as_ref() == Some(&key) {
            return false;
        }

        self.stop();
        self.open(key);
        true
    }

    /// Reopen the current key, e.g. after the feed ended on an error.
    pub fn restart(&mut self) -> bool {
        match self.key.take() {
            Some(key) => {
                if let Some(feed) = self.feed.take() {
                    feed.unsubscribe();
                }
                self.open(key);
                true
            }
            None => false,
        }
    }

    /// Wait for the next batch.
    ///
    /// Returns `None` immediately when no feed is active, and once the active
    /// feed ends (after which [`LivePrices::is_active`] is `false`).
    pub async fn next(&mut self) -> Option<PriceUpdate> {
        let feed = self.feed.as_mut()?;
        let update = feed.next_update().await;
        if update.is_none() {
            tracing::info!(key = %feed.key(), "Price feed ended");
            self.feed = None;
        }
        update
    }

    /// Tear down the current feed, if any.
    pub fn stop(&mut self) {
        self.key = None;
        if let Some(feed) = self.feed.take() {
            feed.unsubscribe();
        }
    }

    pub fn key(&self) -> Option<&SubscriptionKey> {
        self.key.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.feed.is_some()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    fn open(&mut self, key: SubscriptionKey) {
        match self.connector.open(key.clone()) {
            Ok(feed) => {
                tracing::info!(key = %key, "Price feed opened");
                self.feed = Some(feed);
            }
            Err(e) => {
                tracing::error!(key = %key, "Failed to open price feed: {}", e);
            }
        }
        self.key = Some(key);
    }
}

impl<C: FeedConnector> Drop for LivePrices<C> {
    fn drop(&mut self) {
        self.stop();
    }
}
