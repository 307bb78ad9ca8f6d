//! Native prices transport using `tokio-tungstenite`.
//!
//! One background tokio task per [`PriceFeed`]:
//! - connects to the prices channel for the feed's key (30 s timeout)
//! - forwards every text frame that parses as a [`PriceUpdate`]
//! - answers WS-level pings
//! - on unsubscribe, sends a normal close frame and exits
//!
//! No reconnection: a transport error is logged and ends the feed.

use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::TransportError;
use crate::ws::feed::{FeedConnector, PriceFeed, PriceSink};
use crate::ws::{PriceUpdate, SubscriptionKey, WsConfig};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

// ─── Why a feed task stopped ─────────────────────────────────────────────────

enum FeedEnd {
    Unsubscribed,
    ConsumerGone,
    ServerClosed { code: u16, reason: String },
    Transport(TransportError),
}

// ─── Public connector ────────────────────────────────────────────────────────

/// Opens prices feeds over `tokio-tungstenite`.
///
/// `open` must be called from within a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct NativeConnector {
    config: WsConfig,
}

impl NativeConnector {
    pub fn new(config: WsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WsConfig {
        &self.config
    }
}

impl FeedConnector for NativeConnector {
    fn open(&self, key: SubscriptionKey) -> Result<PriceFeed, TransportError> {
        let handle =
            tokio::runtime::Handle::try_current().map_err(|_| TransportError::NoRuntime)?;

        let url = key.url(&self.config);
        let (sink, feed) = PriceFeed::channel(key);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        handle.spawn(run_feed(url, sink, shutdown_rx));

        Ok(feed.on_teardown(move || {
            let _ = shutdown_tx.send(());
        }))
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_feed(url: String, sink: PriceSink, mut shutdown: oneshot::Receiver<()>) {
    let connected = tokio::select! {
        res = attempt_connect(&url) => res,
        _ = &mut shutdown => {
            tracing::debug!(url = %url, "Price feed unsubscribed before connecting");
            return;
        }
    };

    let (mut write, mut read) = match connected {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!(url = %url, "Price feed connection failed: {}", e);
            return;
        }
    };
    tracing::debug!(url = %url, "Price feed connected");

    match run_connected(&sink, &mut write, &mut read, &mut shutdown).await {
        FeedEnd::Unsubscribed => {
            let _ = write.send(client_close()).await;
            tracing::debug!(url = %url, "Price feed closed by client");
        }
        FeedEnd::ConsumerGone => {
            // Feed closed while a frame was in flight, before the shutdown signal.
            let _ = write.send(client_close()).await;
            tracing::debug!(url = %url, "Price feed consumer dropped");
        }
        FeedEnd::ServerClosed { code, reason } => {
            tracing::info!(url = %url, code, "Price feed closed by server: {}", reason);
        }
        FeedEnd::Transport(e) => {
            tracing::error!(url = %url, "Price feed error: {}", e);
        }
    }
}

/// The connected loop. Runs until unsubscribe or the connection breaks.
async fn run_connected(
    sink: &PriceSink,
    write: &mut SplitSink<WsStream, Message>,
    read: &mut SplitStream<WsStream>,
    shutdown: &mut oneshot::Receiver<()>,
) -> FeedEnd {
    loop {
        tokio::select! {
            // Unsubscribe wins over any frame that is ready at the same time.
            biased;

            _ = &mut *shutdown => return FeedEnd::Unsubscribed,

            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let text_str: &str = text.as_str();
                        match serde_json::from_str::<PriceUpdate>(text_str) {
                            Ok(update) => {
                                if !sink.send(update) {
                                    return FeedEnd::ConsumerGone;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "Skipping malformed price frame: {} (raw: {})",
                                    e,
                                    text_str
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = write.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = extract_close(frame.as_ref());
                        return if code == 1000 {
                            FeedEnd::ServerClosed { code, reason }
                        } else {
                            FeedEnd::Transport(TransportError::Closed {
                                code: Some(code),
                                reason,
                            })
                        };
                    }
                    Some(Ok(_)) => {} // Binary, Pong, Frame: ignore
                    Some(Err(e)) => {
                        return FeedEnd::Transport(TransportError::Protocol(e.to_string()));
                    }
                    None => {
                        return FeedEnd::Transport(TransportError::Closed {
                            code: None,
                            reason: "Stream ended".into(),
                        });
                    }
                }
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Attempt to establish a WebSocket connection with a timeout.
async fn attempt_connect(
    url: &str,
) -> Result<(SplitSink<WsStream, Message>, SplitStream<WsStream>), TransportError> {
    let (ws_stream, _) = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(url))
        .await
        .map_err(|_| TransportError::ConnectionFailed("Connection timeout".into()))?
        .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

    Ok(ws_stream.split())
}

/// Normal close frame sent whenever the client ends the feed.
fn client_close() -> Message {
    Message::Close(Some(CloseFrame {
        code: CloseCode::Normal,
        reason: "Client unsubscribed".into(),
    }))
}

/// Extract close code and reason from an optional CloseFrame.
fn extract_close(frame: Option<&CloseFrame>) -> (u16, String) {
    match frame {
        Some(f) => (f.code.into(), f.reason.to_string()),
        None => (1006, "No close frame".into()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
