//! WASM prices transport using `web-sys::WebSocket`.
//!
//! The browser owns the connection; callbacks push parsed frames into the
//! feed's channel. Teardown detaches every handler and closes the socket,
//! so no frame reaches the consumer after unsubscribe.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

use crate::error::TransportError;
use crate::ws::feed::{FeedConnector, PriceFeed, PriceSink};
use crate::ws::{PriceUpdate, SubscriptionKey, WsConfig};

/// Opens prices feeds over the browser's WebSocket.
#[derive(Debug, Clone, Default)]
pub struct WasmConnector {
    config: WsConfig,
}

impl WasmConnector {
    pub fn new(config: WsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WsConfig {
        &self.config
    }
}

impl FeedConnector for WasmConnector {
    fn open(&self, key: SubscriptionKey) -> Result<PriceFeed, TransportError> {
        let url = key.url(&self.config);
        let ws = WebSocket::new(&url)
            .map_err(|e| TransportError::ConnectionFailed(extract_js_error(&e)))?;
        tracing::debug!(url = %url, "Price feed connecting");

        let (sink, feed) = PriceFeed::channel(key);
        let sink: Rc<RefCell<Option<PriceSink>>> = Rc::new(RefCell::new(Some(sink)));

        let onmessage = {
            let sink = Rc::clone(&sink);
            Closure::<dyn FnMut(_)>::new(move |e: MessageEvent| {
                let Some(txt) = e.data().as_string() else {
                    return;
                };
                match serde_json::from_str::<PriceUpdate>(&txt) {
                    Ok(update) => {
                        let delivered = sink
                            .borrow()
                            .as_ref()
                            .map(|s| s.send(update))
                            .unwrap_or(false);
                        if !delivered {
                            sink.borrow_mut().take();
                        }
                    }
                    Err(err) => {
                        tracing::warn!("Skipping malformed price frame: {} (raw: {})", err, txt);
                    }
                }
            })
        };
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let onerror = Closure::<dyn FnMut(_)>::new(move |e: ErrorEvent| {
            tracing::error!("Price feed error: {}", e.message());
        });
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let onclose = {
            let sink = Rc::clone(&sink);
            Closure::<dyn FnMut(_)>::new(move |e: CloseEvent| {
                tracing::info!("Price feed closed: code={}, reason={}", e.code(), e.reason());
                // Dropping the sink ends the consumer's stream.
                sink.borrow_mut().take();
            })
        };
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        Ok(feed.on_teardown(move || {
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            if let Err(e) = ws.close_with_code_and_reason(1000, "Client unsubscribed") {
                tracing::warn!("Failed to close price feed: {}", extract_js_error(&e));
            }
            sink.borrow_mut().take();
            drop((onmessage, onerror, onclose));
        }))
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn extract_js_error(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        if !s.is_empty() {
            return s;
        }
    }

    if err.is_undefined() {
        return "undefined error".to_string();
    }

    if err.is_null() {
        return "null error".to_string();
    }

    format!("{:?}", err)
}
