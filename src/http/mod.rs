//! HTTP client layer — `CoinCapHttp`, one method per endpoint.

pub mod client;

pub use client::CoinCapHttp;
