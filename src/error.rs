//! Unified error types.

use thiserror::Error;

/// Top-level crate error.
#[derive(Error, Debug)]
pub enum RatesError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("WebSocket error: {0}")]
    Transport(#[from] TransportError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// REST errors: non-success status or a failed request.
#[derive(Error, Debug)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl FetchError {
    /// Map a non-success HTTP status and its body to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => FetchError::Unauthorized,
            404 => FetchError::NotFound(body),
            429 => FetchError::RateLimited,
            400..=499 => FetchError::BadRequest(body),
            _ => FetchError::Server { status, body },
        }
    }
}

/// Streaming connection errors. Logged, never handed to feed consumers.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Empty asset set")]
    EmptyAssetSet,

    #[error("No async runtime available")]
    NoRuntime,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection closed: code={code:?} reason={reason}")]
    Closed { code: Option<u16>, reason: String },
}

/// Persisted key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed storage file: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(FetchError::from_status(401, String::new()), FetchError::Unauthorized));
        assert!(matches!(FetchError::from_status(404, "x".into()), FetchError::NotFound(b) if b == "x"));
        assert!(matches!(FetchError::from_status(429, String::new()), FetchError::RateLimited));
        assert!(matches!(FetchError::from_status(422, String::new()), FetchError::BadRequest(_)));
        assert!(matches!(
            FetchError::from_status(503, "down".into()),
            FetchError::Server { status: 503, .. }
        ));
    }

    #[test]
    fn test_fetch_error_display_passes_through() {
        let err = RatesError::from(FetchError::NotFound("bitcoinx not found".into()));
        assert_eq!(err.to_string(), "Not found: bitcoinx not found");
    }
}
