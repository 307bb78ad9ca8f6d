//! Runtime configuration, from defaults or the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::RatesError;
use crate::network::{DEFAULT_API_URL, DEFAULT_WS_URL};

pub const ENV_API_URL: &str = "COINCAP_API_URL";
pub const ENV_WS_URL: &str = "COINCAP_WS_URL";
pub const ENV_API_KEY: &str = "COINCAP_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "COINCAP_TIMEOUT_SECS";
pub const ENV_THEME_FILE: &str = "COINCAP_THEME_FILE";

/// Default REST request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct RatesConfig {
    pub api_url: String,
    pub ws_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Where [`FileStorage`](crate::theme::FileStorage) keeps the theme.
    pub theme_file: Option<PathBuf>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            theme_file: None,
        }
    }
}

impl RatesConfig {
    /// Read `COINCAP_*` variables, loading `.env` first if present.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, RatesError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RatesError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.api_url = url;
        }
        if let Some(url) = get(ENV_WS_URL) {
            config.ws_url = url;
        }
        config.api_key = get(ENV_API_KEY);
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                RatesError::Config(format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        config.theme_file = get(ENV_THEME_FILE).map(PathBuf::from);

        Ok(config)
    }
}
