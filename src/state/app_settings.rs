use log::LevelFilter;
use nba_api::client::DEFAULT_BASE_URL;
use std::str::FromStr;
use std::time::Duration;

pub const API_URL_VAR: &str = "NBAVIZ_API_URL";
pub const LOG_VAR: &str = "NBAVIZ_LOG";
pub const TIMEOUT_VAR: &str = "NBAVIZ_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub api_url: String,
    pub log_level: Option<LevelFilter>,
    pub request_timeout: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            api_url: DEFAULT_BASE_URL.to_string(),
            log_level: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let log_level = get(LOG_VAR).and_then(|v| match LevelFilter::from_str(&v) {
            Ok(level) => Some(level),
            Err(_) => {
                log::warn!("ignoring {LOG_VAR}={v}: not a log level");
                None
            }
        });
        let request_timeout = get(TIMEOUT_VAR)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            full_screen: false,
            api_url: get(API_URL_VAR).unwrap_or(defaults.api_url),
            log_level,
            request_timeout,
        }
    }
}
