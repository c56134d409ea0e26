// src/config.rs
use crate::params::MAX_WINDOW_DAYS;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not valid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the page server listens.
    pub bind_addr: SocketAddr,
    /// Root of the booking API, e.g. "https://api.example.com/v1/".
    pub api_base_url: Url,
    /// Default calendar window length, in nights from today.
    pub horizon_days: u32,
    pub api_timeout: Duration,
    pub max_workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default API base URL parses"),
            horizon_days: 30,
            api_timeout: Duration::from_secs(30),
            max_workers: 8,
        }
    }
}

impl AppConfig {
    /// Reads `STAY_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = parse_var(&lookup, "STAY_BIND_ADDR", defaults.bind_addr, |v| {
            v.parse::<SocketAddr>().map_err(|e| e.to_string())
        })?;

        let api_base_url = parse_var(&lookup, "STAY_API_BASE_URL", defaults.api_base_url, |v| {
            let url = Url::parse(v).map_err(|e| e.to_string())?;
            if url.cannot_be_a_base() {
                return Err("must be an http(s) base URL".to_string());
            }
            Ok(url)
        })?;

        let horizon_days = parse_var(&lookup, "STAY_HORIZON_DAYS", defaults.horizon_days, |v| {
            match v.parse::<u32>() {
                Ok(0) => Err("must be at least 1".to_string()),
                Ok(n) if i64::from(n) > MAX_WINDOW_DAYS => {
                    Err(format!("must be at most {MAX_WINDOW_DAYS}"))
                }
                Ok(n) => Ok(n),
                Err(e) => Err(e.to_string()),
            }
        })?;

        let api_timeout = parse_var(&lookup, "STAY_API_TIMEOUT_SECS", defaults.api_timeout, |v| {
            v.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| e.to_string())
        })?;

        let max_workers = parse_var(&lookup, "STAY_MAX_WORKERS", defaults.max_workers, |v| {
            match v.parse::<usize>() {
                Ok(0) => Err("must be at least 1".to_string()),
                Ok(n) => Ok(n),
                Err(e) => Err(e.to_string()),
            }
        })?;

        Ok(Self {
            bind_addr,
            api_base_url,
            horizon_days,
            api_timeout,
            max_workers,
        })
    }
}

fn parse_var<T, L, P>(lookup: &L, var: &'static str, default: T, parse: P) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    P: FnOnce(&str) -> Result<T, String>,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => {
            parse(raw.trim()).map_err(|reason| ConfigError::Invalid { var, reason })
        }
        _ => Ok(default),
    }
}
