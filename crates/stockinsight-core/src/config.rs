//! Process configuration read from the environment.
//!
//! The provider API key is the only required value. Everything else has a
//! default suited to running the service locally.

use std::fmt::{Debug, Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::adapters::alphavantage::{ALPHAVANTAGE_BASE_URL, DEFAULT_WINDOW};
use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "ALPHA_VANTAGE_API_KEY";
pub const BASE_URL_VAR: &str = "ALPHA_VANTAGE_BASE_URL";
pub const BIND_ADDR_VAR: &str = "STOCKINSIGHT_BIND_ADDR";
pub const CONSTANTS_DIR_VAR: &str = "STOCKINSIGHT_CONSTANTS_DIR";
pub const PUBLIC_URL_VAR: &str = "STOCKINSIGHT_PUBLIC_URL";
pub const WINDOW_VAR: &str = "STOCKINSIGHT_WINDOW_DAYS";
pub const UPSTREAM_TIMEOUT_VAR: &str = "STOCKINSIGHT_UPSTREAM_TIMEOUT_MS";

/// Dataset served when a caller does not ask for a symbol.
pub const DEFAULT_DATASET_FILE: &str = "sp500.csv";
/// Dataset overwritten by every successful fetch.
pub const LAST_FETCHED_FILE: &str = "user_stock_data.csv";

const DEFAULT_CONSTANTS_DIR: &str = "constants";
const DEFAULT_PUBLIC_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 30_000;

/// Provider API key. Never printed by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Missing { name: API_KEY_VAR });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: ApiKey,
    pub provider_base_url: String,
    pub bind_addr: SocketAddr,
    pub constants_dir: PathBuf,
    /// Externally reachable origin used to build `csvPath` links.
    pub public_url: String,
    pub window: usize,
    pub upstream_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any name → value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .ok_or(ConfigError::Missing { name: API_KEY_VAR })
            .and_then(ApiKey::new)?;

        let window = parse_or(&lookup, WINDOW_VAR, DEFAULT_WINDOW)?;
        if window == 0 {
            return Err(ConfigError::Invalid {
                name: WINDOW_VAR,
                value: String::from("0"),
                reason: String::from("window must be greater than zero"),
            });
        }

        Ok(Self {
            api_key,
            provider_base_url: non_blank(&lookup, BASE_URL_VAR)
                .unwrap_or_else(|| ALPHAVANTAGE_BASE_URL.to_owned()),
            bind_addr: parse_or(&lookup, BIND_ADDR_VAR, default_bind_addr())?,
            constants_dir: non_blank(&lookup, CONSTANTS_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONSTANTS_DIR)),
            public_url: non_blank(&lookup, PUBLIC_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_owned()),
            window,
            upstream_timeout_ms: parse_or(
                &lookup,
                UPSTREAM_TIMEOUT_VAR,
                DEFAULT_UPSTREAM_TIMEOUT_MS,
            )?,
        })
    }

    pub fn default_dataset_path(&self) -> PathBuf {
        self.constants_dir.join(DEFAULT_DATASET_FILE)
    }

    pub fn last_fetched_path(&self) -> PathBuf {
        self.constants_dir.join(LAST_FETCHED_FILE)
    }

    /// Public URL under which `file_name` in the constants directory is served.
    pub fn public_csv_url(&self, file_name: &str) -> String {
        format!("{}/constants/{file_name}", self.public_url)
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn non_blank<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match non_blank(lookup, name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|error| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: error.to_string(),
        }),
    }
}
