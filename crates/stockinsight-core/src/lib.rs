//! # Stockinsight Core
//!
//! Fetches daily price history from Alpha Vantage, normalizes it into
//! ascending OHLC records and stores it as CSV.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage `TIME_SERIES_DAILY` fetcher |
//! | [`config`] | Environment configuration and API key handling |
//! | [`csv_store`] | CSV writer and reader for price series |
//! | [`domain`] | Domain models (Symbol, TradingDate, PriceRecord, PriceSeries) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockinsight_core::{csv_store, AlphaVantageAdapter, AppConfig, DailySeriesRequest, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let adapter = AlphaVantageAdapter::from_config(&config);
//!
//!     let request = DailySeriesRequest::new(Symbol::parse("IBM")?, 90)?;
//!     let series = adapter.daily_series(&request).await?;
//!     csv_store::write_series(&series, config.last_fetched_path())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ AlphaVantage    │────▶│ HTTP Client      │
//! │ Adapter         │     │ (reqwest)        │
//! └────────┬────────┘     └──────────────────┘
//!          │ PriceSeries
//!          ▼
//! ┌─────────────────┐
//! │ csv_store       │
//! └─────────────────┘
//! ```
//!
//! ## Security
//!
//! - The API key is read from the environment and never logged
//! - Symbols are validated before they reach the provider URL

pub mod adapters;
pub mod config;
pub mod csv_store;
pub mod domain;
pub mod error;
pub mod http_client;

pub use adapters::{AlphaVantageAdapter, DailySeriesRequest};

pub use adapters::alphavantage::{normalize_daily_series, DEFAULT_WINDOW};

pub use config::{ApiKey, AppConfig};

pub use domain::{PriceRecord, PriceSeries, Symbol, TradingDate};

pub use error::{ConfigError, CoreError, CoreErrorKind, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
