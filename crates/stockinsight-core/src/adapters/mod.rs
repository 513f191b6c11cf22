pub mod alphavantage;

pub use alphavantage::{AlphaVantageAdapter, DailySeriesRequest};
