//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`TradingDate`] | Calendar day in `YYYY-MM-DD` form |
//! | [`PriceRecord`] | One day's open/high/low/close |
//! | [`PriceSeries`] | Records for one symbol, strictly ascending by date |
//!
//! All types validate their invariants at construction time, so a
//! `PriceSeries` in hand is always ordered and duplicate-free.

mod price;
mod symbol;
mod trading_date;

pub use price::{PriceRecord, PriceSeries};
pub use symbol::Symbol;
pub use trading_date::TradingDate;
