use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// One trading day's OHLC summary.
///
/// Prices keep the provider's decimal text so that nothing is lost or
/// reformatted on the way to the CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PriceRow")]
pub struct PriceRecord {
    #[serde(rename = "Date")]
    pub date: TradingDate,
    #[serde(rename = "Open")]
    pub open: String,
    #[serde(rename = "High")]
    pub high: String,
    #[serde(rename = "Low")]
    pub low: String,
    #[serde(rename = "Close")]
    pub close: String,
}

impl PriceRecord {
    pub fn new(
        date: TradingDate,
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            date,
            open: validate_decimal("Open", open.into())?,
            high: validate_decimal("High", high.into())?,
            low: validate_decimal("Low", low.into())?,
            close: validate_decimal("Close", close.into())?,
        })
    }
}

/// Unvalidated record shape as it appears in a CSV row.
#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: String,
    #[serde(rename = "High")]
    high: String,
    #[serde(rename = "Low")]
    low: String,
    #[serde(rename = "Close")]
    close: String,
}

impl TryFrom<PriceRow> for PriceRecord {
    type Error = ValidationError;

    fn try_from(row: PriceRow) -> Result<Self, Self::Error> {
        Self::new(
            TradingDate::parse(&row.date)?,
            row.open,
            row.high,
            row.low,
            row.close,
        )
    }
}

/// Daily records for one symbol, strictly ascending by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSeries {
    symbol: Symbol,
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, records: Vec<PriceRecord>) -> Result<Self, ValidationError> {
        if let Some(pair) = records.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            return Err(ValidationError::UnorderedSeries {
                previous: pair[0].date.to_string(),
                next: pair[1].date.to_string(),
            });
        }

        Ok(Self { symbol, records })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Accepts finite decimal text only, with no surrounding whitespace, and
/// returns it unchanged.
fn validate_decimal(field: &'static str, value: String) -> Result<String, ValidationError> {
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidPrice { field, value }),
    }
}
