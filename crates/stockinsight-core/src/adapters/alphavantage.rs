use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ApiKey, AppConfig};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{CoreError, PriceRecord, PriceSeries, Symbol, TradingDate, ValidationError};

pub const ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Number of most recent trading days kept when a caller does not say otherwise.
pub const DEFAULT_WINDOW: usize = 90;

const TIME_SERIES_DAILY: &str = "TIME_SERIES_DAILY";

/// Request for the most recent `window` daily records of a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySeriesRequest {
    pub symbol: Symbol,
    pub window: usize,
}

impl DailySeriesRequest {
    pub fn new(symbol: Symbol, window: usize) -> Result<Self, ValidationError> {
        if window == 0 {
            return Err(ValidationError::EmptyWindow);
        }
        Ok(Self { symbol, window })
    }

}

/// Alpha Vantage `TIME_SERIES_DAILY` fetcher.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: ApiKey,
    base_url: String,
    timeout_ms: u64,
}

impl AlphaVantageAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: ApiKey) -> Self {
        Self {
            http_client,
            api_key,
            base_url: ALPHAVANTAGE_BASE_URL.to_owned(),
            timeout_ms: 30_000,
        }
    }

    /// Adapter backed by reqwest, using the endpoint and timeout from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), config.api_key.clone())
            .with_base_url(config.provider_base_url.clone())
            .with_timeout_ms(config.upstream_timeout_ms)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetch the full daily history for the symbol and keep the last `window` days,
    /// earliest first.
    pub async fn daily_series(&self, req: &DailySeriesRequest) -> Result<PriceSeries, CoreError> {
        let request = HttpRequest::get(&self.base_url)
            .with_query("function", TIME_SERIES_DAILY)
            .with_query("symbol", req.symbol.as_str())
            .with_query("outputsize", "full")
            .with_query("apikey", self.api_key.expose())
            .with_timeout_ms(self.timeout_ms);

        debug!(url = %request.redacted_url(&["apikey"]), "requesting daily series");

        let response = self.http_client.execute(request).await?;

        debug!(
            symbol = %req.symbol,
            status = response.status,
            bytes = response.body.len(),
            "alphavantage responded"
        );

        if !response.is_success() {
            warn!(symbol = %req.symbol, status = response.status, "alphavantage returned an error status");
            return Err(CoreError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        normalize_daily_series(&req.symbol, &response.body, req.window)
    }
}

/// Turn a `TIME_SERIES_DAILY` payload into the most recent `window` records,
/// sorted earliest first.
pub fn normalize_daily_series(
    symbol: &Symbol,
    body: &str,
    window: usize,
) -> Result<PriceSeries, CoreError> {
    let payload: DailySeriesResponse = serde_json::from_str(body)?;
    let notice = payload.notice();

    let time_series = match payload.time_series {
        Some(time_series) if !time_series.is_empty() => time_series,
        _ => {
            return Err(CoreError::NoData {
                symbol: symbol.to_string(),
                detail: notice,
            })
        }
    };

    // Keys are ISO dates, so the map's lexical order is chronological.
    let mut records = time_series
        .iter()
        .rev()
        .take(window)
        .map(|(date, bar)| normalize_bar(date, bar))
        .collect::<Result<Vec<_>, _>>()?;
    records.reverse();

    Ok(PriceSeries::new(symbol.clone(), records)?)
}

/// Only called for days inside the window. Any shape problem is `MalformedData`.
fn normalize_bar(date: &str, bar: &Value) -> Result<PriceRecord, CoreError> {
    let malformed = |reason: String| CoreError::MalformedData {
        date: date.to_owned(),
        reason,
    };

    let trading_date = TradingDate::parse(date).map_err(|e| malformed(e.to_string()))?;
    let fields = bar
        .as_object()
        .ok_or_else(|| malformed(String::from("entry is not an object")))?;
    let text = |key: &str| match fields.get(key) {
        None => Err(malformed(format!("missing field '{key}'"))),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(malformed(format!("field '{key}' must be a string"))),
    };

    PriceRecord::new(
        trading_date,
        text("1. open")?,
        text("2. high")?,
        text("3. low")?,
        text("4. close")?,
    )
    .map_err(|e| malformed(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Time Series (Daily)", default)]
    time_series: Option<BTreeMap<String, Value>>,
    #[serde(rename = "Error Message", default)]
    error_message: Option<String>,
    #[serde(rename = "Note", default)]
    note: Option<String>,
    #[serde(rename = "Information", default)]
    information: Option<String>,
}

impl DailySeriesResponse {
    /// Alpha Vantage reports bad symbols and throttling in-band with a 200 status.
    fn notice(&self) -> Option<String> {
        self.error_message
            .clone()
            .or_else(|| self.note.clone())
            .or_else(|| self.information.clone())
    }
}
