//! Behavior tests for the daily-series fetcher.
//!
//! These drive `AlphaVantageAdapter` through a scripted transport and check
//! what a caller observes: how many records come back, in which order, and
//! which error surfaces for each kind of provider failure.

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value};
use stockinsight_core::{
    csv_store, normalize_daily_series, AlphaVantageAdapter, ApiKey, CoreError, CoreErrorKind,
    DailySeriesRequest, HttpClient, HttpError, HttpRequest, HttpResponse, Symbol, DEFAULT_WINDOW,
};
use tempfile::tempdir;

#[derive(Debug)]
struct ScriptedHttpClient {
    response: Result<HttpResponse, HttpError>,
    calls: Mutex<usize>,
}

impl ScriptedHttpClient {
    fn new(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().expect("call counter should not be poisoned")
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        *self.calls.lock().expect("call counter should not be poisoned") += 1;
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

fn adapter(client: Arc<ScriptedHttpClient>) -> AlphaVantageAdapter {
    AlphaVantageAdapter::new(client, ApiKey::new("test-key").expect("valid key"))
}

fn symbol(value: &str) -> Symbol {
    Symbol::parse(value).expect("valid symbol")
}

/// Provider payload with one entry per date, in the order given.
fn daily_payload(dates: &[String]) -> String {
    let mut series = Map::new();
    for (index, date) in dates.iter().enumerate() {
        let base = 100.0 + index as f64;
        series.insert(
            date.clone(),
            json!({
                "1. open": format!("{base:.4}"),
                "2. high": format!("{:.4}", base + 1.5),
                "3. low": format!("{:.4}", base - 1.25),
                "4. close": format!("{:.4}", base + 0.5),
                "5. volume": "1000000"
            }),
        );
    }
    json!({
        "Meta Data": {"1. Information": "Daily Prices (open, high, low, close) and Volumes"},
        "Time Series (Daily)": Value::Object(series)
    })
    .to_string()
}

fn january(days: std::ops::RangeInclusive<u32>) -> Vec<String> {
    days.map(|day| format!("2024-01-{day:02}")).collect()
}

// =============================================================================
// Window selection and ordering
// =============================================================================

#[tokio::test]
async fn when_history_exceeds_window_user_gets_latest_days_earliest_first() {
    // Given: five days of history
    let client = ScriptedHttpClient::new(Ok(HttpResponse::ok_json(daily_payload(&january(
        1..=5,
    )))));

    // When: a window of three is requested
    let request = DailySeriesRequest::new(symbol("IBM"), 3).expect("valid request");
    let series = adapter(client)
        .daily_series(&request)
        .await
        .expect("fetch should succeed");

    // Then: exactly the last three days come back, oldest first
    let dates = series
        .records()
        .iter()
        .map(|record| record.date.to_string())
        .collect::<Vec<_>>();
    assert_eq!(dates, vec!["2024-01-03", "2024-01-04", "2024-01-05"]);
    assert_eq!(series.symbol().as_str(), "IBM");
}

#[test]
fn result_size_is_min_of_history_and_window() {
    let history_sizes = [1_usize, 2, 5, 31];
    let windows = [1_usize, 3, 31, 90];

    for &k in &history_sizes {
        // Shuffle the insertion order so ordering cannot leak from the payload.
        let mut dates = (1..=k as u32)
            .map(|day| format!("2024-03-{day:02}"))
            .collect::<Vec<_>>();
        dates.reverse();
        dates.rotate_left(k / 2);
        let body = daily_payload(&dates);

        for &w in &windows {
            let series = normalize_daily_series(&symbol("MSFT"), &body, w)
                .unwrap_or_else(|error| panic!("k={k} w={w}: {error}"));

            assert_eq!(series.len(), k.min(w), "k={k} w={w}");

            let records = series.records();
            assert!(
                records.windows(2).all(|pair| pair[0].date < pair[1].date),
                "k={k} w={w}: dates must be strictly ascending"
            );
            let unique = records.iter().map(|r| r.date).collect::<BTreeSet<_>>();
            assert_eq!(unique.len(), records.len());

            let last = records.last().expect("non-empty").date.to_string();
            assert_eq!(last, format!("2024-03-{k:02}"), "latest day is always kept");
        }
    }
}

#[test]
fn short_history_is_returned_without_padding() {
    let body = daily_payload(&january(1..=2));
    let series = normalize_daily_series(&symbol("IBM"), &body, 90).expect("should normalize");
    assert_eq!(series.len(), 2);
}

#[test]
fn provider_field_names_are_mapped_to_canonical_fields() {
    let body = r#"{"Time Series (Daily)": {
        "2024-01-02": {"1. open": "187.1500", "2. high": "188.4400", "3. low": "183.8850", "4. close": "185.6400", "5. volume": "82488674"}
    }}"#;

    let series = normalize_daily_series(&symbol("AAPL"), body, 90).expect("should normalize");
    let record = &series.records()[0];

    assert_eq!(record.date.to_string(), "2024-01-02");
    assert_eq!(record.open, "187.1500");
    assert_eq!(record.high, "188.4400");
    assert_eq!(record.low, "183.8850");
    assert_eq!(record.close, "185.6400");
}

// =============================================================================
// Failure classification
// =============================================================================

#[tokio::test]
async fn when_provider_returns_500_no_file_is_written() {
    // Given: a provider failing with 500 and an output location
    let client = ScriptedHttpClient::new(Ok(HttpResponse::with_status(
        500,
        "internal error",
    )));
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("user_stock_data.csv");

    // When: the caller fetches, writing only on success
    let request = DailySeriesRequest::new(symbol("IBM"), DEFAULT_WINDOW).expect("valid request");
    let result = adapter(Arc::clone(&client)).daily_series(&request).await;
    if let Ok(series) = &result {
        csv_store::write_series(series, &output).expect("write");
    }

    // Then: the error carries the provider status and body, and nothing was written
    match result {
        Err(CoreError::Upstream { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
    assert_eq!(client.calls(), 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn when_time_series_is_empty_user_gets_no_data_error() {
    let client = ScriptedHttpClient::new(Ok(HttpResponse::ok_json(
        r#"{"Meta Data": {}, "Time Series (Daily)": {}}"#,
    )));
    let request = DailySeriesRequest::new(symbol("IBM"), DEFAULT_WINDOW).expect("valid request");

    let error = adapter(client)
        .daily_series(&request)
        .await
        .expect_err("fetch should fail");

    assert_eq!(error.kind(), CoreErrorKind::NoData);
}

#[test]
fn missing_time_series_key_is_no_data() {
    let error = normalize_daily_series(&symbol("IBM"), r#"{"Meta Data": {}}"#, 90)
        .expect_err("must fail");
    assert!(matches!(error, CoreError::NoData { detail: None, .. }));
}

#[test]
fn malformed_entry_fails_instead_of_defaulting() {
    let body = r#"{"Time Series (Daily)": {
        "2024-01-02": {"1. open": "10", "2. high": "11", "3. low": "9", "4. close": "10.5"},
        "2024-01-03": {"1. open": "10", "2. high": "11", "3. low": "9"}
    }}"#;

    let error = normalize_daily_series(&symbol("IBM"), body, 90).expect_err("must fail");
    assert_eq!(error.kind(), CoreErrorKind::MalformedData);
    assert!(error.to_string().contains("4. close"));
}

#[test]
fn malformed_entry_outside_window_is_not_inspected() {
    let body = r#"{"Time Series (Daily)": {
        "2024-01-02": {"1. open": "10"},
        "2024-01-03": {"1. open": "10", "2. high": "11", "3. low": "9", "4. close": "10.5"}
    }}"#;

    let series = normalize_daily_series(&symbol("IBM"), body, 1).expect("should normalize");
    assert_eq!(series.len(), 1);
}

#[test]
fn invalid_date_key_is_malformed() {
    let body = r#"{"Time Series (Daily)": {
        "2024-13-40": {"1. open": "10", "2. high": "11", "3. low": "9", "4. close": "10.5"}
    }}"#;

    let error = normalize_daily_series(&symbol("IBM"), body, 90).expect_err("must fail");
    assert!(matches!(error, CoreError::MalformedData { ref date, .. } if date == "2024-13-40"));
}

#[test]
fn junk_entry_outside_window_is_not_inspected() {
    // Given: an old day whose value is not even an object
    let body = r#"{"Time Series (Daily)": {
        "2000-01-02": "junk",
        "2024-01-02": {"1. open": "10", "2. high": "11", "3. low": "9", "4. close": "10.5"}
    }}"#;

    // When: only the latest day is requested
    let series = normalize_daily_series(&symbol("IBM"), body, 1).expect("should normalize");

    // Then: the old entry never affects the result
    assert_eq!(series.len(), 1);
    assert_eq!(series.records()[0].date.to_string(), "2024-01-02");
}

#[test]
fn number_typed_price_inside_window_is_malformed() {
    let body = r#"{"Time Series (Daily)": {
        "2024-01-02": {"1. open": 1.0, "2. high": "11", "3. low": "9", "4. close": "10.5"}
    }}"#;

    let error = normalize_daily_series(&symbol("IBM"), body, 90).expect_err("must fail");
    assert_eq!(error.kind(), CoreErrorKind::MalformedData);
    assert!(error.to_string().contains("1. open"));
}

#[tokio::test]
async fn null_time_series_is_no_data_like_a_missing_one() {
    let client = ScriptedHttpClient::new(Ok(HttpResponse::ok_json(
        r#"{"Meta Data": {}, "Time Series (Daily)": null}"#,
    )));
    let request = DailySeriesRequest::new(symbol("IBM"), DEFAULT_WINDOW).expect("valid request");

    let error = adapter(client)
        .daily_series(&request)
        .await
        .expect_err("fetch should fail");

    assert_eq!(error.kind(), CoreErrorKind::NoData);
}
