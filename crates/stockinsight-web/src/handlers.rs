use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use stockinsight_core::{csv_store, CoreError, DailySeriesRequest, Symbol};
use tracing::info;

use crate::error::ApiError;
use crate::response::StockResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub symbol: Option<String>,
}

/// `GET /api/stock[?symbol=TEXT]`
///
/// Without a symbol the default dataset is advertised and nothing is fetched.
/// With one, the latest window of daily prices replaces the last-fetched file.
pub async fn fetch_stock_data(
    State(state): State<AppState>,
    query: Result<Query<StockQuery>, QueryRejection>,
) -> Result<Json<StockResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let Some(raw_symbol) = query.symbol.filter(|value| !value.trim().is_empty()) else {
        return Ok(Json(StockResponse::saved(
            "Using default SP500 data",
            state.default_dataset_url(),
        )));
    };

    let symbol = Symbol::parse(&raw_symbol)
        .map_err(|error| ApiError::from_fetch(CoreError::from(error)))?;
    let request = DailySeriesRequest::new(symbol.clone(), state.config.window)
        .map_err(|error| ApiError::from_fetch(CoreError::from(error)))?;

    let series = state
        .adapter
        .daily_series(&request)
        .await
        .map_err(ApiError::from_fetch)?;

    let path = state.config.last_fetched_path();
    let rows = series.len();
    let target = path.clone();
    tokio::task::spawn_blocking(move || csv_store::write_series(&series, &target))
        .await
        .map_err(|error| ApiError::Internal(error.to_string()))?
        .map_err(|source| ApiError::Save {
            symbol: symbol.to_string(),
            source,
        })?;

    info!(%symbol, rows, path = %path.display(), "saved daily series");

    Ok(Json(StockResponse::saved(
        format!("Data saved for {symbol}"),
        state.last_fetched_url(),
    )))
}

/// `GET /api/something`
pub async fn liveness() -> &'static str {
    "This is working"
}
