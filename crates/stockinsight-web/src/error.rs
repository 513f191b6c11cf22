use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use stockinsight_core::{ConfigError, CoreError, CoreErrorKind};
use thiserror::Error;
use tracing::{error, warn};

use crate::response::StockResponse;

/// Failure outcomes of `/api/stock`, each mapped to a status and JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// Provider had nothing usable for the symbol.
    #[error("no data retrieved from API: {0}")]
    NoData(#[source] CoreError),

    #[error("failed to save data for {symbol}: {source}")]
    Save {
        symbol: String,
        #[source]
        source: CoreError,
    },

    #[error("failed to retrieve stock data: {0}")]
    Fetch(#[source] CoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Classify a failure that happened before anything was written.
    pub fn from_fetch(error: CoreError) -> Self {
        match error.kind() {
            CoreErrorKind::NoData | CoreErrorKind::Upstream | CoreErrorKind::Validation => {
                Self::NoData(error)
            }
            CoreErrorKind::Transport
            | CoreErrorKind::MalformedData
            | CoreErrorKind::Decode
            | CoreErrorKind::Io => Self::Fetch(error),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuery(_) | Self::NoData(_) => StatusCode::BAD_REQUEST,
            Self::Save { .. } | Self::Fetch(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::InvalidQuery(_) => String::from("Invalid query string"),
            Self::NoData(_) => String::from("No data retrieved from API"),
            Self::Save { symbol, .. } => format!("Failed to save data for {symbol}"),
            Self::Fetch(_) | Self::Internal(_) => String::from("Failed to retrieve stock data"),
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::NoData(source) | Self::Fetch(source) | Self::Save { source, .. } => {
                source.to_string()
            }
            Self::InvalidQuery(detail) | Self::Internal(detail) => detail.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "stock request failed");
        } else {
            warn!(error = %self, "stock request rejected");
        }

        let body = StockResponse::failed(self.message(), self.detail());
        (status, Json(body)).into_response()
    }
}

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
