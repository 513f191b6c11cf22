use thiserror::Error;

use crate::http_client::HttpError;

/// Validation and contract errors exposed by `stockinsight-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be a finite decimal number: '{value}'")]
    InvalidPrice { field: &'static str, value: String },

    #[error("window must be greater than zero")]
    EmptyWindow,

    #[error("series dates must be strictly ascending: '{previous}' is followed by '{next}'")]
    UnorderedSeries { previous: String, next: String },

    #[error("csv header must be 'Date,Open,High,Low,Close', got '{found}'")]
    InvalidHeader { found: String },
}

/// Coarse classification of [`CoreError`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorKind {
    Validation,
    Transport,
    Upstream,
    NoData,
    MalformedData,
    Decode,
    Io,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("provider transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("provider returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("no daily time series returned for {symbol}{}", notice_suffix(.detail))]
    NoData {
        symbol: String,
        detail: Option<String>,
    },

    #[error("daily entry '{date}' is malformed: {reason}")]
    MalformedData { date: String, reason: String },

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl CoreError {
    pub const fn kind(&self) -> CoreErrorKind {
        match self {
            Self::Validation(_) => CoreErrorKind::Validation,
            Self::Transport(_) => CoreErrorKind::Transport,
            Self::Upstream { .. } => CoreErrorKind::Upstream,
            Self::NoData { .. } => CoreErrorKind::NoData,
            Self::MalformedData { .. } => CoreErrorKind::MalformedData,
            Self::Decode(_) => CoreErrorKind::Decode,
            Self::Io(_) | Self::Csv(_) => CoreErrorKind::Io,
        }
    }
}

fn notice_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|notice| format!(": {notice}"))
        .unwrap_or_default()
}

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable '{name}' is not set")]
    Missing { name: &'static str },

    #[error("environment variable '{name}' has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_message_includes_provider_detail() {
        let error = CoreError::NoData {
            symbol: String::from("ZZZZ"),
            detail: Some(String::from("Invalid API call")),
        };
        assert_eq!(
            error.to_string(),
            "no daily time series returned for ZZZZ: Invalid API call"
        );
        assert_eq!(error.kind(), CoreErrorKind::NoData);
    }

    #[test]
    fn csv_and_io_share_a_kind() {
        let io = CoreError::from(std::io::Error::other("disk full"));
        assert_eq!(io.kind(), CoreErrorKind::Io);
    }
}
