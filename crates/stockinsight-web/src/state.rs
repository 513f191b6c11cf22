use std::sync::Arc;

use stockinsight_core::config::{DEFAULT_DATASET_FILE, LAST_FETCHED_FILE};
use stockinsight_core::{AlphaVantageAdapter, AppConfig};

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub adapter: Arc<AlphaVantageAdapter>,
}

impl AppState {
    pub fn new(config: AppConfig, adapter: AlphaVantageAdapter) -> Self {
        Self {
            config: Arc::new(config),
            adapter: Arc::new(adapter),
        }
    }

    /// State with a reqwest-backed adapter built from `config`.
    pub fn from_config(config: AppConfig) -> Self {
        let adapter = AlphaVantageAdapter::from_config(&config);
        Self::new(config, adapter)
    }

    pub fn default_dataset_url(&self) -> String {
        self.config.public_csv_url(DEFAULT_DATASET_FILE)
    }

    pub fn last_fetched_url(&self) -> String {
        self.config.public_csv_url(LAST_FETCHED_FILE)
    }
}
