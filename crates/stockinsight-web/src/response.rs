use serde::{Deserialize, Serialize};

/// JSON body returned by `/api/stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StockResponse {
    pub fn saved(message: impl Into<String>, csv_path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            csv_path: Some(csv_path.into()),
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            csv_path: None,
            success: false,
            error: Some(error.into()),
        }
    }
}
