//! Notification broadcast whenever the dashboard API client sees an error status.

use serde::{Deserialize, Serialize};

/// Topic name the dashboard uses for API error broadcasts.
pub const API_ERROR_TOPIC: &str = "returnshield:api-error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorNotice {
    /// Request path, e.g. `/returns/exchange-coach/`.
    pub path: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorNotice {
    pub fn new(path: impl Into<String>, status: u16, message: Option<String>) -> Self {
        Self {
            path: path.into(),
            status,
            message,
        }
    }
}
