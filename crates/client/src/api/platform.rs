//! Storefront integration status.

use returnshield_auth::AuthToken;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

pub const HEALTH_FALLBACK_MESSAGE: &str = "Failed to load integration health status.";

/// Marketing card for a supported storefront (`GET /platforms/status/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatus {
    pub slug: String,
    pub name: String,
    pub status: String,
    pub badge: String,
    pub description: String,
    pub cta_label: String,
    pub cta_url: String,
}

#[derive(Deserialize)]
struct PlatformStatusResponse {
    #[serde(default)]
    platforms: Vec<PlatformStatus>,
}

/// Connection check for one storefront (`GET /integrations/health/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationHealth {
    pub platform: String,
    pub status: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub last_checked_at: Option<String>,
}

impl IntegrationHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "ok" | "connected")
    }
}

impl ApiClient {
    pub async fn integrations_health(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<IntegrationHealth>, ApiError> {
        self.get("/integrations/health/", Some(token)).await
    }

    pub async fn platform_status(&self) -> Result<Vec<PlatformStatus>, ApiError> {
        self.get::<PlatformStatusResponse>("/platforms/status/", None)
            .await
            .map(|resp| resp.platforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_entries_tolerate_missing_optionals() {
        let raw = r#"[{"platform":"shopify","status":"healthy"}]"#;
        let parsed: Vec<IntegrationHealth> = serde_json::from_str(raw).unwrap();
        assert!(parsed[0].is_healthy());
        assert!(parsed[0].domain.is_none());
    }
}
