use returnshield_auth::AuthToken;
use returnshield_insights::{CohortComparison, Profitability, ReasonBreakdown};

use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn reason_breakdown(
        &self,
        token: Option<&AuthToken>,
    ) -> Result<Vec<ReasonBreakdown>, ApiError> {
        self.get("/analytics/reasons/", token).await
    }

    pub async fn cohorts(&self, token: Option<&AuthToken>) -> Result<CohortComparison, ApiError> {
        self.get("/analytics/cohorts/", token).await
    }

    pub async fn profitability(&self, token: Option<&AuthToken>) -> Result<Profitability, ApiError> {
        self.get("/analytics/profitability/", token).await
    }
}
