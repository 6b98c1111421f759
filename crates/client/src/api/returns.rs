//! Shopper return endpoints and the merchant dashboard feeds.

use returnshield_auth::AuthToken;
use returnshield_core::Order;
use returnshield_returns::{LookupRequest, ReturnConfirmation, ReturnSubmission};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

// ─────────────────────────────────────────────────────────────────────────────
// Returnless refunds
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnlessCandidate {
    pub sku: String,
    pub product_name: String,
    pub avg_unit_cost: f64,
    pub return_volume_30d: u64,
    pub reason_driver: String,
    pub estimated_margin_recaptured: f64,
    pub carbon_kg_prevented: f64,
    pub landfill_lbs_prevented: f64,
    pub handling_minutes_reduced: f64,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnlessSummary {
    pub period: String,
    pub annualized_margin_recovery: f64,
    pub carbon_tonnes_prevented: f64,
    pub landfill_lbs_prevented: f64,
    pub manual_hours_reduced: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnlessInsights {
    pub summary: ReturnlessSummary,
    #[serde(default)]
    pub candidates: Vec<ReturnlessCandidate>,
    #[serde(default)]
    pub playbook: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange coach
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoachMetrics {
    pub return_volume_30d: u64,
    pub avg_unit_cost: f64,
    pub margin_at_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachAction {
    pub sku: String,
    pub headline: String,
    pub description: String,
    #[serde(default)]
    pub recommended_play: Vec<String>,
    pub estimated_monthly_uplift: f64,
    pub impact_score: f64,
    pub metrics: CoachMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachSummary {
    pub period: String,
    pub aggregate_margin_at_risk: f64,
    pub projected_exchange_uplift: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeCoach {
    #[serde(default)]
    pub actions: Vec<CoachAction>,
    pub summary: CoachSummary,
}

// ─────────────────────────────────────────────────────────────────────────────
// VIP resolution hub
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VipQueueEntry {
    pub ticket_id: String,
    pub customer: String,
    pub loyalty_segment: String,
    pub ltv: f64,
    pub order_value: f64,
    pub return_reason: String,
    pub recommended_action: String,
    pub hours_open: f64,
    /// 0..1 probability.
    pub predicted_churn_risk: f64,
    pub sku: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VipSummary {
    pub open_tickets: u64,
    pub avg_hours_open: f64,
    pub revenue_defended: f64,
    pub ops_hours_returned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VipQueue {
    #[serde(default)]
    pub queue: Vec<VipQueueEntry>,
    pub summary: VipSummary,
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange playbook
// ─────────────────────────────────────────────────────────────────────────────

/// Store profile the playbook generator works from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybookRequest {
    /// Percentages, e.g. `18.0`.
    pub return_rate: f64,
    pub exchange_rate: f64,
    pub average_order_value: f64,
    pub logistic_cost_per_return: f64,
    pub top_return_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookRecommendation {
    pub title: String,
    pub description: String,
    pub expected_impact: String,
    #[serde(default)]
    pub automation_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookResponse {
    pub recommendations: Vec<PlaybookRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_wins: Option<Vec<PlaybookRecommendation>>,
}

impl ApiClient {
    /// `POST /returns/lookup/`.
    pub async fn lookup_order(&self, request: &LookupRequest) -> Result<Order, ApiError> {
        self.post("/returns/lookup/", request, None).await
    }

    /// `POST /returns/submit/`.
    pub async fn submit_return(
        &self,
        submission: &ReturnSubmission,
    ) -> Result<ReturnConfirmation, ApiError> {
        self.post("/returns/submit/", submission, None).await
    }

    pub async fn returnless_insights(
        &self,
        token: Option<&AuthToken>,
    ) -> Result<ReturnlessInsights, ApiError> {
        self.get("/returns/returnless-insights/", token).await
    }

    pub async fn exchange_coach(&self, token: Option<&AuthToken>) -> Result<ExchangeCoach, ApiError> {
        self.get("/returns/exchange-coach/", token).await
    }

    pub async fn vip_resolution(&self, token: Option<&AuthToken>) -> Result<VipQueue, ApiError> {
        self.get("/returns/vip-resolution/", token).await
    }

    /// `POST /returns/exchange-playbook/`. Requires a signed-in operator.
    pub async fn exchange_playbook(
        &self,
        request: &PlaybookRequest,
        token: &AuthToken,
    ) -> Result<PlaybookResponse, ApiError> {
        self.post("/returns/exchange-playbook/", request, Some(token))
            .await
    }
}
