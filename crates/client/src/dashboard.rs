//! Merchant dashboard and analytics panel loading.
//!
//! The dashboard's three feeds are one fail-fast group: the first error wins
//! and the rest are dropped. Analytics panels settle independently so one
//! broken chart never blanks the page.

use returnshield_auth::AuthToken;
use returnshield_insights::{CohortComparison, Profitability, ReasonBreakdown};

use crate::api::{ExchangeCoach, ReturnlessInsights, VipQueue};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::loader::LoadHandle;

pub const DASHBOARD_FALLBACK_MESSAGE: &str = "Unable to load dashboard data.";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub returnless: ReturnlessInsights,
    pub coach: ExchangeCoach,
    pub vip: VipQueue,
}

/// Load every dashboard feed concurrently; fail on the first error.
///
/// Pass [`SessionManager::api`](crate::SessionManager::api) so a rejected
/// token signs the operator out.
pub async fn load_dashboard(
    api: &ApiClient,
    token: Option<&AuthToken>,
) -> Result<DashboardData, ApiError> {
    let (returnless, coach, vip) = tokio::try_join!(
        api.returnless_insights(token),
        api.exchange_coach(token),
        api.vip_resolution(token),
    )?;

    tracing::info!(
        candidates = returnless.candidates.len(),
        coach_actions = coach.actions.len(),
        vip_tickets = vip.queue.len(),
        "dashboard loaded"
    );

    Ok(DashboardData {
        returnless,
        coach,
        vip,
    })
}

/// Banner text for a failed dashboard load.
pub fn dashboard_error_message(err: &ApiError) -> String {
    err.message_or(DASHBOARD_FALLBACK_MESSAGE)
}

/// Each analytics panel with its own outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsPanels {
    pub reasons: Result<Vec<ReasonBreakdown>, ApiError>,
    pub cohorts: Result<CohortComparison, ApiError>,
    pub profitability: Result<Profitability, ApiError>,
}

impl AnalyticsPanels {
    pub fn all_loaded(&self) -> bool {
        self.reasons.is_ok() && self.cohorts.is_ok() && self.profitability.is_ok()
    }

    pub fn failures(&self) -> usize {
        [
            self.reasons.is_err(),
            self.cohorts.is_err(),
            self.profitability.is_err(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }
}

/// Load every analytics panel concurrently and wait for all of them.
pub async fn load_analytics(api: &ApiClient, token: Option<&AuthToken>) -> AnalyticsPanels {
    let (reasons, cohorts, profitability) = tokio::join!(
        api.reason_breakdown(token),
        api.cohorts(token),
        api.profitability(token),
    );

    let panels = AnalyticsPanels {
        reasons,
        cohorts,
        profitability,
    };
    if let Err(err) = &panels.reasons {
        tracing::warn!(panel = "reasons", error = %err, "analytics panel failed");
    }
    if let Err(err) = &panels.cohorts {
        tracing::warn!(panel = "cohorts", error = %err, "analytics panel failed");
    }
    if let Err(err) = &panels.profitability {
        tracing::warn!(panel = "profitability", error = %err, "analytics panel failed");
    }
    panels
}

/// [`load_dashboard`] as a cancellable task.
pub fn spawn_dashboard(
    api: ApiClient,
    token: Option<AuthToken>,
) -> LoadHandle<Result<DashboardData, ApiError>> {
    LoadHandle::spawn(async move { load_dashboard(&api, token.as_ref()).await })
}

/// [`load_analytics`] as a cancellable task.
pub fn spawn_analytics(api: ApiClient, token: Option<AuthToken>) -> LoadHandle<AnalyticsPanels> {
    LoadHandle::spawn(async move { load_analytics(&api, token.as_ref()).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[tokio::test]
    async fn unconfigured_dashboard_surfaces_the_fallback() {
        let api = ApiClient::new(&ClientConfig::default()).unwrap();
        let err = load_dashboard(&api, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert_eq!(dashboard_error_message(&err), DASHBOARD_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn analytics_reports_each_panel() {
        let api = ApiClient::new(&ClientConfig::default()).unwrap();
        let panels = spawn_analytics(api, None).join().await.unwrap();
        assert!(!panels.all_loaded());
        assert_eq!(panels.failures(), 3);
    }
}
