//! Endpoint bindings, grouped by backend area.
//!
//! Each submodule adds methods to [`ApiClient`](crate::http::ApiClient) and
//! declares the wire types it exchanges.

pub mod accounts;
pub mod analytics;
pub mod automation;
pub mod billing;
pub mod platform;
pub mod returns;

pub use accounts::FlagsResponse;
pub use automation::{
    AutomationRule, FraudSettings, NewAutomationRule, RuleOperator, RuleType, TriggerField,
};
pub use billing::{
    ActivationResponse, CHECKOUT_FALLBACK_MESSAGE, CheckoutRequest, CheckoutSession,
    checkout_error_message,
};
pub use platform::{HEALTH_FALLBACK_MESSAGE, IntegrationHealth, PlatformStatus};
pub use returns::{
    CoachAction, CoachMetrics, CoachSummary, ExchangeCoach, PlaybookRecommendation, PlaybookRequest,
    PlaybookResponse, ReturnlessCandidate, ReturnlessInsights, ReturnlessSummary, VipQueue,
    VipQueueEntry, VipSummary,
};
