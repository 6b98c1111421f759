//! Subscription checkout.

use returnshield_auth::{AuthToken, SubscriptionTier};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Shown when checkout fails without a server explanation.
pub const CHECKOUT_FALLBACK_MESSAGE: &str =
    "Unable to start checkout. Please try again or contact support.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub plan: SubscriptionTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

impl CheckoutRequest {
    pub fn new(plan: SubscriptionTier) -> Self {
        Self {
            plan,
            price_id: None,
            success_url: None,
            cancel_url: None,
        }
    }

    pub fn with_price_id(mut self, price_id: impl Into<String>) -> Self {
        self.price_id = Some(price_id.into());
        self
    }

    pub fn with_return_urls(mut self, success: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.success_url = Some(success.into());
        self.cancel_url = Some(cancel.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivationResponse {
    pub subscription_status: SubscriptionTier,
}

#[derive(Serialize)]
struct ActivateRequest {
    plan: SubscriptionTier,
}

impl ApiClient {
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
        token: Option<&AuthToken>,
    ) -> Result<CheckoutSession, ApiError> {
        self.post("/billing/create-checkout-session/", request, token)
            .await
    }

    pub async fn activate_plan(
        &self,
        plan: SubscriptionTier,
        token: &AuthToken,
    ) -> Result<ActivationResponse, ApiError> {
        self.post("/billing/activate/", &ActivateRequest { plan }, Some(token))
            .await
    }
}

/// Message for a failed checkout: the server detail, or the generic fallback.
pub fn checkout_error_message(err: &ApiError) -> String {
    err.message_or(CHECKOUT_FALLBACK_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_body_omits_unset_fields() {
        let body = CheckoutRequest::new(SubscriptionTier::Scale).with_price_id("price_123");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"plan": "scale", "price_id": "price_123"}));
    }

    #[test]
    fn transport_failures_use_the_fallback() {
        let err = ApiError::Network("reset".to_string());
        assert_eq!(checkout_error_message(&err), CHECKOUT_FALLBACK_MESSAGE);
    }
}
