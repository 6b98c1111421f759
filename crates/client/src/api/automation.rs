//! Automation rules and fraud thresholds.

use returnshield_auth::AuthToken;
use returnshield_core::RuleId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleType {
    Approve,
    Reject,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerField {
    TotalValue,
    ReturnReason,
    ItemCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleOperator {
    Eq,
    Gt,
    Lt,
    Contains,
}

/// A stored rule (`GET /automation-rules/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: RuleId,
    pub name: String,
    pub rule_type: RuleType,
    pub trigger_field: TriggerField,
    pub operator: RuleOperator,
    /// Compared as text or number depending on `trigger_field`.
    pub value: String,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /automation-rules/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAutomationRule {
    pub name: String,
    pub rule_type: RuleType,
    pub trigger_field: TriggerField,
    pub operator: RuleOperator,
    pub value: String,
    pub is_active: bool,
}

/// Fraud thresholds (`GET/PUT /fraud-settings/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudSettings {
    pub flag_high_velocity: bool,
    pub max_return_velocity: u32,
    pub flag_high_value: bool,
    pub high_value_threshold: Decimal,
}

impl ApiClient {
    pub async fn automation_rules(&self, token: &AuthToken) -> Result<Vec<AutomationRule>, ApiError> {
        self.get("/automation-rules/", Some(token)).await
    }

    pub async fn create_automation_rule(
        &self,
        rule: &NewAutomationRule,
        token: &AuthToken,
    ) -> Result<AutomationRule, ApiError> {
        self.post("/automation-rules/", rule, Some(token)).await
    }

    pub async fn delete_automation_rule(&self, id: RuleId, token: &AuthToken) -> Result<(), ApiError> {
        self.delete(&format!("/automation-rules/{id}/"), Some(token))
            .await
    }

    pub async fn fraud_settings(&self, token: &AuthToken) -> Result<FraudSettings, ApiError> {
        self.get("/fraud-settings/", Some(token)).await
    }

    pub async fn update_fraud_settings(
        &self,
        settings: &FraudSettings,
        token: &AuthToken,
    ) -> Result<FraudSettings, ApiError> {
        self.put("/fraud-settings/", settings, Some(token)).await
    }
}
