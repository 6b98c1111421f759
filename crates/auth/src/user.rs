//! Operator profile as returned by `GET /accounts/me/`.

use core::str::FromStr;

use returnshield_core::{DomainError, UserId};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Onboarding
// ─────────────────────────────────────────────────────────────────────────────

/// Merchant onboarding progress, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStage {
    #[default]
    Connect,
    Sync,
    Insights,
    Complete,
}

impl OnboardingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStage::Connect => "connect",
            OnboardingStage::Sync => "sync",
            OnboardingStage::Insights => "insights",
            OnboardingStage::Complete => "complete",
        }
    }
}

impl core::fmt::Display for OnboardingStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "connect" => Ok(OnboardingStage::Connect),
            "sync" => Ok(OnboardingStage::Sync),
            "insights" => Ok(OnboardingStage::Insights),
            "complete" => Ok(OnboardingStage::Complete),
            other => Err(DomainError::validation(format!(
                "onboarding stage must be one of: connect, sync, insights, complete (got {other})"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscription tier
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Trial,
    Launch,
    Scale,
    Elite,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Trial => "trial",
            SubscriptionTier::Launch => "launch",
            SubscriptionTier::Scale => "scale",
            SubscriptionTier::Elite => "elite",
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionTier::Trial)
    }
}

impl core::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trial" => Ok(SubscriptionTier::Trial),
            "launch" => Ok(SubscriptionTier::Launch),
            "scale" => Ok(SubscriptionTier::Scale),
            "elite" => Ok(SubscriptionTier::Elite),
            other => Err(DomainError::validation(format!(
                "plan must be one of: trial, launch, scale, elite (got {other})"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store platform
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorePlatform {
    #[default]
    None,
    Shopify,
    Bigcommerce,
    Woocommerce,
}

impl StorePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorePlatform::None => "none",
            StorePlatform::Shopify => "shopify",
            StorePlatform::Bigcommerce => "bigcommerce",
            StorePlatform::Woocommerce => "woocommerce",
        }
    }
}

impl core::fmt::Display for StorePlatform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorePlatform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(StorePlatform::None),
            "shopify" => Ok(StorePlatform::Shopify),
            "bigcommerce" => Ok(StorePlatform::Bigcommerce),
            "woocommerce" => Ok(StorePlatform::Woocommerce),
            other => Err(DomainError::validation(format!(
                "store platform must be one of: none, shopify, bigcommerce, woocommerce (got {other})"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

/// Cached operator profile. Refreshed only by an explicit re-fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub has_shopify_store: bool,
    #[serde(default)]
    pub shopify_domain: String,
    #[serde(default)]
    pub store_platform: StorePlatform,
    #[serde(default)]
    pub store_domain: String,
    #[serde(default)]
    pub stripe_customer_id: String,
    #[serde(default)]
    pub onboarding_stage: OnboardingStage,
    #[serde(default)]
    pub subscription_status: SubscriptionTier,
    #[serde(default)]
    pub has_completed_walkthrough: bool,
}

impl UserProfile {
    pub fn is_paid(&self) -> bool {
        self.subscription_status.is_paid()
    }

    /// Full name when known, otherwise the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_me_payload() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "id": 12,
            "username": "ops@brand.co",
            "email": "ops@brand.co",
            "first_name": "",
            "last_name": "",
            "company_name": "Brand Co",
            "has_shopify_store": true,
            "shopify_domain": "brand.myshopify.com",
            "store_platform": "shopify",
            "store_domain": "brand.myshopify.com",
            "stripe_customer_id": "",
            "onboarding_stage": "sync",
            "subscription_status": "trial",
            "has_completed_walkthrough": false
        }))
        .unwrap();

        assert_eq!(profile.id, UserId::new(12));
        assert_eq!(profile.store_platform, StorePlatform::Shopify);
        assert_eq!(profile.onboarding_stage, OnboardingStage::Sync);
        assert!(!profile.is_paid());
        assert_eq!(profile.display_name(), "ops@brand.co");
    }

    #[test]
    fn enums_parse_their_wire_names() {
        assert_eq!("Elite".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Elite);
        assert!(SubscriptionTier::Scale.is_paid());
        assert_eq!("woocommerce".parse::<StorePlatform>().unwrap(), StorePlatform::Woocommerce);
        assert!("magento".parse::<StorePlatform>().is_err());
        assert!(OnboardingStage::Connect < OnboardingStage::Complete);
    }
}
