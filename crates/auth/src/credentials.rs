//! Login and registration request bodies.

use returnshield_core::DomainError;
use serde::{Deserialize, Serialize};

use crate::user::{OnboardingStage, StorePlatform};

pub const LOGIN_FALLBACK_MESSAGE: &str = "Unable to log in. Please check your credentials.";
pub const REGISTER_FALLBACK_MESSAGE: &str = "Unable to complete registration. Please try again.";

/// Body of `POST /accounts/login/`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, DomainError> {
        let username = username.into().trim().to_string();
        let password = password.into();
        if username.is_empty() {
            return Err(DomainError::validation("username is required"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }
        Ok(Self { username, password })
    }
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /accounts/register/`.
///
/// The email doubles as the username. Shopify stores also fill the legacy
/// `shopify_domain` field; other platforms send it empty.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub store_platform: StorePlatform,
    pub store_domain: String,
    pub has_shopify_store: bool,
    pub shopify_domain: String,
}

impl RegisterRequest {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        company_name: impl Into<String>,
        store_platform: StorePlatform,
        store_domain: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let email = email.into().trim().to_string();
        let password = password.into();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("a valid email is required"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }
        let store_domain = store_domain.into().trim().to_string();
        let is_shopify = store_platform == StorePlatform::Shopify;

        Ok(Self {
            username: email.clone(),
            email,
            password,
            company_name: company_name.into().trim().to_string(),
            store_platform,
            has_shopify_store: is_shopify,
            shopify_domain: if is_shopify {
                store_domain.clone()
            } else {
                String::new()
            },
            store_domain,
        })
    }
}

impl core::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("company_name", &self.company_name)
            .field("store_platform", &self.store_platform)
            .field("store_domain", &self.store_domain)
            .finish_non_exhaustive()
    }
}

/// Response of login and register.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl core::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /accounts/onboarding/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnboardingUpdate {
    pub stage: OnboardingStage,
}

/// Body of `POST /accounts/walkthrough/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WalkthroughUpdate {
    pub completed: bool,
}
