//! Operator account endpoints.

use reqwest::Method;
use returnshield_auth::{
    AuthToken, FeatureFlags, LoginRequest, OnboardingStage, OnboardingUpdate, RegisterRequest,
    TokenResponse, UserProfile, WalkthroughUpdate,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// `GET /feature-flags/` answers with a bare list; older deployments wrap it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagsResponse {
    List(Vec<String>),
    Wrapped { flags: Vec<String> },
}

impl From<FlagsResponse> for FeatureFlags {
    fn from(resp: FlagsResponse) -> Self {
        match resp {
            FlagsResponse::List(flags) | FlagsResponse::Wrapped { flags } => FeatureFlags::new(flags),
        }
    }
}

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.post("/accounts/login/", request, None).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        self.post("/accounts/register/", request, None).await
    }

    /// `GET /accounts/me/`.
    pub async fn me(&self, token: &AuthToken) -> Result<UserProfile, ApiError> {
        self.get("/accounts/me/", Some(token)).await
    }

    pub async fn update_onboarding(
        &self,
        stage: OnboardingStage,
        token: &AuthToken,
    ) -> Result<(), ApiError> {
        self.request(
            Method::POST,
            "/accounts/onboarding/",
            Some(&OnboardingUpdate { stage }),
            Some(token),
        )
        .await
        .map(|_| ())
    }

    pub async fn complete_walkthrough(
        &self,
        completed: bool,
        token: &AuthToken,
    ) -> Result<(), ApiError> {
        self.request(
            Method::POST,
            "/accounts/walkthrough/",
            Some(&WalkthroughUpdate { completed }),
            Some(token),
        )
        .await
        .map(|_| ())
    }

    pub async fn feature_flags(&self, token: &AuthToken) -> Result<FeatureFlags, ApiError> {
        self.get::<FlagsResponse>("/feature-flags/", Some(token))
            .await
            .map(FeatureFlags::from)
    }
}
