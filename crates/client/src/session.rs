//! Session manager: token persistence, profile cache and feature flags.
//!
//! The cached [`Session`] is read-mostly and changes only after an explicit
//! API round trip. The session's [`ApiClient`] and all of its clones share the
//! state, so any call whose token is answered with `401` signs the operator
//! out locally.

use std::future::Future;
use std::sync::Arc;

use returnshield_auth::{
    AuthToken, FeatureFlags, LOGIN_FALLBACK_MESSAGE, LoginRequest, OnboardingStage,
    REGISTER_FALLBACK_MESSAGE, RegisterRequest, Session, StorePlatform, TokenStore,
    TokenStoreError, UserProfile,
};
use returnshield_core::DomainError;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Login or registration was refused; the message is ready to display.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] TokenStoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Rejected(msg) => msg.clone(),
            SessionError::Api(err) => err.user_message(),
            SessionError::Store(err) => err.to_string(),
            SessionError::Domain(DomainError::Unauthorized(msg)) => msg.clone(),
            SessionError::Domain(err) => err.to_string(),
        }
    }
}

/// Session state shared by the manager and every [`ApiClient`] it hands out.
pub(crate) struct SharedSession {
    state: RwLock<Session>,
    store: Arc<dyn TokenStore>,
}

impl core::fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSession").finish_non_exhaustive()
    }
}

impl SharedSession {
    async fn sign_out(&self) -> Result<(), TokenStoreError> {
        self.state.write().await.clear();
        self.store.clear()
    }

    /// Sign out if `rejected` is still the active token.
    ///
    /// A stale answer for a token that was already replaced leaves the newer
    /// session alone.
    pub(crate) async fn revoke(&self, rejected: &AuthToken) {
        let mut state = self.state.write().await;
        if state.token() != Some(rejected) {
            return;
        }
        state.clear();
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear the stored token");
        }
        tracing::warn!("token rejected; signed out");
    }
}

pub struct SessionManager {
    api: ApiClient,
    shared: Arc<SharedSession>,
}

impl core::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionManager")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Take over `api`. Every clone of [`SessionManager::api`] signs the
    /// session out when the backend answers `401` to its token.
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        let shared = Arc::new(SharedSession {
            state: RwLock::new(Session::anonymous()),
            store,
        });
        Self {
            api: api.with_session(shared.clone()),
            shared,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// A copy of the cached session.
    pub async fn snapshot(&self) -> Session {
        self.shared.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<AuthToken> {
        self.shared.state.read().await.token().cloned()
    }

    pub async fn user(&self) -> Option<UserProfile> {
        self.shared.state.read().await.user().cloned()
    }

    pub async fn is_feature_enabled(&self, name: &str) -> bool {
        self.shared.state.read().await.is_feature_enabled(name)
    }

    /// Pick up a persisted token and load its profile.
    ///
    /// Returns whether a profile is now cached. A stale token is discarded.
    pub async fn restore(&self) -> Result<bool, SessionError> {
        let Some(token) = self.shared.store.load()? else {
            return Ok(false);
        };
        self.shared.state.write().await.sign_in(token);
        Ok(self.refresh().await?.is_some())
    }

    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<UserProfile, SessionError> {
        let request = LoginRequest::new(username, password)?;
        let response = self
            .api
            .login(&request)
            .await
            .map_err(|e| rejection(e, LOGIN_FALLBACK_MESSAGE))?;

        self.establish(response.token, LOGIN_FALLBACK_MESSAGE).await
    }

    pub async fn register(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        company_name: impl Into<String>,
        store_platform: StorePlatform,
        store_domain: impl Into<String>,
    ) -> Result<UserProfile, SessionError> {
        let request =
            RegisterRequest::new(email, password, company_name, store_platform, store_domain)?;
        let response = self
            .api
            .register(&request)
            .await
            .map_err(|e| rejection(e, REGISTER_FALLBACK_MESSAGE))?;

        self.establish(response.token, REGISTER_FALLBACK_MESSAGE).await
    }

    async fn establish(&self, raw_token: String, fallback: &str) -> Result<UserProfile, SessionError> {
        let token = AuthToken::new(raw_token).map_err(|_| SessionError::Rejected(fallback.to_string()))?;
        self.shared.store.save(&token)?;
        self.shared.state.write().await.sign_in(token);

        match self.refresh().await? {
            Some(user) => {
                tracing::info!(user_id = %user.id, "signed in");
                Ok(user)
            }
            None => Err(SessionError::Rejected(fallback.to_string())),
        }
    }

    /// Re-fetch the profile, then the feature flags.
    ///
    /// Without a token this is a no-op returning `None`. If the profile cannot
    /// be loaded the token and profile are dropped.
    pub async fn refresh(&self) -> Result<Option<UserProfile>, SessionError> {
        let Some(token) = self.token().await else {
            return Ok(None);
        };

        let user = match self.api.me(&token).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "profile refresh failed; signing out");
                self.logout().await?;
                return Err(err.into());
            }
        };

        let flags = match self.api.feature_flags(&token).await {
            Ok(flags) => flags,
            Err(err) => {
                tracing::warn!(error = %err, "feature flags unavailable");
                FeatureFlags::empty()
            }
        };

        let mut state = self.shared.state.write().await;
        // Another task may have signed out or in while the requests were in flight.
        if state.token() != Some(&token) {
            return Ok(None);
        }
        state.set_profile(user.clone());
        state.set_flags(flags);
        Ok(Some(user))
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.shared.sign_out().await?;
        Ok(())
    }

    /// Run an authenticated call. `action` completes "You must be signed in to ...".
    ///
    /// A `401` answer has already signed the operator out when the error is
    /// returned.
    pub async fn with_token<T, F, Fut>(&self, action: &str, call: F) -> Result<T, SessionError>
    where
        F: FnOnce(ApiClient, AuthToken) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let token = self.shared.state.read().await.require_token(action)?.clone();
        Ok(call(self.api.clone(), token).await?)
    }

    pub async fn update_onboarding(
        &self,
        stage: OnboardingStage,
    ) -> Result<Option<UserProfile>, SessionError> {
        self.with_token("update onboarding progress", |api, token| async move {
            api.update_onboarding(stage, &token).await
        })
        .await?;
        self.refresh().await
    }

    pub async fn complete_walkthrough(
        &self,
        completed: bool,
    ) -> Result<Option<UserProfile>, SessionError> {
        self.with_token("update walkthrough status", |api, token| async move {
            api.complete_walkthrough(completed, &token).await
        })
        .await?;
        self.refresh().await
    }
}

fn rejection(err: ApiError, fallback: &str) -> SessionError {
    match err.detail() {
        Some(detail) => SessionError::Rejected(detail.to_string()),
        None => SessionError::Rejected(fallback.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use returnshield_auth::InMemoryTokenStore;

    fn offline_manager(store: Arc<dyn TokenStore>) -> SessionManager {
        let api = ApiClient::new(&ClientConfig::default()).unwrap();
        SessionManager::new(api, store)
    }

    #[tokio::test]
    async fn signed_out_updates_fail_locally() {
        let manager = offline_manager(Arc::new(InMemoryTokenStore::new()));

        let err = manager
            .update_onboarding(OnboardingStage::Sync)
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "You must be signed in to update onboarding progress."
        );

        let err = manager.complete_walkthrough(true).await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "You must be signed in to update walkthrough status."
        );
    }

    #[tokio::test]
    async fn restore_without_persisted_token_is_anonymous() {
        let manager = offline_manager(Arc::new(InMemoryTokenStore::new()));
        assert!(!manager.restore().await.unwrap());
        assert!(manager.snapshot().await.token().is_none());
    }

    #[tokio::test]
    async fn invalid_login_input_never_reaches_the_network() {
        let manager = offline_manager(Arc::new(InMemoryTokenStore::new()));
        let err = manager.login("", "pw").await.unwrap_err();
        assert!(matches!(err, SessionError::Domain(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn failed_restore_discards_the_stale_token() {
        let store = Arc::new(InMemoryTokenStore::with_token(AuthToken::new("stale").unwrap()));
        let manager = offline_manager(store.clone());

        // No base URL configured: the profile fetch fails, which signs out.
        assert!(manager.restore().await.is_err());
        assert!(store.load().unwrap().is_none());
        assert!(manager.token().await.is_none());
    }

    #[tokio::test]
    async fn rejection_of_a_replaced_token_keeps_the_new_session() {
        let store = Arc::new(InMemoryTokenStore::new());
        let manager = offline_manager(store.clone());
        let old = AuthToken::new("old").unwrap();
        let current = AuthToken::new("current").unwrap();
        store.save(&current).unwrap();
        manager.shared.state.write().await.sign_in(current.clone());

        manager.shared.revoke(&old).await;
        assert_eq!(manager.token().await, Some(current.clone()));
        assert_eq!(store.load().unwrap(), Some(current.clone()));

        manager.shared.revoke(&current).await;
        assert!(manager.token().await.is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn rejection_prefers_server_detail() {
        let err = ApiError::Status {
            status: 400,
            message: "Unable to log in with provided credentials.".to_string(),
            detail: Some("Unable to log in with provided credentials.".to_string()),
        };
        assert_eq!(
            rejection(err, LOGIN_FALLBACK_MESSAGE).to_string(),
            "Unable to log in with provided credentials."
        );
        assert_eq!(
            rejection(ApiError::Network("down".into()), LOGIN_FALLBACK_MESSAGE).to_string(),
            LOGIN_FALLBACK_MESSAGE
        );
    }
}
