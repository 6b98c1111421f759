//! In-memory operator session: bearer token, cached profile, feature flags.

use returnshield_core::DomainError;
use serde::{Deserialize, Serialize};

use crate::flags::FeatureFlags;
use crate::user::UserProfile;

/// Opaque API token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::validation("token must not be empty"));
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Token {}", self.0)
    }
}

impl core::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<AuthToken>,
    user: Option<UserProfile>,
    flags: FeatureFlags,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Some(token),
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn flags(&self) -> &FeatureFlags {
        &self.flags
    }

    /// A profile has been loaded for the current token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn is_feature_enabled(&self, name: &str) -> bool {
        self.flags.is_enabled(name)
    }

    /// Token for an authenticated call, or the "must be signed in" error.
    pub fn require_token(&self, action: &str) -> Result<&AuthToken, DomainError> {
        self.token
            .as_ref()
            .ok_or_else(|| DomainError::unauthorized(format!("You must be signed in to {action}.")))
    }

    /// Replace the token. The cached profile and flags belonged to the old one.
    pub fn sign_in(&mut self, token: AuthToken) {
        self.token = Some(token);
        self.user = None;
        self.flags = FeatureFlags::empty();
    }

    pub fn set_profile(&mut self, user: UserProfile) {
        self.user = Some(user);
    }

    pub fn set_flags(&mut self, flags: FeatureFlags) {
        self.flags = flags;
    }

    pub fn clear(&mut self) {
        if self.token.is_some() {
            tracing::info!("session cleared");
        }
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use returnshield_core::UserId;

    fn profile() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "merchant",
            "email": "m@shop.co",
            "first_name": "Ada",
            "last_name": "Shop"
        }))
        .unwrap()
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("abc123").unwrap();
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert_eq!(token.header_value(), "Token abc123");
        assert!(AuthToken::new("  ").is_err());
    }

    #[test]
    fn require_token_names_the_action() {
        let session = Session::anonymous();
        let err = session.require_token("update onboarding progress").unwrap_err();
        assert_eq!(
            err,
            DomainError::Unauthorized(
                "You must be signed in to update onboarding progress.".to_string()
            )
        );
    }

    #[test]
    fn sign_in_drops_stale_profile_and_clear_resets_everything() {
        let mut session = Session::with_token(AuthToken::new("one").unwrap());
        session.set_profile(profile());
        session.set_flags(FeatureFlags::new(["vip_hub"]));
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().id, UserId::new(1));
        assert_eq!(session.user().unwrap().display_name(), "Ada Shop");

        session.sign_in(AuthToken::new("two").unwrap());
        assert!(!session.is_authenticated());
        assert!(!session.is_feature_enabled("vip_hub"));

        session.clear();
        assert_eq!(session, Session::anonymous());
    }
}
