//! `returnshield-auth`: operator identity on the client side.
//!
//! Session issuance and flag resolution happen on the backend; this crate only
//! models what the client caches and sends. No HTTP here.

pub mod credentials;
pub mod flags;
pub mod session;
pub mod token_store;
pub mod user;

pub use credentials::{
    LOGIN_FALLBACK_MESSAGE, LoginRequest, OnboardingUpdate, REGISTER_FALLBACK_MESSAGE,
    RegisterRequest, TokenResponse, WalkthroughUpdate,
};
pub use flags::FeatureFlags;
pub use session::{AuthToken, Session};
pub use token_store::{InMemoryTokenStore, TOKEN_STORAGE_KEY, TokenStore, TokenStoreError};
pub use user::{OnboardingStage, StorePlatform, SubscriptionTier, UserProfile};
