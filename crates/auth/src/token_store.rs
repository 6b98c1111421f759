//! Persistence seam for the bearer token.

use std::sync::Mutex;

use thiserror::Error;

use crate::session::AuthToken;

/// Fixed key the token is stored under.
pub const TOKEN_STORAGE_KEY: &str = "returnshield_token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("token store lock poisoned")]
    Poisoned,
}

/// Where the session token survives between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<AuthToken>, TokenStoreError>;

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError>;

    fn clear(&self) -> Result<(), TokenStoreError>;
}

impl<S> TokenStore for std::sync::Arc<S>
where
    S: TokenStore + ?Sized,
{
    fn load(&self) -> Result<Option<AuthToken>, TokenStoreError> {
        (**self).load()
    }

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        (**self).clear()
    }
}

/// Process-local store for tests and one-shot commands.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<AuthToken>, TokenStoreError> {
        let guard = self.token.lock().map_err(|_| TokenStoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
        let mut guard = self.token.lock().map_err(|_| TokenStoreError::Poisoned)?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut guard = self.token.lock().map_err(|_| TokenStoreError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}
