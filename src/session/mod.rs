//! Session Management
//!
//! The session is the client-held proof of authentication plus the business
//! it grants access to.
//!
//! ## Architecture
//!
//! - **Session**: token + business id, as persisted
//! - **TokenClaims**: payload decoded from the access token
//! - **SessionStore**: durable storage seam (file, memory, browser)
//! - **SessionContext**: the injectable handle the API client, guard and
//!   views share; `init` at start-up, `set` on login, `clear` on logout

mod store;
mod token;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use token::{TokenClaims, TokenError};

#[cfg(test)]
pub(crate) use token::encode_test_token;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Authenticated session as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub business_id: String,
}

impl Session {
    pub fn new(token: impl Into<String>, business_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            business_id: business_id.into(),
        }
    }

    /// Build a session from an access token, taking the business id from
    /// its payload
    pub fn from_token(token: impl Into<String>) -> Result<Self, TokenError> {
        let token = token.into();
        let claims = TokenClaims::decode(&token)?;
        Ok(Self::new(token, claims.business_id))
    }

    /// Claims of the stored token, when it still decodes
    pub fn claims(&self) -> Option<TokenClaims> {
        TokenClaims::decode(&self.token).ok()
    }
}

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session data is corrupt: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid access token: {0}")]
    InvalidToken(#[from] TokenError),
}

/// Shared, injectable handle on the current session
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// Create a context over `store`; nothing is loaded until [`init`](Self::init)
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Load the persisted session, returning whether one was found
    pub fn init(&self) -> Result<bool, SessionError> {
        let loaded = self.store.load()?;
        let found = loaded.is_some();
        *self.write() = loaded;
        tracing::debug!(found, "Session context initialized");
        Ok(found)
    }

    /// Like [`init`](Self::init), but a session that cannot be read is
    /// removed from storage and the context starts logged out.
    pub fn init_or_discard(&self) -> bool {
        match self.init() {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                if let Err(e) = self.clear() {
                    tracing::warn!(error = %e, "Failed to remove unreadable session");
                }
                false
            }
        }
    }

    /// Persist and activate a session
    pub fn set(
        &self,
        token: impl Into<String>,
        business_id: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.establish(Session::new(token, business_id))
    }

    /// Persist and activate an already-built session
    pub fn establish(&self, session: Session) -> Result<(), SessionError> {
        self.store.save(&session)?;
        tracing::info!(business_id = %session.business_id, "Session established");
        *self.write() = Some(session);
        Ok(())
    }

    /// Current session, if any
    pub fn get(&self) -> Option<Session> {
        self.read().clone()
    }

    /// Forget the session both in memory and in storage
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.write() = None;
        self.store.clear()?;
        tracing::info!("Session cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn business_id(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.business_id.clone())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("business_id", &self.business_id())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_token_extracts_business() {
        let token = encode_test_token(&json!({ "sub": "u1", "business_id": "biz-9" }));
        let session = Session::from_token(token.clone()).unwrap();
        assert_eq!(session.token, token);
        assert_eq!(session.business_id, "biz-9");
        assert_eq!(session.claims().unwrap().sub.as_deref(), Some("u1"));
    }

    #[test]
    fn test_context_lifecycle() {
        let store = Arc::new(MemorySessionStore::default());
        let ctx = SessionContext::new(store.clone());

        assert!(!ctx.init().unwrap());
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.token(), None);

        ctx.set("tok", "biz-1").unwrap();
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.business_id().as_deref(), Some("biz-1"));
        assert_eq!(store.load().unwrap(), Some(Session::new("tok", "biz-1")));

        ctx.clear().unwrap();
        assert!(!ctx.is_authenticated());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_init_picks_up_persisted_session() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new("t", "b")));
        let ctx = SessionContext::new(store);

        // Nothing is visible before init
        assert!(!ctx.is_authenticated());
        assert!(ctx.init().unwrap());
        assert_eq!(ctx.get(), Some(Session::new("t", "b")));
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let ctx = SessionContext::new(Arc::new(FileSessionStore::new(&path)));

        assert!(ctx.init().is_err());
        assert!(!ctx.init_or_discard());
        assert!(!ctx.is_authenticated());
        assert!(!path.exists());

        ctx.set("tok", "biz-1").unwrap();
        assert!(ctx.init().unwrap());
        assert_eq!(ctx.business_id().as_deref(), Some("biz-1"));
    }

    #[test]
    fn test_clones_share_state() {
        let ctx = SessionContext::new(Arc::new(MemorySessionStore::default()));
        let other = ctx.clone();
        ctx.set("tok", "biz").unwrap();
        assert_eq!(other.token().as_deref(), Some("tok"));
    }
}
