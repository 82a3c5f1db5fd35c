//! Browser Session Store
//!
//! Persists the session in `localStorage` as two plain entries, `token` and
//! `businessId`, so it survives reloads and is shared across tabs.

use voiceagent_admin::{Session, SessionError, SessionStore};

const TOKEN_KEY: &str = "token";
const BUSINESS_KEY: &str = "businessId";

/// [`SessionStore`] backed by `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageSessionStore;

fn storage() -> Result<web_sys::Storage, SessionError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or_else(|| unavailable("localStorage is not available"))
}

fn unavailable(message: &str) -> SessionError {
    SessionError::Io(std::io::Error::other(message.to_string()))
}

impl SessionStore for LocalStorageSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let storage = storage()?;
        let read = |key: &str| {
            storage
                .get_item(key)
                .map_err(|_| unavailable("localStorage read failed"))
        };

        // Half a session is no session
        match (read(TOKEN_KEY)?, read(BUSINESS_KEY)?) {
            (Some(token), Some(business_id)) if !token.is_empty() && !business_id.is_empty() => {
                Ok(Some(Session::new(token, business_id)))
            }
            _ => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let storage = storage()?;
        storage
            .set_item(TOKEN_KEY, &session.token)
            .and_then(|()| storage.set_item(BUSINESS_KEY, &session.business_id))
            .map_err(|_| unavailable("localStorage write failed"))
    }

    fn clear(&self) -> Result<(), SessionError> {
        let storage = storage()?;
        storage
            .remove_item(TOKEN_KEY)
            .and_then(|()| storage.remove_item(BUSINESS_KEY))
            .map_err(|_| unavailable("localStorage write failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_through_local_storage() {
        let store = LocalStorageSessionStore;
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        let session = Session::new("tok", "biz-1");
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        let raw = storage().unwrap();
        assert_eq!(raw.get_item("businessId").unwrap().as_deref(), Some("biz-1"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_token_without_business_is_logged_out() {
        let store = LocalStorageSessionStore;
        store.clear().unwrap();
        storage().unwrap().set_item("token", "tok").unwrap();

        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }
}
