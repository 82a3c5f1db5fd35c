//! Backend Connection
//!
//! Where the backend lives and how the shared API client is built.

use voiceagent_admin::{ApiClient, ApiConfig, ApiResult, SessionContext};

/// Backend used until another one is saved
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

const API_BASE_KEY: &str = "voiceagent_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Backend base URL from local storage, or the default
pub fn get_api_base() -> String {
    local_storage()
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Remember a backend base URL; it applies from the next page load
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(API_BASE_KEY, url.trim()).is_err() {
            web_sys::console::warn_1(&"Could not persist the API URL".into());
        }
    }
}

/// API client bound to the configured backend and `session`
pub fn build_client(session: SessionContext) -> ApiResult<ApiClient> {
    let config = ApiConfig {
        base_url: get_api_base(),
        ..Default::default()
    };
    ApiClient::new(&config, session)
}
