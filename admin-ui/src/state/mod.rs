//! State Management
//!
//! Application-wide reactive state and the browser session store.

pub mod global;
pub mod storage;

pub use global::{expect_state, provide_app_state, AppState};
pub use storage::LocalStorageSessionStore;
