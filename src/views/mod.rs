//! Views
//!
//! One controller per page of the admin client. Every view follows the same
//! lifecycle:
//!
//! 1. `mount` fetches its record or collection, when a business is known
//! 2. the form or table is rendered from the latest fetched state
//! 3. user actions issue the create/update/delete call
//! 4. forms acknowledge a save for two seconds; collections re-fetch
//!    everything after a mutation (load-after-write)
//!
//! Requests run inside the view's [`ViewScope`] so tearing the view down
//! cancels them. Failures are recorded as the view's [`Notice`].

pub mod booking_rules;
pub mod business_settings;
pub mod call_logs;
pub mod dashboard;
pub mod forms;
pub mod knowledge_base;
pub mod login;
pub mod notice;
pub mod scope;
pub mod services;
pub mod table;

pub use booking_rules::{BookingRulesForm, BookingRulesView};
pub use business_settings::{BusinessForm, BusinessSettingsView};
pub use call_logs::{CallLogRow, CallLogsView};
pub use dashboard::{load_stats, DashboardStats, DashboardView};
pub use forms::FormError;
pub use knowledge_base::{DocDraft, KnowledgeBaseView};
pub use login::LoginView;
pub use notice::{Notice, NoticeKind};
pub use scope::ViewScope;
pub use services::{ServiceDraft, ServicesView};

use async_trait::async_trait;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::router::Route;
use crate::session::SessionError;

/// View operation errors
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No business is associated with this session")]
    NoBusiness,

    #[error("Operation cancelled")]
    Cancelled,
}

impl ViewError {
    /// Backend rejected the session's token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ViewError::Api(ApiError::Unauthorized))
    }
}

/// Business the current session grants access to
pub(crate) fn require_business(client: &ApiClient) -> ViewResult<String> {
    client.session().business_id().ok_or(ViewError::NoBusiness)
}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Behaviour shared by every page
#[async_trait(?Send)]
pub trait View {
    /// Route this view renders at
    fn route(&self) -> Route;

    /// First-render fetch
    async fn mount(&mut self) -> ViewResult<()>;

    /// Text rendering of the page body
    fn render(&self) -> String;

    /// Machine-readable state of the page
    fn snapshot(&self) -> serde_json::Value;

    /// Outcome of the last operation
    fn notice(&self) -> Option<&Notice>;

    fn scope(&self) -> &ViewScope;

    /// Cancel everything the view still has in flight
    fn teardown(&self) {
        self.scope().cancel();
    }
}

/// Heading, visible notice and body, in that order
pub(crate) fn compose(title: &str, notice: Option<&Notice>, body: &str) -> String {
    let mut out = format!("{title}\n{}\n", "=".repeat(title.chars().count()));
    if let Some(notice) = notice.filter(|n| n.is_visible()) {
        let marker = match notice.kind {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✕",
        };
        out.push_str(&format!("{marker} {}\n", notice.message));
    }
    out.push('\n');
    out.push_str(body);
    out
}
