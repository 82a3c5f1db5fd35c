//! Pages
//!
//! Top-level page components for each route.
//!
//! Pages fetch on mount and after every write. Their requests run inside a
//! [`ViewScope`] that is cancelled when the page unmounts, so nothing a
//! departed page asked for ever lands in its signals.

pub mod booking_rules;
pub mod call_logs;
pub mod dashboard;
pub mod knowledge_base;
pub mod login;
pub mod services;
pub mod settings;

pub use booking_rules::BookingRules;
pub use call_logs::CallLogs;
pub use dashboard::Dashboard;
pub use knowledge_base::KnowledgeBase;
pub use login::Login;
pub use services::Services;
pub use settings::Settings;

use std::future::Future;

use leptos::*;
use voiceagent_admin::{ApiResult, ViewError, ViewResult, ViewScope};

/// Scope cancelled when the calling component is cleaned up
pub(crate) fn page_scope() -> ViewScope {
    let scope = ViewScope::new();
    let teardown = scope.clone();
    on_cleanup(move || teardown.cancel());
    scope
}

/// Run an API request inside `scope`
pub(crate) async fn fetch<T>(
    scope: &ViewScope,
    request: impl Future<Output = ApiResult<T>>,
) -> ViewResult<T> {
    scope.run(request).await?.map_err(ViewError::from)
}

/// Shared input styling
pub(crate) const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-3 \
     border border-gray-600 focus:border-primary-500 focus:outline-none";

pub(crate) const BUTTON_CLASS: &str = "px-4 py-3 bg-primary-600 hover:bg-primary-700 \
     disabled:bg-gray-700 rounded-lg font-medium transition-colors";

/// Labelled text input bound to a string signal
#[component]
pub(crate) fn Field(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")]
    input_type: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class=INPUT_CLASS
            />
        </div>
    }
}

/// Labelled textarea bound to a string signal
#[component]
pub(crate) fn TextArea(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = 4)]
    rows: u32,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <textarea
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class=INPUT_CLASS
            />
        </div>
    }
}
