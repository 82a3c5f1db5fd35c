//! Toast Notification Component
//!
//! The page-independent banner: "Saved!" acknowledgments and error
//! messages, each dismissable by click.

use leptos::*;
use voiceagent_admin::NoticeKind;

use crate::state::expect_state;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = expect_state();
    let (success, error) = (state.success, state.error);

    view! {
        <div class="fixed bottom-16 right-4 z-50 space-y-2">
            {move || success.get().map(|msg| view! {
                <ToastMessage message=msg kind=NoticeKind::Success source=success />
            })}
            {move || error.get().map(|msg| view! {
                <ToastMessage message=msg kind=NoticeKind::Error source=error />
            })}
        </div>
    }
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    kind: NoticeKind,
    /// Signal the message came from; cleared on dismiss
    source: RwSignal<Option<String>>,
) -> impl IntoView {
    let (icon, bg_class) = match kind {
        NoticeKind::Success => ("✓", "bg-green-600"),
        NoticeKind::Error => ("✕", "bg-red-600"),
    };

    view! {
        <div
            role="status"
            on:click=move |_| source.set(None)
            class=format!(
                "flex items-center space-x-3 {bg_class} text-white px-4 py-3 rounded-lg \
                 shadow-lg cursor-pointer transition-all duration-300 ease-out"
            )
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
