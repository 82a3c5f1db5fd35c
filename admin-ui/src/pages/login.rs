//! Login Page
//!
//! Email/password sign-in. On success the session is stored and the user
//! lands on the dashboard.

use leptos::*;
use leptos_router::*;
use voiceagent_admin::views::LoginView;
use voiceagent_admin::{Notice, ViewError};

use super::{page_scope, Field, BUTTON_CLASS};
use crate::state::expect_state;

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let state = expect_state();
    let navigate = use_navigate();
    let scope = page_scope();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);
    let failure = create_rw_signal(None::<String>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        submitting.set(true);
        failure.set(None);

        let mut login = LoginView::new(state.client.clone());
        login.email = email.get_untracked();
        login.password = password.get_untracked();

        let (state, navigate, scope) = (state.clone(), navigate.clone(), scope.clone());
        spawn_local(async move {
            match scope.run(login.submit()).await.and_then(|outcome| outcome) {
                Ok(next) => {
                    state.signed_in();
                    navigate(next.path(), Default::default());
                }
                Err(ViewError::Cancelled) => return,
                Err(e) => failure.set(Notice::from_error(&e).map(|n| n.message)),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen">
            <form
                on:submit=submit
                class="bg-gray-800 rounded-xl p-8 w-full max-w-md space-y-6"
            >
                <div>
                    <h1 class="text-3xl font-bold">"Voice Agent Admin"</h1>
                    <p class="text-gray-400 mt-1">"Sign in to manage your business"</p>
                </div>

                <Field label="Email" value=email input_type="email" />
                <Field label="Password" value=password input_type="password" />

                {move || failure.get().map(|message| view! {
                    <p class="text-red-400 text-sm">{message}</p>
                })}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class=format!("w-full {BUTTON_CLASS}")
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </div>
    }
}
