//! Settings Page
//!
//! Business profile editing, plus the backend this browser talks to.

use leptos::*;
use voiceagent_admin::views::BusinessForm;
use voiceagent_admin::ViewError;

use super::{fetch, page_scope, Field, TextArea, BUTTON_CLASS, INPUT_CLASS};
use crate::api;
use crate::state::expect_state;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"What your voice agent tells callers about you"</p>
            </div>

            <BusinessProfile />

            <ApiConnection />
        </div>
    }
}

/// Business profile form. Saving sends only the fields that changed.
#[component]
fn BusinessProfile() -> impl IntoView {
    let state = expect_state();
    let scope = page_scope();

    let name = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let timezone = create_rw_signal(String::new());
    let location = create_rw_signal(String::new());
    let policies = create_rw_signal(String::new());
    // Last state known to be on the server
    let baseline = create_rw_signal(BusinessForm::default());
    let saving = create_rw_signal(false);

    let seed = move |form: BusinessForm| {
        name.set(form.name.clone());
        phone.set(form.phone.clone());
        timezone.set(form.timezone.clone());
        location.set(form.location.clone());
        policies.set(form.policies.clone());
        baseline.set(form);
    };

    let current = move || BusinessForm {
        name: name.get_untracked(),
        phone: phone.get_untracked(),
        timezone: timezone.get_untracked(),
        location: location.get_untracked(),
        policies: policies.get_untracked(),
    };

    if let Ok(business_id) = state.business_id() {
        let (state, scope) = (state.clone(), scope.clone());
        spawn_local(async move {
            let api = state.client.business(&business_id);
            match fetch(&scope, api.get()).await {
                Ok(business) => seed(BusinessForm::from(&business)),
                Err(ViewError::Cancelled) => {}
                Err(e) => state.report(&e),
            }
        });
    }

    let save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = current();
        if let Err(e) = form.validate() {
            state.report(&e.into());
            return;
        }
        let business_id = match state.business_id() {
            Ok(id) => id,
            Err(e) => {
                state.report(&e);
                return;
            }
        };

        let update = form.changes_from(&baseline.get_untracked());
        saving.set(true);
        let (state, scope) = (state.clone(), scope.clone());
        spawn_local(async move {
            if !update.is_empty() {
                let api = state.client.business(&business_id);
                match fetch(&scope, api.update(&update)).await {
                    Ok(business) => seed(BusinessForm::from(&business)),
                    Err(ViewError::Cancelled) => return,
                    Err(e) => {
                        state.report(&e);
                        saving.set(false);
                        return;
                    }
                }
            }
            state.show_saved();
            saving.set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Business Profile"</h2>

            <form on:submit=save class="space-y-4">
                <Field label="Business Name" value=name />
                <Field label="Phone" value=phone input_type="tel" />
                <Field label="Timezone" value=timezone />
                <Field label="Location" value=location />
                <TextArea label="Policies" value=policies />

                <button type="submit" disabled=move || saving.get() class=BUTTON_CLASS>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
        </section>
    }
}

/// Backend URL for this browser
#[component]
fn ApiConnection() -> impl IntoView {
    let state = expect_state();
    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let connected_to = format!("Currently connected to {}", state.client.base_url());

    let save_url = move |_| {
        api::set_api_base(&api_url.get_untracked());
        state.show_success("API URL saved. Reload the page to use it.");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <label class="block text-sm text-gray-400 mb-2">"Backend URL"</label>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                    class=INPUT_CLASS
                />
                <button on:click=save_url class=BUTTON_CLASS>
                    "Save"
                </button>
            </div>
            <p class="text-sm text-gray-400 mt-2">
                {connected_to}
            </p>
        </section>
    }
}
