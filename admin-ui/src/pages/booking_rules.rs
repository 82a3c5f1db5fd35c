//! Booking Rules Page
//!
//! How far ahead callers may book and how late they may cancel. A business
//! without rules yet sees the defaults.

use leptos::*;
use voiceagent_admin::views::BookingRulesForm;
use voiceagent_admin::ViewError;

use super::{fetch, page_scope, Field, BUTTON_CLASS};
use crate::state::expect_state;

/// Booking rules page component
#[component]
pub fn BookingRules() -> impl IntoView {
    let state = expect_state();
    let scope = page_scope();

    let defaults = BookingRulesForm::default();
    let advance_notice = create_rw_signal(defaults.advance_notice_hours);
    let max_advance = create_rw_signal(defaults.max_advance_days);
    let cancellation = create_rw_signal(defaults.cancellation_hours);
    let saving = create_rw_signal(false);

    if let Ok(business_id) = state.business_id() {
        let (state, scope) = (state.clone(), scope.clone());
        spawn_local(async move {
            let api = state.client.business(&business_id);
            match fetch(&scope, api.booking_rules()).await {
                Ok(rules) => {
                    let form = BookingRulesForm::from(rules.unwrap_or_default());
                    advance_notice.set(form.advance_notice_hours);
                    max_advance.set(form.max_advance_days);
                    cancellation.set(form.cancellation_hours);
                }
                Err(ViewError::Cancelled) => {}
                Err(e) => state.report(&e),
            }
        });
    }

    let save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = BookingRulesForm {
            advance_notice_hours: advance_notice.get_untracked(),
            max_advance_days: max_advance.get_untracked(),
            cancellation_hours: cancellation.get_untracked(),
        };
        let rules = match form.parse() {
            Ok(rules) => rules,
            Err(e) => {
                state.report(&e.into());
                return;
            }
        };
        let business_id = match state.business_id() {
            Ok(id) => id,
            Err(e) => {
                state.report(&e);
                return;
            }
        };

        saving.set(true);
        let (state, scope) = (state.clone(), scope.clone());
        spawn_local(async move {
            let api = state.client.business(&business_id);
            match fetch(&scope, api.set_booking_rules(&rules)).await {
                Ok(_) => state.show_saved(),
                Err(ViewError::Cancelled) => return,
                Err(e) => state.report(&e),
            }
            saving.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Booking Rules"</h1>
                <p class="text-gray-400 mt-1">"Limits the voice agent applies when booking"</p>
            </div>

            <form on:submit=save class="bg-gray-800 rounded-xl p-6 space-y-4">
                <Field label="Advance notice (hours)" value=advance_notice input_type="number" />
                <Field label="Max advance booking (days)" value=max_advance input_type="number" />
                <Field label="Cancellation window (hours)" value=cancellation input_type="number" />

                <button type="submit" disabled=move || saving.get() class=BUTTON_CLASS>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
        </div>
    }
}
