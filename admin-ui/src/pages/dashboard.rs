//! Dashboard Page
//!
//! Headline totals for the business: calls, bookings and services.

use leptos::*;
use voiceagent_admin::views::{load_stats, DashboardStats};
use voiceagent_admin::ViewError;

use super::{fetch, page_scope};
use crate::components::Loading;
use crate::state::expect_state;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_state();
    let scope = page_scope();

    let stats = create_rw_signal(None::<DashboardStats>);

    // Fetch once on mount; no business means nothing to count
    if let Ok(business_id) = state.business_id() {
        let state = state.clone();
        spawn_local(async move {
            let api = state.client.business(&business_id);
            match fetch(&scope, load_stats(&api)).await {
                Ok(loaded) => stats.set(Some(loaded)),
                Err(ViewError::Cancelled) => {}
                Err(e) => {
                    state.report(&e);
                    stats.set(Some(DashboardStats::default()));
                }
            }
        });
    } else {
        stats.set(Some(DashboardStats::default()));
    }

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"How your voice agent is doing"</p>
            </div>

            {move || match stats.get() {
                None => view! { <Loading /> }.into_view(),
                Some(totals) => view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <StatCard label="Total Calls" value=totals.total_calls />
                        <StatCard label="Total Bookings" value=totals.total_bookings />
                        <StatCard label="Total Services" value=totals.total_services />
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: usize) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <p class="text-sm text-gray-400">{label}</p>
            <p class="text-4xl font-bold mt-2">{value}</p>
        </div>
    }
}
