//! Call Logs Page
//!
//! Read-only list of the calls the voice agent handled.

use leptos::*;
use voiceagent_admin::views::CallLogRow;
use voiceagent_admin::ViewError;

use super::{fetch, page_scope};
use crate::components::ListSkeleton;
use crate::state::expect_state;

/// Call logs page component
#[component]
pub fn CallLogs() -> impl IntoView {
    let state = expect_state();
    let scope = page_scope();

    let rows = create_rw_signal(None::<Vec<CallLogRow>>);

    match state.business_id() {
        Ok(business_id) => spawn_local(async move {
            let api = state.client.business(&business_id);
            match fetch(&scope, api.call_logs()).await {
                Ok(logs) => rows.set(Some(logs.iter().map(CallLogRow::from).collect())),
                Err(ViewError::Cancelled) => {}
                Err(e) => {
                    state.report(&e);
                    rows.set(Some(Vec::new()));
                }
            }
        }),
        Err(_) => rows.set(Some(Vec::new())),
    }

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Call Logs"</h1>
                <p class="text-gray-400 mt-1">"Every call your voice agent answered"</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                {move || match rows.get() {
                    None => view! { <ListSkeleton rows=5 /> }.into_view(),
                    Some(list) if list.is_empty() => view! {
                        <p class="text-gray-400">"No calls yet."</p>
                    }.into_view(),
                    Some(list) => view! {
                        <table class="w-full text-left">
                            <thead class="text-sm text-gray-400">
                                <tr>
                                    <th class="py-2">"Caller"</th>
                                    <th class="py-2">"Intent"</th>
                                    <th class="py-2">"Outcome"</th>
                                    <th class="py-2">"Duration"</th>
                                    <th class="py-2">"Time"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {list.into_iter().map(|row| view! {
                                    <tr class="border-t border-gray-700">
                                        <td class="py-3 pr-4">{row.caller}</td>
                                        <td class="py-3 pr-4">{row.intent}</td>
                                        <td class="py-3 pr-4">{row.outcome}</td>
                                        <td class="py-3 pr-4">{row.duration}</td>
                                        <td class="py-3 text-sm text-gray-400">{row.time}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view(),
                }}
            </section>
        </div>
    }
}
