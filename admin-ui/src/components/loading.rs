//! Loading placeholders shown while a page's first fetch is in flight.

use leptos::*;

/// Centered spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Pulsing placeholder rows for a table that has not loaded yet
#[component]
pub fn ListSkeleton(
    #[prop(default = 3)]
    rows: usize,
) -> impl IntoView {
    view! {
        <div class="divide-y divide-gray-700 animate-pulse" aria-busy="true">
            {(0..rows).map(|_| view! {
                <div class="py-3 flex space-x-4">
                    <div class="h-4 bg-gray-700 rounded w-1/4" />
                    <div class="h-4 bg-gray-700 rounded flex-1" />
                </div>
            }).collect_view()}
        </div>
    }
}
