//! Navigation Component
//!
//! Header bar with the brand, one link per page and the logout button.

use leptos::*;
use leptos_router::*;
use voiceagent_admin::Route as Page;

use crate::state::expect_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = expect_state();
    let navigate = use_navigate();

    let logout = move |_| {
        state.end_session();
        navigate(Page::Login.path(), Default::default());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"📞"</span>
                        <span class="text-xl font-bold text-white">"Voice Agent Admin"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        {Page::NAV
                            .into_iter()
                            .map(|page| view! { <NavLink page=page /> })
                            .collect_view()}
                        <button
                            on:click=logout
                            class="ml-4 px-4 py-2 rounded-lg text-gray-300 hover:text-white \
                                   hover:bg-red-700 transition-colors"
                        >
                            "Logout"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(page: Page) -> impl IntoView {
    view! {
        <A
            href=page.path()
            exact=page == Page::Dashboard
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {page.label()}
        </A>
    }
}
