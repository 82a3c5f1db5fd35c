//! App Root Component
//!
//! Global state, the routes, and the guard that keeps signed-out users on
//! the login page.

use leptos::*;
use leptos_router::*;
use voiceagent_admin::{evaluate, Route as Page, RouteDecision};

use crate::components::{Nav, Toast};
use crate::pages::{BookingRules, CallLogs, Dashboard, KnowledgeBase, Login, Services, Settings};
use crate::state::{expect_state, provide_app_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    if let Err(e) = provide_app_state() {
        return view! { <StartupError message=e.to_string() /> }.into_view();
    }

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/" view=|| view! { <Guarded page=Page::Dashboard><Dashboard /></Guarded> } />
                    <Route path="/settings" view=|| view! { <Guarded page=Page::Settings><Settings /></Guarded> } />
                    <Route path="/knowledge-base" view=|| view! { <Guarded page=Page::KnowledgeBase><KnowledgeBase /></Guarded> } />
                    <Route path="/services" view=|| view! { <Guarded page=Page::Services><Services /></Guarded> } />
                    <Route path="/booking-rules" view=|| view! { <Guarded page=Page::BookingRules><BookingRules /></Guarded> } />
                    <Route path="/call-logs" view=|| view! { <Guarded page=Page::CallLogs><CallLogs /></Guarded> } />
                    <Route path="/*any" view=NotFound />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
    .into_view()
}

/// Renders `children` inside the page layout when the session allows it,
/// otherwise redirects.
///
/// The decision follows the `authenticated` signal, so ending the session
/// while a page is open bounces straight to login.
#[component]
fn Guarded(page: Page, children: ChildrenFn) -> impl IntoView {
    let state = expect_state();

    move || match evaluate(state.authenticated.get(), page) {
        RouteDecision::Allow(_) => view! { <Layout>{children()}</Layout> }.into_view(),
        RouteDecision::RedirectTo(target) => view! { <Redirect path=target.path() /> }.into_view(),
    }
}

/// Navigation bar above the page content
#[component]
fn Layout(children: Children) -> impl IntoView {
    view! {
        <Nav />
        <main class="flex-1 container mx-auto px-4 py-8 pb-24">
            {children()}
        </main>
        <Footer />
    }
}

/// Footer showing who is signed in and until when
#[component]
fn Footer() -> impl IntoView {
    let state = expect_state();

    let account = move || {
        // Re-read the claims whenever the session comes or goes
        let _ = state.authenticated.get();
        let claims = state.client.session().get().and_then(|s| s.claims());
        let Some(claims) = claims else {
            return "Not signed in".to_string();
        };

        let who = claims.sub.clone().unwrap_or_else(|| claims.business_id.clone());
        match claims.expires_at() {
            Some(at) => format!(
                "{who} · session until {}",
                at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
            ),
            None => who,
        }
    };

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto text-sm text-gray-400">{account}</div>
        </footer>
    }
}

/// Shown when the API client cannot be built at all
#[component]
fn StartupError(message: String) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-red-400 flex items-center justify-center">
            <p>{format!("Voice Agent Admin failed to start: {message}")}</p>
        </div>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
