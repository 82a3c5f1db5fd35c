//! Application Shell
//!
//! Owns the active view and performs navigation: resolve the path, ask the
//! guard, tear down the old view, mount the new one. The shell is also where
//! a token rejected by the backend ends the session.

use crate::api::ApiClient;
use crate::router::{evaluate, Route, RouteDecision};
use crate::session::SessionContext;
use crate::views::{
    BookingRulesView, BusinessSettingsView, CallLogsView, DashboardView, KnowledgeBaseView,
    LoginView, Notice, ServicesView, View, ViewResult,
};

const BRAND: &str = "Voice Agent Admin";

/// The mounted view
#[derive(Debug)]
pub enum ActiveView {
    Login(LoginView),
    Dashboard(DashboardView),
    Settings(BusinessSettingsView),
    KnowledgeBase(KnowledgeBaseView),
    Services(ServicesView),
    BookingRules(BookingRulesView),
    CallLogs(CallLogsView),
}

impl ActiveView {
    fn for_route(route: Route, client: ApiClient) -> Self {
        match route {
            Route::Login => ActiveView::Login(LoginView::new(client)),
            Route::Dashboard => ActiveView::Dashboard(DashboardView::new(client)),
            Route::Settings => ActiveView::Settings(BusinessSettingsView::new(client)),
            Route::KnowledgeBase => ActiveView::KnowledgeBase(KnowledgeBaseView::new(client)),
            Route::Services => ActiveView::Services(ServicesView::new(client)),
            Route::BookingRules => ActiveView::BookingRules(BookingRulesView::new(client)),
            Route::CallLogs => ActiveView::CallLogs(CallLogsView::new(client)),
        }
    }

    pub fn as_view(&self) -> &dyn View {
        match self {
            ActiveView::Login(v) => v,
            ActiveView::Dashboard(v) => v,
            ActiveView::Settings(v) => v,
            ActiveView::KnowledgeBase(v) => v,
            ActiveView::Services(v) => v,
            ActiveView::BookingRules(v) => v,
            ActiveView::CallLogs(v) => v,
        }
    }

    pub fn as_view_mut(&mut self) -> &mut dyn View {
        match self {
            ActiveView::Login(v) => v,
            ActiveView::Dashboard(v) => v,
            ActiveView::Settings(v) => v,
            ActiveView::KnowledgeBase(v) => v,
            ActiveView::Services(v) => v,
            ActiveView::BookingRules(v) => v,
            ActiveView::CallLogs(v) => v,
        }
    }

    pub fn route(&self) -> Route {
        self.as_view().route()
    }
}

/// How a navigation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The requested route rendered
    Rendered(Route),
    /// Something else rendered instead
    Redirected { from: Route, to: Route },
    /// No route matches the path
    NotFound(String),
}

impl Navigation {
    pub fn route(&self) -> Option<Route> {
        match self {
            Navigation::Rendered(route) => Some(*route),
            Navigation::Redirected { to, .. } => Some(*to),
            Navigation::NotFound(_) => None,
        }
    }
}

pub struct Shell {
    client: ApiClient,
    active: Option<ActiveView>,
    not_found: Option<String>,
}

impl Shell {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            active: None,
            not_found: None,
        }
    }

    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn active_view(&self) -> Option<&ActiveView> {
        self.active.as_ref()
    }

    pub fn active_view_mut(&mut self) -> Option<&mut ActiveView> {
        self.active.as_mut()
    }

    /// Route currently rendered, `None` on the not-found page
    pub fn current_route(&self) -> Option<Route> {
        self.active.as_ref().map(ActiveView::route)
    }

    /// Notice of the active view
    pub fn notice(&self) -> Option<&Notice> {
        self.active.as_ref().and_then(|v| v.as_view().notice())
    }

    /// Go to `path`, honouring the guard
    pub async fn navigate(&mut self, path: &str) -> ViewResult<Navigation> {
        let Some(requested) = Route::from_path(path) else {
            tracing::info!(path, "No page at path");
            self.teardown();
            self.not_found = Some(path.to_string());
            return Ok(Navigation::NotFound(path.to_string()));
        };

        let decision = evaluate(self.session().is_authenticated(), requested);
        match decision {
            RouteDecision::Allow(route) => self.enter(route).await,
            RouteDecision::RedirectTo(target) => {
                tracing::info!(from = %requested, to = %target, "Not signed in, redirecting");
                self.enter(target).await?;
                Ok(Navigation::Redirected {
                    from: requested,
                    to: target,
                })
            }
        }
    }

    /// End the session and land on the login page
    pub async fn logout(&mut self) -> ViewResult<Route> {
        self.session().clear()?;
        tracing::info!("Logged out");
        self.enter(Route::Login).await?;
        Ok(Route::Login)
    }

    /// Chrome around the active view
    pub fn render(&self) -> String {
        if let Some(path) = &self.not_found {
            return format!("{BRAND}\n\n404 - Page not found: {path}\n");
        }

        let Some(active) = &self.active else {
            return format!("{BRAND}\n");
        };
        let view = active.as_view();

        // Login renders bare, without navigation
        if view.route() == Route::Login {
            return format!("{BRAND}\n\n{}", view.render());
        }

        let nav = Route::NAV
            .iter()
            .map(|route| {
                if *route == view.route() {
                    format!("[{}]", route.label())
                } else {
                    route.label().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        format!(
            "{BRAND}\n{nav}  | Logout\n{}\n\n{}",
            "-".repeat(BRAND.len()),
            view.render()
        )
    }

    async fn enter(&mut self, route: Route) -> ViewResult<Navigation> {
        self.teardown();

        let mut view = ActiveView::for_route(route, self.client.clone());
        let mounted = view.as_view_mut().mount().await;
        self.active = Some(view);
        tracing::info!(%route, "View mounted");

        match mounted {
            Err(e) if e.is_unauthorized() && route.is_protected() => {
                tracing::warn!(%route, "Token rejected by backend, ending session");
                self.session().clear()?;
                self.teardown();
                self.active = Some(ActiveView::Login(LoginView::expired(self.client.clone())));
                Ok(Navigation::Redirected {
                    from: route,
                    to: Route::Login,
                })
            }
            _ => Ok(Navigation::Rendered(route)),
        }
    }

    fn teardown(&mut self) {
        self.not_found = None;
        if let Some(view) = self.active.take() {
            view.as_view().teardown();
        }
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("route", &self.current_route())
            .field("not_found", &self.not_found)
            .finish()
    }
}
