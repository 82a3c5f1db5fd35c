//! Routes and Route Guard
//!
//! The navigable routes of the admin client and the guard deciding whether
//! a route may render. The guard is a pure decision; whoever asked for the
//! route carries out the redirect.

use std::fmt;

/// A navigable view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Settings,
    KnowledgeBase,
    Services,
    BookingRules,
    CallLogs,
}

impl Route {
    /// Every route, login first
    pub const ALL: [Route; 7] = [
        Route::Login,
        Route::Dashboard,
        Route::Settings,
        Route::KnowledgeBase,
        Route::Services,
        Route::BookingRules,
        Route::CallLogs,
    ];

    /// Routes shown in the navigation bar, in display order
    pub const NAV: [Route; 6] = [
        Route::Dashboard,
        Route::Settings,
        Route::KnowledgeBase,
        Route::Services,
        Route::BookingRules,
        Route::CallLogs,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Settings => "/settings",
            Route::KnowledgeBase => "/knowledge-base",
            Route::Services => "/services",
            Route::BookingRules => "/booking-rules",
            Route::CallLogs => "/call-logs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Settings => "Settings",
            Route::KnowledgeBase => "Knowledge Base",
            Route::Services => "Services",
            Route::BookingRules => "Booking Rules",
            Route::CallLogs => "Call Logs",
        }
    }

    /// Whether the route needs a session
    pub fn is_protected(self) -> bool {
        self != Route::Login
    }

    /// Resolve a path, ignoring a trailing slash and any query or fragment
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        Route::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of evaluating the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested route
    Allow(Route),
    /// Render this route instead
    RedirectTo(Route),
}

impl RouteDecision {
    /// Route that ends up rendering
    pub fn target(self) -> Route {
        match self {
            RouteDecision::Allow(route) | RouteDecision::RedirectTo(route) => route,
        }
    }

    pub fn is_redirect(self) -> bool {
        matches!(self, RouteDecision::RedirectTo(_))
    }
}

/// Decide whether `requested` may render given session presence.
///
/// Only presence counts; token validity is the backend's call.
pub fn evaluate(authenticated: bool, requested: Route) -> RouteDecision {
    if requested.is_protected() && !authenticated {
        RouteDecision::RedirectTo(Route::Login)
    } else {
        RouteDecision::Allow(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_protected_routes_redirect() {
        for route in Route::NAV {
            assert_eq!(
                evaluate(false, route),
                RouteDecision::RedirectTo(Route::Login),
                "{route} should redirect"
            );
        }
    }

    #[test]
    fn test_authenticated_routes_render() {
        for route in Route::ALL {
            assert_eq!(evaluate(true, route), RouteDecision::Allow(route));
        }
    }

    #[test]
    fn test_login_always_renders() {
        assert_eq!(evaluate(false, Route::Login), RouteDecision::Allow(Route::Login));
        assert!(!evaluate(false, Route::Login).is_redirect());
    }

    #[test]
    fn test_path_resolution() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path(""), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/services/"), Some(Route::Services));
        assert_eq!(Route::from_path("/call-logs?page=2"), Some(Route::CallLogs));
        assert_eq!(Route::from_path("/knowledge-base#top"), Some(Route::KnowledgeBase));
        assert_eq!(Route::from_path("/nope"), None);

        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }
}
