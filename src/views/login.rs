//! Login page

use async_trait::async_trait;
use serde_json::json;

use super::notice::record_failure;
use super::{compose, forms, Notice, View, ViewError, ViewResult, ViewScope};
use crate::api::ApiClient;
use crate::router::Route;
use crate::session::Session;

/// Email/password form that establishes the session
#[derive(Debug)]
pub struct LoginView {
    client: ApiClient,
    scope: ViewScope,
    pub email: String,
    pub password: String,
    notice: Option<Notice>,
}

impl LoginView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            email: String::new(),
            password: String::new(),
            notice: None,
        }
    }

    /// Login page shown after the backend rejected the stored token
    pub fn expired(client: ApiClient) -> Self {
        let mut view = Self::new(client);
        view.notice = Some(Notice::error("Your session has expired. Please sign in again."));
        view
    }

    /// Submit the credentials; on success the session is stored and the
    /// dashboard is where the caller should go next
    pub async fn submit(&mut self) -> ViewResult<Route> {
        self.notice = None;
        let result = self.try_submit().await;
        record_failure(&mut self.notice, &result);
        result
    }

    async fn try_submit(&self) -> ViewResult<Route> {
        let email = forms::required("email", &self.email)?;
        forms::validate_email(email)?;
        forms::required("password", &self.password)?;

        let response = self
            .scope
            .run(self.client.login(email, &self.password))
            .await?
            .map_err(|e| {
                tracing::info!(error = %e, "Login rejected");
                ViewError::InvalidCredentials
            })?;

        // Nothing is stored unless the token carries a business
        let session = Session::from_token(response.access_token).map_err(|e| {
            tracing::warn!(error = %e, "Login returned an unusable token");
            ViewError::InvalidCredentials
        })?;

        self.client.session().establish(session)?;
        Ok(Route::Dashboard)
    }
}

#[async_trait(?Send)]
impl View for LoginView {
    fn route(&self) -> Route {
        Route::Login
    }

    async fn mount(&mut self) -> ViewResult<()> {
        Ok(())
    }

    fn render(&self) -> String {
        let body = format!(
            "Email:    {}\nPassword: {}\n",
            self.email,
            "*".repeat(self.password.chars().count())
        );
        compose("Sign in", self.notice.as_ref(), &body)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "route": self.route().path(),
            "email": self.email,
            "notice": self.notice,
        })
    }

    fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
