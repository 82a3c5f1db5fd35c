//! Dashboard
//!
//! Headline counts for the business. The three collections are fetched
//! concurrently and combined once all of them have arrived; the first
//! failure fails the whole load.

use async_trait::async_trait;
use futures_util::future::try_join3;
use serde::Serialize;
use serde_json::json;

use super::notice::record_failure;
use super::{compose, Notice, View, ViewResult, ViewScope};
use crate::api::{ApiClient, ApiResult, BusinessApi};
use crate::router::Route;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_calls: usize,
    pub total_bookings: usize,
    pub total_services: usize,
}

/// Fetch call logs, bookings and services at once and count each
pub async fn load_stats(api: &BusinessApi<'_>) -> ApiResult<DashboardStats> {
    let (calls, bookings, services) =
        try_join3(api.call_logs(), api.bookings(), api.services()).await?;

    Ok(DashboardStats {
        total_calls: calls.len(),
        total_bookings: bookings.len(),
        total_services: services.len(),
    })
}

#[derive(Debug)]
pub struct DashboardView {
    client: ApiClient,
    scope: ViewScope,
    stats: DashboardStats,
    notice: Option<Notice>,
}

impl DashboardView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            stats: DashboardStats::default(),
            notice: None,
        }
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    async fn load(&mut self) -> ViewResult<()> {
        let Some(business_id) = self.client.session().business_id() else {
            return Ok(());
        };

        let api = self.client.business(&business_id);
        self.stats = self.scope.run(load_stats(&api)).await??;
        tracing::debug!(stats = ?self.stats, "Dashboard loaded");
        Ok(())
    }
}

#[async_trait(?Send)]
impl View for DashboardView {
    fn route(&self) -> Route {
        Route::Dashboard
    }

    async fn mount(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = self.load().await;
        record_failure(&mut self.notice, &result);
        result
    }

    fn render(&self) -> String {
        let body = format!(
            "Total Calls:    {}\nTotal Bookings: {}\nServices:       {}\n",
            self.stats.total_calls, self.stats.total_bookings, self.stats.total_services
        );
        compose("Dashboard", self.notice.as_ref(), &body)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "route": self.route().path(),
            "stats": self.stats,
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
