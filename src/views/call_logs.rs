//! Call logs table

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use super::notice::record_failure;
use super::table::{format_timestamp, Table};
use super::{compose, Notice, View, ViewResult, ViewScope};
use crate::api::{ApiClient, CallLog};
use crate::router::Route;

/// Display form of one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallLogRow {
    pub caller: String,
    pub intent: String,
    pub outcome: String,
    pub duration: String,
    pub time: String,
}

impl From<&CallLog> for CallLogRow {
    fn from(log: &CallLog) -> Self {
        let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        Self {
            caller: log
                .caller_phone
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            intent: or_dash(&log.intent),
            outcome: or_dash(&log.outcome),
            duration: log
                .duration_seconds
                .map_or_else(|| "-".to_string(), |secs| format!("{secs}s")),
            time: format_timestamp(&log.created_at),
        }
    }
}

#[derive(Debug)]
pub struct CallLogsView {
    client: ApiClient,
    scope: ViewScope,
    rows: Vec<CallLogRow>,
    notice: Option<Notice>,
}

impl CallLogsView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            rows: Vec::new(),
            notice: None,
        }
    }

    pub fn rows(&self) -> &[CallLogRow] {
        &self.rows
    }

    async fn load(&mut self) -> ViewResult<()> {
        let Some(business_id) = self.client.session().business_id() else {
            return Ok(());
        };

        let api = self.client.business(&business_id);
        let logs = self.scope.run(api.call_logs()).await??;
        self.rows = logs.iter().map(CallLogRow::from).collect();
        Ok(())
    }
}

#[async_trait(?Send)]
impl View for CallLogsView {
    fn route(&self) -> Route {
        Route::CallLogs
    }

    async fn mount(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = self.load().await;
        record_failure(&mut self.notice, &result);
        result
    }

    fn render(&self) -> String {
        let body = if self.rows.is_empty() {
            "No calls yet.\n".to_string()
        } else {
            let mut table = Table::new(["Caller", "Intent", "Outcome", "Duration", "Time"]);
            for row in &self.rows {
                table.row([
                    row.caller.as_str(),
                    row.intent.as_str(),
                    row.outcome.as_str(),
                    row.duration.as_str(),
                    row.time.as_str(),
                ]);
            }
            table.render()
        };
        compose("Call Logs", self.notice.as_ref(), &body)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "route": self.route().path(),
            "calls": self.rows,
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
