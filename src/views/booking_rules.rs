//! Booking rules form

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use super::notice::record_failure;
use super::{compose, forms, require_business, Notice, View, ViewResult, ViewScope};
use crate::api::{ApiClient, BookingRules};
use crate::router::Route;

/// Text inputs of the rules form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRulesForm {
    pub advance_notice_hours: String,
    pub max_advance_days: String,
    pub cancellation_hours: String,
}

impl From<BookingRules> for BookingRulesForm {
    fn from(rules: BookingRules) -> Self {
        Self {
            advance_notice_hours: rules.advance_notice_hours.to_string(),
            max_advance_days: rules.max_advance_days.to_string(),
            cancellation_hours: rules.cancellation_hours.to_string(),
        }
    }
}

impl Default for BookingRulesForm {
    fn default() -> Self {
        BookingRules::default().into()
    }
}

impl BookingRulesForm {
    pub fn parse(&self) -> Result<BookingRules, forms::FormError> {
        Ok(BookingRules {
            advance_notice_hours: forms::parse_count(
                "advance notice hours",
                &self.advance_notice_hours,
            )?,
            max_advance_days: forms::parse_count("max advance days", &self.max_advance_days)?,
            cancellation_hours: forms::parse_count(
                "cancellation hours",
                &self.cancellation_hours,
            )?,
        })
    }
}

#[derive(Debug)]
pub struct BookingRulesView {
    client: ApiClient,
    scope: ViewScope,
    pub form: BookingRulesForm,
    notice: Option<Notice>,
}

impl BookingRulesView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            form: BookingRulesForm::default(),
            notice: None,
        }
    }

    /// PUT the rules and acknowledge
    pub async fn save(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = self.try_save().await;
        record_failure(&mut self.notice, &result);
        result
    }

    async fn try_save(&mut self) -> ViewResult<()> {
        let rules = self.form.parse()?;
        let business_id = require_business(&self.client)?;

        let api = self.client.business(&business_id);
        let saved = self.scope.run(api.set_booking_rules(&rules)).await??;
        self.form = saved.into();

        tracing::info!(%business_id, "Booking rules saved");
        self.notice = Some(Notice::saved());
        Ok(())
    }

    async fn load(&mut self) -> ViewResult<()> {
        let Some(business_id) = self.client.session().business_id() else {
            return Ok(());
        };

        let api = self.client.business(&business_id);
        let rules = self.scope.run(api.booking_rules()).await??;
        self.form = rules.unwrap_or_default().into();
        Ok(())
    }
}

#[async_trait(?Send)]
impl View for BookingRulesView {
    fn route(&self) -> Route {
        Route::BookingRules
    }

    async fn mount(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = self.load().await;
        record_failure(&mut self.notice, &result);
        result
    }

    fn render(&self) -> String {
        let body = format!(
            "Advance Notice (hours):        {}\nMax Advance Booking (days):    {}\nCancellation Notice (hours):   {}\n",
            self.form.advance_notice_hours, self.form.max_advance_days, self.form.cancellation_hours
        );
        compose("Booking Rules", self.notice.as_ref(), &body)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "route": self.route().path(),
            "form": self.form,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let form = BookingRulesForm::default();
        assert_eq!(form.advance_notice_hours, "24");
        assert_eq!(form.max_advance_days, "30");
        assert_eq!(form.cancellation_hours, "24");
        assert_eq!(form.parse().unwrap(), BookingRules::default());
    }

    #[test]
    fn test_parse_rejects_text() {
        let form = BookingRulesForm {
            max_advance_days: "a month".into(),
            ..Default::default()
        };
        assert!(matches!(
            form.parse(),
            Err(forms::FormError::InvalidNumber { field: "max advance days", .. })
        ));
    }
}
