//! Business settings form

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use super::notice::record_failure;
use super::{compose, forms, require_business, Notice, View, ViewResult, ViewScope};
use crate::api::{ApiClient, Business, BusinessUpdate};
use crate::router::Route;

/// Editable business profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BusinessForm {
    pub name: String,
    pub phone: String,
    pub timezone: String,
    pub location: String,
    pub policies: String,
}

impl From<&Business> for BusinessForm {
    fn from(business: &Business) -> Self {
        Self {
            name: business.name.clone(),
            phone: business.phone.clone().unwrap_or_default(),
            timezone: business.timezone.clone().unwrap_or_default(),
            location: business.location.clone().unwrap_or_default(),
            policies: business.policies.clone().unwrap_or_default(),
        }
    }
}

impl BusinessForm {
    pub fn validate(&self) -> Result<(), forms::FormError> {
        forms::required("name", &self.name)?;
        if !self.phone.trim().is_empty() {
            forms::validate_phone(&self.phone)?;
        }
        Ok(())
    }

    /// Fields that differ from `baseline`
    pub fn changes_from(&self, baseline: &BusinessForm) -> BusinessUpdate {
        fn changed(current: &str, before: &str) -> Option<String> {
            (current.trim() != before.trim()).then(|| current.trim().to_string())
        }

        BusinessUpdate {
            name: changed(&self.name, &baseline.name),
            phone: changed(&self.phone, &baseline.phone),
            timezone: changed(&self.timezone, &baseline.timezone),
            location: changed(&self.location, &baseline.location),
            policies: changed(&self.policies, &baseline.policies),
        }
    }
}

#[derive(Debug)]
pub struct BusinessSettingsView {
    client: ApiClient,
    scope: ViewScope,
    pub form: BusinessForm,
    baseline: BusinessForm,
    notice: Option<Notice>,
}

impl BusinessSettingsView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            form: BusinessForm::default(),
            baseline: BusinessForm::default(),
            notice: None,
        }
    }

    /// PATCH the edited fields and acknowledge
    pub async fn save(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = self.try_save().await;
        record_failure(&mut self.notice, &result);
        result
    }

    async fn try_save(&mut self) -> ViewResult<()> {
        self.form.validate()?;
        let business_id = require_business(&self.client)?;

        let update = self.form.changes_from(&self.baseline);
        if !update.is_empty() {
            let api = self.client.business(&business_id);
            let business = self.scope.run(api.update(&update)).await??;
            self.seed(&business);
        }

        tracing::info!(%business_id, "Business settings saved");
        self.notice = Some(Notice::saved());
        Ok(())
    }

    async fn load(&mut self) -> ViewResult<()> {
        let Some(business_id) = self.client.session().business_id() else {
            return Ok(());
        };

        let api = self.client.business(&business_id);
        let business = self.scope.run(api.get()).await??;
        self.seed(&business);
        Ok(())
    }

    fn seed(&mut self, business: &Business) {
        self.form = BusinessForm::from(business);
        self.baseline = self.form.clone();
    }
}

#[async_trait(?Send)]
impl View for BusinessSettingsView {
    fn route(&self) -> Route {
        Route::Settings
    }

    async fn mount(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = self.load().await;
        record_failure(&mut self.notice, &result);
        result
    }

    fn render(&self) -> String {
        let body = format!(
            "Business Name: {}\nPhone:         {}\nTimezone:      {}\nLocation:      {}\nPolicies:      {}\n",
            self.form.name, self.form.phone, self.form.timezone, self.form.location, self.form.policies
        );
        compose("Business Settings", self.notice.as_ref(), &body)
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
    fn test_only_changed_fields_are_sent() {
        let baseline = BusinessForm {
            name: "Salon".into(),
            phone: "5551234567".into(),
            ..Default::default()
        };
        let mut form = baseline.clone();
        form.timezone = "America/New_York".into();
        form.name = " Salon ".into();

        let update = form.changes_from(&baseline);
        assert_eq!(update.timezone.as_deref(), Some("America/New_York"));
        assert_eq!(update.name, None);
        assert_eq!(update.phone, None);
        assert!(baseline.changes_from(&baseline).is_empty());
    }

    #[test]
    fn test_validation() {
        let mut form = BusinessForm {
            name: "Salon".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        form.phone = "123".into();
        assert!(form.validate().is_err());

        form.phone = String::new();
        form.name = "  ".into();
        assert!(form.validate().is_err());
    }
}
