//! Services catalogue

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use super::notice::record_failure;
use super::table::Table;
use super::{compose, forms, require_business, Notice, View, ViewResult, ViewScope};
use crate::api::{ApiClient, NewService, Service, ServiceUpdate};
use crate::router::Route;

/// Default duration offered for a new service, in minutes
const DEFAULT_DURATION: &str = "30";

/// Text inputs of the service form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    pub duration_minutes: String,
    pub price: String,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            duration_minutes: DEFAULT_DURATION.to_string(),
            price: String::new(),
        }
    }
}

impl From<&Service> for ServiceDraft {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone().unwrap_or_default(),
            duration_minutes: service.duration_minutes.to_string(),
            price: service.price.map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}

impl ServiceDraft {
    pub fn to_request(&self) -> Result<NewService, forms::FormError> {
        Ok(NewService {
            name: forms::required("name", &self.name)?.to_string(),
            duration_minutes: forms::parse_count("duration", &self.duration_minutes)?,
            price: forms::parse_price(&self.price)?,
            description: forms::optional_text(&self.description),
        })
    }

    /// Full replacement of the editable fields
    pub fn to_update(&self) -> Result<ServiceUpdate, forms::FormError> {
        let service = self.to_request()?;
        Ok(ServiceUpdate {
            name: Some(service.name),
            duration_minutes: Some(service.duration_minutes),
            price: Some(service.price),
            description: Some(service.description),
        })
    }
}

#[derive(Debug)]
pub struct ServicesView {
    client: ApiClient,
    scope: ViewScope,
    services: Vec<Service>,
    pub draft: ServiceDraft,
    notice: Option<Notice>,
}

impl ServicesView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            services: Vec::new(),
            draft: ServiceDraft::default(),
            notice: None,
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Create a service from the draft, then reload
    pub async fn add(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = self.try_add().await;
        record_failure(&mut self.notice, &result);
        result
    }

    /// Apply `update` to an existing service, then reload
    pub async fn update(&mut self, service_id: &str, update: &ServiceUpdate) -> ViewResult<()> {
        self.notice = None;
        let result = self.try_update(service_id, update).await;
        record_failure(&mut self.notice, &result);
        result
    }

    /// Delete a service, then reload
    pub async fn delete(&mut self, service_id: &str) -> ViewResult<()> {
        self.notice = None;
        let result = self.try_delete(service_id).await;
        record_failure(&mut self.notice, &result);
        result
    }

    async fn try_add(&mut self) -> ViewResult<()> {
        let request = self.draft.to_request()?;
        let business_id = require_business(&self.client)?;

        let api = self.client.business(&business_id);
        let created = self.scope.run(api.add_service(&request)).await??;
        tracing::info!(service_id = %created.id, "Service added");

        self.draft = ServiceDraft::default();
        self.reload(&business_id).await
    }

    async fn try_update(&mut self, service_id: &str, update: &ServiceUpdate) -> ViewResult<()> {
        let business_id = require_business(&self.client)?;

        let api = self.client.business(&business_id);
        self.scope
            .run(api.update_service(service_id, update))
            .await??;
        tracing::info!(%service_id, "Service updated");

        self.reload(&business_id).await
    }

    async fn try_delete(&mut self, service_id: &str) -> ViewResult<()> {
        let business_id = require_business(&self.client)?;

        let api = self.client.business(&business_id);
        self.scope.run(api.delete_service(service_id)).await??;
        tracing::info!(%service_id, "Service deleted");

        self.reload(&business_id).await
    }

    async fn reload(&mut self, business_id: &str) -> ViewResult<()> {
        let api = self.client.business(business_id);
        self.services = self.scope.run(api.services()).await??;
        Ok(())
    }
}

pub fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("${p:.2}"))
}

#[async_trait(?Send)]
impl View for ServicesView {
    fn route(&self) -> Route {
        Route::Services
    }

    async fn mount(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = match self.client.session().business_id() {
            Some(business_id) => self.reload(&business_id).await,
            None => Ok(()),
        };
        record_failure(&mut self.notice, &result);
        result
    }

    fn render(&self) -> String {
        let body = if self.services.is_empty() {
            "No services yet.\n".to_string()
        } else {
            let mut table = Table::new(["ID", "Name", "Duration", "Price", "Description"]);
            for service in &self.services {
                table.row([
                    service.id.clone(),
                    service.name.clone(),
                    format!("{} min", service.duration_minutes),
                    format_price(service.price),
                    service.description.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            table.render()
        };
        compose("Services", self.notice.as_ref(), &body)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "route": self.route().path(),
            "services": self.services,
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
