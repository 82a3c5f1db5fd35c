//! Typed Endpoints
//!
//! One method per backend operation, built on the verb methods of
//! [`ApiClient`]. Everything except login is scoped under a business.

use super::client::ApiClient;
use super::dto::{
    Booking, BookingRules, Business, BusinessUpdate, CallLog, KnowledgeDoc, LoginRequest,
    NewKnowledgeDoc, NewService, Service, ServiceUpdate, TokenResponse,
};
use super::error::ApiResult;

impl ApiClient {
    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<TokenResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/auth/login", &body).await
    }

    /// Endpoints scoped to one business
    pub fn business<'a>(&'a self, business_id: &str) -> BusinessApi<'a> {
        BusinessApi {
            client: self,
            prefix: format!("/businesses/{}", urlencoding::encode(business_id)),
        }
    }
}

/// Endpoints under `/businesses/{id}`
pub struct BusinessApi<'a> {
    client: &'a ApiClient,
    prefix: String,
}

impl BusinessApi<'_> {
    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    fn item_path(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.prefix, collection, urlencoding::encode(id))
    }

    // ---- Business profile ----

    pub async fn get(&self) -> ApiResult<Business> {
        self.client.get(&self.prefix).await
    }

    pub async fn update(&self, update: &BusinessUpdate) -> ApiResult<Business> {
        self.client.patch(&self.prefix, update).await
    }

    // ---- Booking rules ----

    /// `None` when the business has no rules stored yet
    pub async fn booking_rules(&self) -> ApiResult<Option<BookingRules>> {
        self.client.get(&self.path("/booking-rules")).await
    }

    pub async fn set_booking_rules(&self, rules: &BookingRules) -> ApiResult<BookingRules> {
        self.client.put(&self.path("/booking-rules"), rules).await
    }

    // ---- Knowledge base ----

    pub async fn knowledge_docs(&self) -> ApiResult<Vec<KnowledgeDoc>> {
        self.client.get(&self.path("/knowledge-base")).await
    }

    pub async fn add_knowledge_doc(&self, doc: &NewKnowledgeDoc) -> ApiResult<KnowledgeDoc> {
        self.client.post(&self.path("/knowledge-base"), doc).await
    }

    pub async fn delete_knowledge_doc(&self, doc_id: &str) -> ApiResult<()> {
        self.client
            .delete(&self.item_path("knowledge-base", doc_id))
            .await
    }

    // ---- Services ----

    pub async fn services(&self) -> ApiResult<Vec<Service>> {
        self.client.get(&self.path("/services")).await
    }

    pub async fn add_service(&self, service: &NewService) -> ApiResult<Service> {
        self.client.post(&self.path("/services"), service).await
    }

    pub async fn update_service(
        &self,
        service_id: &str,
        update: &ServiceUpdate,
    ) -> ApiResult<Service> {
        self.client
            .patch(&self.item_path("services", service_id), update)
            .await
    }

    pub async fn delete_service(&self, service_id: &str) -> ApiResult<()> {
        self.client
            .delete(&self.item_path("services", service_id))
            .await
    }

    // ---- Calls and bookings ----

    pub async fn call_logs(&self) -> ApiResult<Vec<CallLog>> {
        self.client.get(&self.path("/call-logs")).await
    }

    pub async fn bookings(&self) -> ApiResult<Vec<Booking>> {
        self.client.get(&self.path("/bookings")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::session::{MemorySessionStore, SessionContext};
    use std::sync::Arc;

    fn client() -> ApiClient {
        let session = SessionContext::new(Arc::new(MemorySessionStore::default()));
        ApiClient::new(&ApiConfig::default(), session).unwrap()
    }

    #[test]
    fn test_paths_are_scoped_and_encoded() {
        let client = client();
        let api = client.business("b 1");
        assert_eq!(api.path("/services"), "/businesses/b%201/services");
        assert_eq!(
            api.item_path("knowledge-base", "doc/2"),
            "/businesses/b%201/knowledge-base/doc%2F2"
        );
    }
}
