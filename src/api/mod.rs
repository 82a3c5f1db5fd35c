//! Voice Agent REST API
//!
//! Client side of the backend REST API.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/login` - Exchange email/password for an access token
//!
//! ## Business
//! - `GET /businesses/:id` - Business profile
//! - `PATCH /businesses/:id` - Partial profile update
//!
//! ## Booking rules
//! - `GET /businesses/:id/booking-rules` - Rules, or `null` when unset
//! - `PUT /businesses/:id/booking-rules` - Replace rules
//!
//! ## Knowledge base
//! - `GET /businesses/:id/knowledge-base` - List documents
//! - `POST /businesses/:id/knowledge-base` - Add a document
//! - `DELETE /businesses/:id/knowledge-base/:doc_id` - Remove a document
//!
//! ## Services
//! - `GET /businesses/:id/services` - List services
//! - `POST /businesses/:id/services` - Add a service
//! - `PATCH /businesses/:id/services/:service_id` - Update a service
//! - `DELETE /businesses/:id/services/:service_id` - Remove a service
//!
//! ## Activity
//! - `GET /businesses/:id/call-logs` - Call history
//! - `GET /businesses/:id/bookings` - Bookings

pub mod client;
pub mod dto;
pub mod endpoints;
pub mod error;

pub use client::{ApiClient, RetryPolicy};
pub use dto::{
    Booking, BookingRules, Business, BusinessUpdate, CallLog, KnowledgeDoc, NewKnowledgeDoc,
    NewService, Service, ServiceUpdate, TokenResponse,
};
pub use endpoints::BusinessApi;
pub use error::{ApiError, ApiResult};
