//! Data Transfer Objects
//!
//! Wire shapes of the records exchanged with the backend. The client only
//! holds copies of these; the backend owns them.

use serde::{Deserialize, Serialize};

// ============ Auth ============

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

// ============ Business ============

/// Business profile, the tenant every other resource hangs off
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Business {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub policies: Option<String>,
}

/// Partial business update; absent fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusinessUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<String>,
}

impl BusinessUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ============ Booking rules ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRules {
    pub advance_notice_hours: u32,
    pub max_advance_days: u32,
    pub cancellation_hours: u32,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            advance_notice_hours: 24,
            max_advance_days: 30,
            cancellation_hours: 24,
        }
    }
}

// ============ Knowledge base ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDoc {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewKnowledgeDoc {
    pub title: String,
    pub content: String,
}

// ============ Services ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Service creation body. `price` and `description` are always sent,
/// as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewService {
    pub name: String,
    pub duration_minutes: u32,
    pub price: Option<f64>,
    pub description: Option<String>,
}

/// Partial service update. For the nullable fields, `None` leaves the
/// value alone and `Some(None)` sends `null`, clearing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

// ============ Calls and bookings ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLog {
    pub id: String,
    #[serde(default)]
    pub caller_phone: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub created_at: String,
}

/// Bookings are only counted by this client, so their shape stays opaque
pub type Booking = serde_json::Value;
