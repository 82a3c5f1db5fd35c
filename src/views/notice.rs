//! Notices
//!
//! The banner a view shows for the outcome of its last operation: a short
//! lived acknowledgment after a save, or an error that stays until the next
//! operation.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::ViewError;

/// How long a save acknowledgment stays visible
pub const ACK_DURATION_MS: i64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notice {
    /// Transient "Saved!" acknowledgment starting now
    pub fn saved() -> Self {
        Self::saved_at(Utc::now())
    }

    pub fn saved_at(now: DateTime<Utc>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: "Saved!".to_string(),
            expires_at: Some(now + Duration::milliseconds(ACK_DURATION_MS)),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            expires_at: None,
        }
    }

    /// Banner for a failed operation; cancellations are silent
    pub fn from_error(error: &ViewError) -> Option<Self> {
        match error {
            ViewError::Cancelled => None,
            other => Some(Self::error(other.to_string())),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expires| now < expires)
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Utc::now())
    }
}

/// Replace `slot` with the error banner for `result`, if it failed
pub(crate) fn record_failure<T>(slot: &mut Option<Notice>, result: &Result<T, ViewError>) {
    if let Err(e) = result {
        if let Some(notice) = Notice::from_error(e) {
            tracing::warn!(error = %e, "View operation failed");
            *slot = Some(notice);
        }
    }
}
