//! Transient alert list fed by pushes and API error notices.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bus::Subscription;
use crate::notice::ApiErrorNotice;

/// How long an alert stays visible.
pub const ALERT_TIMEOUT_MS: i64 = 8_000;

/// Message used when an API error notice carries none.
pub const DEFAULT_ERROR_MESSAGE: &str = "Unexpected error. Please retry.";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(Uuid);

impl AlertId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AlertId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    Info,
    Success,
    Warning,
    Error,
}

/// Alert content before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub variant: AlertVariant,
}

impl AlertInput {
    pub fn new(variant: AlertVariant, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
            variant,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl From<&ApiErrorNotice> for AlertInput {
    fn from(notice: &ApiErrorNotice) -> Self {
        Self {
            title: format!("API error {}", notice.status),
            message: Some(
                notice
                    .message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            ),
            variant: AlertVariant::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub variant: AlertVariant,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Alert {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Ordered list of visible alerts, oldest first.
#[derive(Debug, Clone)]
pub struct AlertCenter {
    alerts: Vec<Alert>,
    ttl: TimeDelta,
}

impl Default for AlertCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertCenter {
    pub fn new() -> Self {
        Self::with_ttl(TimeDelta::milliseconds(ALERT_TIMEOUT_MS))
    }

    pub fn with_ttl(ttl: TimeDelta) -> Self {
        Self {
            alerts: Vec::new(),
            ttl,
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn push(&mut self, input: AlertInput) -> AlertId {
        self.push_at(input, Utc::now())
    }

    pub fn push_at(&mut self, input: AlertInput, now: DateTime<Utc>) -> AlertId {
        let id = AlertId::new();
        tracing::debug!(alert_id = %id, title = %input.title, "alert pushed");
        self.alerts.push(Alert {
            id,
            title: input.title,
            message: input.message,
            variant: input.variant,
            created_at: now,
            expires_at: now + self.ttl,
        });
        id
    }

    /// Remove an alert. Returns whether it was still visible.
    pub fn dismiss(&mut self, id: AlertId) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        before != self.alerts.len()
    }

    /// Drop alerts whose timeout elapsed; returns how many were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.alerts.len();
        self.alerts.retain(|alert| !alert.is_expired(now));
        before - self.alerts.len()
    }

    pub fn notify(&mut self, notice: &ApiErrorNotice) -> AlertId {
        self.push(AlertInput::from(notice))
    }

    /// Turn every queued notice into an alert without blocking.
    pub fn drain(&mut self, subscription: &Subscription<ApiErrorNotice>) -> usize {
        let notices = subscription.pending();
        for notice in &notices {
            self.notify(notice);
        }
        notices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use crate::in_memory_bus::InMemoryEventBus;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn api_notice_becomes_error_alert() {
        let mut center = AlertCenter::new();
        center.notify(&ApiErrorNotice::new("/returns/vip-resolution/", 502, None));
        center.notify(&ApiErrorNotice::new(
            "/feature-flags/",
            403,
            Some("Upgrade required".to_string()),
        ));

        let alerts = center.alerts();
        assert_eq!(alerts[0].title, "API error 502");
        assert_eq!(alerts[0].message.as_deref(), Some(DEFAULT_ERROR_MESSAGE));
        assert_eq!(alerts[0].variant, AlertVariant::Error);
        assert_eq!(alerts[1].message.as_deref(), Some("Upgrade required"));
    }

    #[test]
    fn alerts_expire_after_eight_seconds() {
        let mut center = AlertCenter::new();
        center.push_at(AlertInput::new(AlertVariant::Info, "Synced"), t0());

        assert_eq!(center.expire(t0() + TimeDelta::milliseconds(7_999)), 0);
        assert_eq!(center.expire(t0() + TimeDelta::milliseconds(8_000)), 1);
        assert!(center.alerts().is_empty());
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut center = AlertCenter::new();
        let a = center.push(AlertInput::new(AlertVariant::Success, "Saved"));
        let b = center.push(AlertInput::new(AlertVariant::Warning, "Slow sync").with_message("Retrying later"));

        assert!(center.dismiss(a));
        assert!(!center.dismiss(a));
        assert_eq!(center.alerts().len(), 1);
        assert_eq!(center.alerts()[0].id, b);
    }

    #[test]
    fn drain_consumes_bus_notices() {
        let bus: InMemoryEventBus<ApiErrorNotice> = InMemoryEventBus::new();
        let sub = bus.subscribe();
        let mut center = AlertCenter::new();

        bus.publish(ApiErrorNotice::new("/a/", 500, None)).unwrap();
        bus.publish(ApiErrorNotice::new("/b/", 404, Some("Missing".to_string())))
            .unwrap();

        assert_eq!(center.drain(&sub), 2);
        assert_eq!(center.drain(&sub), 0);
        assert_eq!(center.alerts()[1].title, "API error 404");
    }
}
