//! `returnshield-events`: in-process notifications.
//!
//! A small pub/sub bus plus the alert list it feeds. API error statuses are
//! broadcast as [`ApiErrorNotice`]s and rendered by the [`AlertCenter`].

pub mod alerts;
pub mod bus;
pub mod in_memory_bus;
pub mod notice;

pub use alerts::{
    ALERT_TIMEOUT_MS, Alert, AlertCenter, AlertId, AlertInput, AlertVariant, DEFAULT_ERROR_MESSAGE,
};
pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use notice::{API_ERROR_TOPIC, ApiErrorNotice};
