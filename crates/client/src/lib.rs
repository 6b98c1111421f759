//! `returnshield-client`: the IO edge of the ReturnShield client.
//!
//! - `config`: environment-driven settings
//! - `http` / `error`: request dispatch and response classification
//! - `api`: typed endpoint bindings
//! - `session`: login, token persistence, profile and flag cache
//! - `dashboard` / `loader` / `walkthrough`: merchant dashboard loading and gating
//! - `shopper`: the return wizard driven over HTTP

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod loader;
pub mod session;
pub mod shopper;
pub mod token_store;
pub mod walkthrough;

pub use config::ClientConfig;
pub use dashboard::{
    AnalyticsPanels, DASHBOARD_FALLBACK_MESSAGE, DashboardData, dashboard_error_message,
    load_analytics, load_dashboard, spawn_analytics, spawn_dashboard,
};
pub use error::{ApiError, NETWORK_ERROR_MESSAGE, Payload, REQUEST_FAILED_MESSAGE, classify};
pub use http::{ApiClient, NoticeBus};
pub use loader::{LoadError, LoadHandle, PanelSlot};
pub use session::{SessionError, SessionManager};
pub use shopper::{LOOKUP_FALLBACK_MESSAGE, SUBMIT_FALLBACK_MESSAGE, ShopperError, ShopperFlow};
pub use token_store::FileTokenStore;
pub use walkthrough::{
    AdvanceError, DashboardSection, DashboardWalkthrough, GateMode, Viewer, WalkthroughCommand,
    WalkthroughError, WalkthroughEvent, advance,
};
