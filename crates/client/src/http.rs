//! Thin `reqwest` wrapper that classifies every response.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use returnshield_auth::AuthToken;
use returnshield_events::{API_ERROR_TOPIC, ApiErrorNotice, EventBus, InMemoryEventBus};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, Payload, classify};
use crate::session::SharedSession;

/// Bus carrying API error notices to the alert center.
pub type NoticeBus = Arc<InMemoryEventBus<ApiErrorNotice>>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Option<String>,
    notifier: Option<NoticeBus>,
    session: Option<Arc<SharedSession>>,
}

impl ApiClient {
    /// Build a client. A missing base URL is reported on first use, not here.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            notifier: None,
            session: None,
        })
    }

    /// Publish a notice on `bus` for every error status.
    pub fn with_notifier(mut self, bus: NoticeBus) -> Self {
        self.notifier = Some(bus);
        self
    }

    /// Sign `session` out whenever its token is answered with `401`.
    pub(crate) fn with_session(mut self, session: Arc<SharedSession>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url.as_deref().ok_or_else(|| {
            ApiError::Config(format!(
                "{} is not configured.",
                crate::config::API_URL_ENV
            ))
        })?;
        if path.starts_with('/') {
            Ok(format!("{base}{path}"))
        } else {
            Ok(format!("{base}/{path}"))
        }
    }

    /// Send a request and classify the response.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&AuthToken>,
    ) -> Result<Payload, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, authenticated = token.is_some(), "dispatching request");

        let mut req = self.http.request(method.clone(), &url);
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, token.header_value());
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
            req = req.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request failed to send");
            ApiError::Network(e.to_string())
        })?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.bytes().await.map_err(ApiError::from)?;

        let result = classify(
            status.as_u16(),
            status.canonical_reason(),
            content_type.as_deref(),
            &body,
        );

        if let Err(err) = &result {
            tracing::warn!(%method, path, status = status.as_u16(), error = %err, "api error");
            if let (true, Some(session), Some(token)) =
                (err.is_unauthorized(), &self.session, token)
            {
                session.revoke(token).await;
            }
            if let (Some(bus), ApiError::Status { status, detail, .. }) = (&self.notifier, err) {
                let notice = ApiErrorNotice::new(path, *status, detail.clone());
                if let Err(e) = bus.publish(notice) {
                    tracing::debug!(topic = API_ERROR_TOPIC, error = %e, "api error notice not delivered");
                }
            }
        }

        result
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&AuthToken>,
    ) -> Result<T, ApiError> {
        self.request::<()>(Method::GET, path, None, token)
            .await?
            .into_json()
    }

    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        token: Option<&AuthToken>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), token)
            .await?
            .into_json()
    }

    pub async fn put<B, T>(
        &self,
        path: &str,
        body: &B,
        token: Option<&AuthToken>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body), token)
            .await?
            .into_json()
    }

    pub async fn delete(&self, path: &str, token: Option<&AuthToken>) -> Result<(), ApiError> {
        self.request::<()>(Method::DELETE, path, None, token)
            .await
            .map(|_| ())
    }
}
