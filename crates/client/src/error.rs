//! Typed API errors and response classification.
//!
//! Classification is a pure function of status, status text, content type and
//! body so it can be tested without a server.

use returnshield_core::DomainError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Shown for transport failures.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to reach ReturnShield. Check your connection and try again.";

/// Used when an error response carries no usable text at all.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// Server-provided explanation, when one could be extracted.
        detail: Option<String>,
    },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// A successful response could not be decoded into the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Client configuration is missing or invalid.
    #[error("{0}")]
    Config(String),

    /// The call needs a signed-in operator.
    #[error("{0}")]
    Unauthenticated(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Server detail (or status message) for HTTP errors; `fallback` otherwise.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail, message, ..
            } => detail.clone().unwrap_or_else(|| message.clone()),
            _ => fallback.to_string(),
        }
    }

    /// Text suitable for showing to a person.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Decode(_) => "Unexpected response from the server. Please try again.".to_string(),
            ApiError::Config(msg) | ApiError::Unauthenticated(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthorized(msg) => ApiError::Unauthenticated(msg),
            other => ApiError::Config(other.to_string()),
        }
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `204 No Content`.
    Empty,
    Json(Value),
    /// Non-JSON success bodies are passed through as text.
    Text(String),
}

impl Payload {
    /// Deserialize into `T`. `Empty` reads as JSON `null`, text as a JSON string.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            Payload::Empty => Value::Null,
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

/// Classify a response.
///
/// - `204` is success with no body.
/// - Error statuses take `detail` from a JSON body, then `error`, then the
///   serialized body; unparseable or non-JSON bodies fall back to `reason`.
/// - Successful JSON bodies are parsed; other successful bodies are text.
pub fn classify(
    status: u16,
    reason: Option<&str>,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Payload, ApiError> {
    if status == 204 {
        return Ok(Payload::Empty);
    }

    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    let reason = reason.unwrap_or_default();

    if !(200..300).contains(&status) {
        let detail = if is_json {
            match serde_json::from_slice::<Value>(body) {
                Ok(payload) => detail_from_payload(&payload),
                Err(_) => reason.to_string(),
            }
        } else {
            reason.to_string()
        };

        let detail = Some(detail).filter(|d| !d.is_empty());
        let message = detail
            .clone()
            .unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string());
        return Err(ApiError::Status {
            status,
            message,
            detail,
        });
    }

    if !is_json {
        return Ok(Payload::Text(String::from_utf8_lossy(body).into_owned()));
    }

    serde_json::from_slice(body)
        .map(Payload::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn detail_from_payload(payload: &Value) -> String {
    let field = |name: &str| match payload.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };
    field("detail")
        .or_else(|| field("error"))
        .unwrap_or_else(|| payload.to_string())
}
