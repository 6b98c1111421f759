//! Request and response bodies of the shopper endpoints.

use returnshield_core::{LineItemId, OrderId, ReturnId};
use serde::{Deserialize, Serialize};

use crate::reason::{Resolution, ReturnReason};

/// Body of `POST /returns/lookup/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub order_number: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_gift: Option<bool>,
}

impl LookupRequest {
    pub fn new(order_number: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into().trim().to_string(),
            email: email.into().trim().to_string(),
            zip_code: None,
            is_gift: None,
        }
    }

    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = Some(zip_code.into());
        self
    }

    pub fn as_gift(mut self) -> Self {
        self.is_gift = Some(true);
        self
    }
}

/// Body of `POST /returns/submit/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnSubmission {
    pub order_id: OrderId,
    pub items: Vec<LineItemId>,
    pub reason: ReturnReason,
    pub resolution: Resolution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_gift: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
}

/// Response of `POST /returns/submit/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnConfirmation {
    pub id: ReturnId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_omits_unset_optionals() {
        let body = serde_json::to_value(LookupRequest::new(" #1001 ", "a@b.co")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"order_number": "#1001", "email": "a@b.co"})
        );
    }

    #[test]
    fn submission_uses_wire_labels() {
        let body = ReturnSubmission {
            order_id: OrderId::new(9),
            items: vec![LineItemId::new("x")],
            reason: ReturnReason::SizeTooBig,
            resolution: Resolution::Refund,
            is_gift: None,
            recipient_email: None,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "order_id": 9,
                "items": ["x"],
                "reason": "Size too big",
                "resolution": "refund"
            })
        );
    }

    #[test]
    fn confirmation_label_url_is_optional() {
        let confirmation: ReturnConfirmation =
            serde_json::from_str(r#"{"id": 12, "message": "Return created"}"#).unwrap();
        assert_eq!(confirmation.id, ReturnId::new(12));
        assert!(confirmation.label_url.is_none());
    }
}
