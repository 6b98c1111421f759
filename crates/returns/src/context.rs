use returnshield_core::Order;
use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::reason::{Resolution, ReturnReason};
use crate::refund::{RefundQuote, refund_amount};
use crate::selection::SelectedItems;
use crate::submission::ReturnSubmission;

/// Gift-return details captured at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftDetails {
    pub recipient_email: Option<String>,
}

/// Data accumulated across the wizard steps.
///
/// Moving backwards never clears anything here; only a fresh lookup or a
/// restart does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardContext {
    pub order: Option<Order>,
    pub selected_items: SelectedItems,
    pub reason: Option<ReturnReason>,
    pub resolution: Option<Resolution>,
    pub gift: Option<GiftDetails>,
}

impl WizardContext {
    pub fn has_order(&self) -> bool {
        self.order.is_some()
    }

    pub fn has_items(&self) -> bool {
        self.has_order() && !self.selected_items.is_empty()
    }

    pub fn has_reason(&self) -> bool {
        self.has_items() && self.reason.is_some()
    }

    /// Refund and bonus for the current selection, if an order is loaded.
    pub fn quote(&self) -> Option<RefundQuote> {
        let order = self.order.as_ref()?;
        Some(RefundQuote::new(refund_amount(order, &self.selected_items)))
    }

    /// Build the submit body, checking every upstream field.
    pub fn submission(&self) -> Result<ReturnSubmission, WizardError> {
        let order = self.order.as_ref().ok_or(WizardError::MissingOrder)?;
        if self.selected_items.is_empty() {
            return Err(WizardError::NoItemsSelected);
        }
        let reason = self.reason.ok_or(WizardError::MissingReason)?;
        let resolution = self.resolution.ok_or(WizardError::MissingResolution)?;

        Ok(ReturnSubmission {
            order_id: order.id,
            items: self.selected_items.as_slice().to_vec(),
            reason,
            resolution,
            is_gift: self.gift.as_ref().map(|_| true),
            recipient_email: self
                .gift
                .as_ref()
                .and_then(|gift| gift.recipient_email.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use returnshield_core::{LineItem, LineItemId, OrderId};
    use rust_decimal::Decimal;

    fn order() -> Order {
        Order {
            id: OrderId::new(5),
            order_number: "#1005".to_string(),
            created_at: "2024-02-02T00:00:00Z".to_string(),
            currency: "USD".to_string(),
            items: vec![LineItem {
                line_item_id: LineItemId::new("a"),
                title: "Jacket".to_string(),
                price: Decimal::new(12000, 2),
                quantity: 1,
                sku: "JKT".to_string(),
                variant_title: None,
            }],
        }
    }

    #[test]
    fn submission_reports_first_missing_field() {
        let mut ctx = WizardContext::default();
        assert_eq!(ctx.submission(), Err(WizardError::MissingOrder));

        ctx.order = Some(order());
        assert_eq!(ctx.submission(), Err(WizardError::NoItemsSelected));

        ctx.selected_items.toggle(LineItemId::new("a"));
        assert_eq!(ctx.submission(), Err(WizardError::MissingReason));

        ctx.reason = Some(ReturnReason::Other);
        assert_eq!(ctx.submission(), Err(WizardError::MissingResolution));

        ctx.resolution = Some(Resolution::Exchange);
        let body = ctx.submission().unwrap();
        assert_eq!(body.order_id, OrderId::new(5));
        assert_eq!(body.is_gift, None);
    }

    #[test]
    fn gift_details_flow_into_the_submission() {
        let ctx = WizardContext {
            order: Some(order()),
            selected_items: {
                let mut items = SelectedItems::new();
                items.toggle(LineItemId::new("a"));
                items
            },
            reason: Some(ReturnReason::ChangedMyMind),
            resolution: Some(Resolution::Refund),
            gift: Some(GiftDetails {
                recipient_email: Some("friend@example.com".to_string()),
            }),
        };

        let body = ctx.submission().unwrap();
        assert_eq!(body.is_gift, Some(true));
        assert_eq!(body.recipient_email.as_deref(), Some("friend@example.com"));
        assert_eq!(ctx.quote().unwrap().refund_amount, Decimal::new(12000, 2));
    }
}
