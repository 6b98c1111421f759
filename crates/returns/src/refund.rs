//! Refund and exchange-bonus arithmetic.
//!
//! The refund is the sum of the unit price of every selected line. Line
//! quantity is deliberately not multiplied in: a line bought twice still
//! contributes its unit price once. The bonus credit is offered only for
//! exchanges.

use returnshield_core::{LineItemId, Order};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reason::Resolution;

/// Multiplier applied to the refund when the shopper accepts store credit.
pub const EXCHANGE_BONUS_RATE: Decimal = Decimal::from_parts(110, 0, 0, false, 2);

/// Sum of unit prices for every order line whose id is selected.
pub fn refund_amount<'a, I>(order: &Order, selected: I) -> Decimal
where
    I: IntoIterator<Item = &'a LineItemId> + Clone,
{
    order
        .items
        .iter()
        .filter(|item| selected.clone().into_iter().any(|id| id == &item.line_item_id))
        .map(|item| item.price)
        .sum()
}

/// Store-credit amount offered in place of `refund`.
pub fn bonus_amount(refund: Decimal) -> Decimal {
    refund * EXCHANGE_BONUS_RATE
}

/// Both amounts shown on the resolution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundQuote {
    pub refund_amount: Decimal,
    pub bonus_amount: Decimal,
}

impl RefundQuote {
    pub fn new(refund_amount: Decimal) -> Self {
        Self {
            refund_amount,
            bonus_amount: bonus_amount(refund_amount),
        }
    }

    /// Amount credited for the chosen resolution.
    pub fn amount_for(&self, resolution: Resolution) -> Decimal {
        match resolution {
            Resolution::Exchange => self.bonus_amount,
            Resolution::Refund => self.refund_amount,
        }
    }
}
