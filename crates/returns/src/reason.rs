//! Return reasons and resolutions offered to shoppers.

use core::str::FromStr;

use returnshield_core::DomainError;
use serde::{Deserialize, Serialize};

/// Fixed list of reasons a shopper can pick. Serialized as the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnReason {
    #[serde(rename = "Size too small")]
    SizeTooSmall,
    #[serde(rename = "Size too big")]
    SizeTooBig,
    #[serde(rename = "Item defective")]
    ItemDefective,
    #[serde(rename = "Arrived too late")]
    ArrivedTooLate,
    #[serde(rename = "Changed my mind")]
    ChangedMyMind,
    #[serde(rename = "Other")]
    Other,
}

impl ReturnReason {
    /// All reasons in the order they are presented.
    pub const ALL: [ReturnReason; 6] = [
        ReturnReason::SizeTooSmall,
        ReturnReason::SizeTooBig,
        ReturnReason::ItemDefective,
        ReturnReason::ArrivedTooLate,
        ReturnReason::ChangedMyMind,
        ReturnReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReturnReason::SizeTooSmall => "Size too small",
            ReturnReason::SizeTooBig => "Size too big",
            ReturnReason::ItemDefective => "Item defective",
            ReturnReason::ArrivedTooLate => "Arrived too late",
            ReturnReason::ChangedMyMind => "Changed my mind",
            ReturnReason::Other => "Other",
        }
    }
}

impl core::fmt::Display for ReturnReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReturnReason {
    type Err = DomainError;

    /// Accepts the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ReturnReason::ALL
            .into_iter()
            .find(|reason| reason.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::validation(format!("unknown return reason: {needle}")))
    }
}

/// Outcome the shopper wants for the return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Store credit with the exchange bonus applied.
    Exchange,
    /// Plain refund to the original payment method.
    Refund,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Exchange => "exchange",
            Resolution::Refund => "refund",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Exchange => "Store Credit",
            Resolution::Refund => "Refund",
        }
    }
}

impl core::fmt::Display for Resolution {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exchange" => Ok(Resolution::Exchange),
            "refund" => Ok(Resolution::Refund),
            other => Err(DomainError::validation(format!(
                "resolution must be one of: exchange, refund (got {other})"
            ))),
        }
    }
}
