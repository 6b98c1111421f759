//! Analytics panel view models and their reducers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label shown when a SKU has no recorded reasons.
pub const NO_TOP_REASON: &str = "N/A";

/// Minimum rendered cohort bar height.
const MIN_BAR_HEIGHT: f64 = 4.0;

/// Return counts per reason for one SKU (`GET /analytics/reasons/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonBreakdown {
    pub sku: String,
    /// Reason label to count. Kept sorted so reductions are deterministic.
    pub reasons: BTreeMap<String, u64>,
    pub total_returns: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopReason<'a> {
    pub label: &'a str,
    pub count: u64,
}

impl core::fmt::Display for TopReason<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.label, self.count)
    }
}

/// Entry with the highest count. Ties go to the lexicographically smallest label.
pub fn top_reason(reasons: &BTreeMap<String, u64>) -> Option<TopReason<'_>> {
    let mut best: Option<TopReason<'_>> = None;
    for (label, &count) in reasons {
        match best {
            Some(current) if current.count >= count => {}
            _ => {
                best = Some(TopReason {
                    label: label.as_str(),
                    count,
                })
            }
        }
    }
    best
}

impl ReasonBreakdown {
    pub fn top_reason(&self) -> Option<TopReason<'_>> {
        top_reason(&self.reasons)
    }

    /// Table cell text: `"<label> (<count>)"` or `N/A`.
    pub fn top_reason_label(&self) -> String {
        self.top_reason()
            .map(|top| top.to_string())
            .unwrap_or_else(|| NO_TOP_REASON.to_string())
    }
}

/// Return statistics for one customer cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortMetrics {
    /// Percentage, e.g. `12.5` for 12.5%.
    pub return_rate: f64,
    pub total_orders: u64,
    pub total_returns: u64,
}

impl CohortMetrics {
    pub fn bar_height(&self) -> f64 {
        (self.return_rate * 2.0).max(MIN_BAR_HEIGHT)
    }
}

/// `GET /analytics/cohorts/`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortComparison {
    pub new_customers: CohortMetrics,
    pub returning_customers: CohortMetrics,
}

/// `GET /analytics/profitability/`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profitability {
    pub revenue_retained: f64,
    pub revenue_refunded: f64,
    pub exchange_count: u64,
    pub refund_count: u64,
    /// Percentage of revenue kept through exchanges.
    pub retained_percentage: f64,
}

impl Profitability {
    /// Fill width of the retention bar, clamped to a valid percentage.
    pub fn retention_bar_width(&self) -> f64 {
        self.retained_percentage.clamp(0.0, 100.0)
    }
}
