//! `returnshield-insights`: pure calculators behind the merchant-facing panels.

pub mod analytics;
pub mod roi;

pub use analytics::{
    CohortComparison, CohortMetrics, NO_TOP_REASON, Profitability, ReasonBreakdown, TopReason,
    top_reason,
};
pub use roi::{
    EXCHANGE_CAPTURE_RATE, PRESETS, PROJECTED_REDUCTION, RoiForecast, RoiInputs, RoiPreset,
    forecast,
};
