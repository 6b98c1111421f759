//! ROI forecaster for the marketing calculator.
//!
//! Inputs are clamped on entry so the forecast is always computed from a
//! bounded triple. Non-numeric input leaves the current value unchanged.

use core::str::FromStr;

use returnshield_core::DomainError;
use serde::{Deserialize, Serialize};

/// Average return-rate reduction observed across the beta cohort.
pub const PROJECTED_REDUCTION: f64 = 0.23;
/// Share of refunded orders converted to exchanges.
pub const EXCHANGE_CAPTURE_RATE: f64 = 0.42;

pub const MAX_MONTHLY_ORDERS: f64 = 2000.0;
pub const MAX_AVERAGE_ORDER_VALUE: f64 = 500.0;
pub const MAX_RETURN_RATE: f64 = 0.5;

const PRESET_RATE_TOLERANCE: f64 = 0.0001;

/// Industry benchmark that overwrites all three inputs at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiPreset {
    pub label: &'static str,
    pub description: &'static str,
    pub monthly_orders: f64,
    pub average_order_value: f64,
    pub return_rate: f64,
}

pub const PRESETS: [RoiPreset; 3] = [
    RoiPreset {
        label: "DTC Apparel",
        description: "Higher return rates driven by fit feedback.",
        monthly_orders: 780.0,
        average_order_value: 82.0,
        return_rate: 0.26,
    },
    RoiPreset {
        label: "Beauty & Wellness",
        description: "Subscription refills focused on loyalty retention.",
        monthly_orders: 430.0,
        average_order_value: 64.0,
        return_rate: 0.18,
    },
    RoiPreset {
        label: "Home Goods",
        description: "Bulkier SKUs with costly reverse logistics.",
        monthly_orders: 210.0,
        average_order_value: 118.0,
        return_rate: 0.14,
    },
];

impl RoiPreset {
    /// Look a preset up by label (case-insensitive, `&`/`and` and spacing tolerant).
    pub fn find(name: &str) -> Option<&'static RoiPreset> {
        let wanted = slug(name);
        PRESETS.iter().find(|preset| slug(preset.label) == wanted)
    }
}

fn slug(value: &str) -> String {
    value
        .to_ascii_lowercase()
        .replace('&', "and")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

impl FromStr for &'static RoiPreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoiPreset::find(s).ok_or_else(|| {
            let known: Vec<&str> = PRESETS.iter().map(|p| p.label).collect();
            DomainError::validation(format!(
                "unknown preset {s:?}; expected one of: {}",
                known.join(", ")
            ))
        })
    }
}

/// Calculator inputs. Fields are private so every write goes through clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRoiInputs")]
pub struct RoiInputs {
    monthly_orders: f64,
    average_order_value: f64,
    return_rate: f64,
}

/// Wire shape of [`RoiInputs`]; missing fields take the defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawRoiInputs {
    monthly_orders: f64,
    average_order_value: f64,
    return_rate: f64,
}

impl Default for RawRoiInputs {
    fn default() -> Self {
        let inputs = RoiInputs::default();
        Self {
            monthly_orders: inputs.monthly_orders,
            average_order_value: inputs.average_order_value,
            return_rate: inputs.return_rate,
        }
    }
}

impl From<RawRoiInputs> for RoiInputs {
    fn from(raw: RawRoiInputs) -> Self {
        RoiInputs::new(raw.monthly_orders, raw.average_order_value, raw.return_rate)
    }
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            monthly_orders: 350.0,
            average_order_value: 92.0,
            return_rate: 0.17,
        }
    }
}

impl RoiInputs {
    /// Build inputs, clamping each value. NaN falls back to the default.
    pub fn new(monthly_orders: f64, average_order_value: f64, return_rate: f64) -> Self {
        let mut inputs = Self::default();
        inputs.set_monthly_orders(monthly_orders);
        inputs.set_average_order_value(average_order_value);
        inputs.set_return_rate(return_rate);
        inputs
    }

    pub fn monthly_orders(&self) -> f64 {
        self.monthly_orders
    }

    pub fn average_order_value(&self) -> f64 {
        self.average_order_value
    }

    pub fn return_rate(&self) -> f64 {
        self.return_rate
    }

    /// Rounded and clamped to `[0, 2000]`.
    pub fn set_monthly_orders(&mut self, value: f64) {
        if !value.is_nan() {
            self.monthly_orders = value.round().clamp(0.0, MAX_MONTHLY_ORDERS);
        }
    }

    /// Rounded and clamped to `[0, 500]`.
    pub fn set_average_order_value(&mut self, value: f64) {
        if !value.is_nan() {
            self.average_order_value = value.round().clamp(0.0, MAX_AVERAGE_ORDER_VALUE);
        }
    }

    /// Clamped to `[0, 0.5]`, not rounded.
    pub fn set_return_rate(&mut self, value: f64) {
        if !value.is_nan() {
            self.return_rate = value.clamp(0.0, MAX_RETURN_RATE);
        }
    }

    pub fn apply_preset(&mut self, preset: &RoiPreset) {
        self.monthly_orders = preset.monthly_orders;
        self.average_order_value = preset.average_order_value;
        self.return_rate = preset.return_rate;
    }

    /// The preset whose values the inputs currently match, if any.
    pub fn active_preset(&self) -> Option<&'static RoiPreset> {
        PRESETS.iter().find(|preset| {
            preset.monthly_orders == self.monthly_orders
                && preset.average_order_value == self.average_order_value
                && (preset.return_rate - self.return_rate).abs() < PRESET_RATE_TOLERANCE
        })
    }

    pub fn forecast(&self) -> RoiForecast {
        forecast(self)
    }
}

/// Derived monthly figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiForecast {
    pub monthly_gross_sales: f64,
    pub current_return_loss: f64,
    pub refunds_prevented: f64,
    pub exchange_revenue: f64,
    pub total_reclaimed: f64,
    pub return_rate_after: f64,
    pub roi_multiple: f64,
    pub projected_reduction: f64,
    pub exchange_capture_rate: f64,
}

pub fn forecast(inputs: &RoiInputs) -> RoiForecast {
    let orders = inputs.monthly_orders;
    let aov = inputs.average_order_value;
    let rate = inputs.return_rate;

    let monthly_gross_sales = orders * aov;
    let current_return_loss = monthly_gross_sales * rate;
    let refunds_prevented = current_return_loss * PROJECTED_REDUCTION;
    let exchange_revenue = orders * rate * EXCHANGE_CAPTURE_RATE * aov;
    let total_reclaimed = refunds_prevented + exchange_revenue;
    let return_rate_after = (rate * (1.0 - PROJECTED_REDUCTION)).max(0.0);

    RoiForecast {
        monthly_gross_sales,
        current_return_loss,
        refunds_prevented,
        exchange_revenue,
        total_reclaimed,
        return_rate_after,
        roi_multiple: total_reclaimed / 100.0,
        projected_reduction: PROJECTED_REDUCTION,
        exchange_capture_rate: EXCHANGE_CAPTURE_RATE,
    }
}
