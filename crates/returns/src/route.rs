//! Mapping between wizard steps and shopper-facing paths.

use crate::context::WizardContext;
use crate::wizard::Step;

impl Step {
    pub fn path(&self) -> &'static str {
        match self {
            Step::FindOrder => "/",
            Step::SelectItems => "/select-items",
            Step::ReturnReason => "/return-reason",
            Step::ExchangeOption => "/exchange-option",
            Step::Success => "/success",
        }
    }

    /// Parse a path. A trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Step> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Step::ALL.into_iter().find(|step| step.path() == normalized)
    }
}

/// Result of resolving a requested path against the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteResolution {
    pub step: Step,
    /// The requested path was unknown or its guard failed.
    pub redirected: bool,
}

impl RouteResolution {
    pub fn path(&self) -> &'static str {
        self.step.path()
    }
}

/// Resolve `path` for a shopper holding `ctx`.
///
/// Unknown paths and paths whose upstream state is missing land on `/`.
pub fn resolve(path: &str, ctx: &WizardContext) -> RouteResolution {
    match Step::from_path(path) {
        Some(step) if step.guard(ctx) => RouteResolution {
            step,
            redirected: false,
        },
        _ => {
            tracing::debug!(path, "route redirected to find-order");
            RouteResolution {
                step: Step::FindOrder,
                redirected: true,
            }
        }
    }
}
