use returnshield_core::LineItemId;
use thiserror::Error;

use crate::wizard::Step;

/// Client-side validation failures of the return wizard.
///
/// None of these reach the backend; the driver shows them inline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("no order has been looked up")]
    MissingOrder,

    #[error("select at least one item to return")]
    NoItemsSelected,

    #[error("choose a reason for the return")]
    MissingReason,

    #[error("choose how you would like to resolve the return")]
    MissingResolution,

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("item {0} is not part of this order")]
    UnknownItem(LineItemId),

    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: Step, to: Step },
}
