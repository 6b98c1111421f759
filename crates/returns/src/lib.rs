//! `returnshield-returns`: shopper return wizard.
//!
//! Pure logic only: the wizard state machine, its context, the route guard and
//! refund arithmetic. The HTTP driver lives in `returnshield-client`.

pub mod context;
pub mod error;
pub mod reason;
pub mod refund;
pub mod route;
pub mod selection;
pub mod submission;
pub mod wizard;

pub use context::{GiftDetails, WizardContext};
pub use error::WizardError;
pub use reason::{Resolution, ReturnReason};
pub use refund::{EXCHANGE_BONUS_RATE, RefundQuote, bonus_amount, refund_amount};
pub use route::{RouteResolution, resolve};
pub use selection::SelectedItems;
pub use submission::{LookupRequest, ReturnConfirmation, ReturnSubmission};
pub use wizard::{ReturnWizard, Step, WizardCommand, WizardEvent};
