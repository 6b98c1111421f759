//! Drives the return wizard against the shopper endpoints.
//!
//! The wizard itself is pure; this type performs the lookup and submit calls
//! and feeds their outcomes back in as commands.

use returnshield_core::{LineItemId, Order, StateMachine};
use returnshield_returns::{
    GiftDetails, LookupRequest, Resolution, ReturnConfirmation, ReturnReason, ReturnWizard,
    RouteResolution, Step, WizardCommand, WizardError, WizardEvent, resolve,
};
use thiserror::Error;

use crate::error::ApiError;
use crate::http::ApiClient;

pub const LOOKUP_FALLBACK_MESSAGE: &str = "Failed to find order";
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit return";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopperError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("{0}")]
    Lookup(String),

    #[error("{0}")]
    Submit(String),
}

#[derive(Debug, Clone)]
pub struct ShopperFlow {
    api: ApiClient,
    wizard: ReturnWizard,
}

impl ShopperFlow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            wizard: ReturnWizard::new(),
        }
    }

    pub fn wizard(&self) -> &ReturnWizard {
        &self.wizard
    }

    pub fn step(&self) -> Step {
        self.wizard.step()
    }

    /// Find the order and move on to item selection.
    pub async fn lookup(&mut self, request: LookupRequest) -> Result<&Order, ShopperError> {
        if self.wizard.step() != Step::FindOrder {
            return Err(WizardError::InvalidTransition {
                from: self.wizard.step(),
                to: Step::SelectItems,
            }
            .into());
        }

        let gift = request.is_gift.unwrap_or(false).then(|| GiftDetails {
            recipient_email: Some(request.email.clone()),
        });

        let order = self.api.lookup_order(&request).await.map_err(|err| {
            tracing::warn!(order_number = %request.order_number, error = %err, "order lookup failed");
            ShopperError::Lookup(err.message_or(LOOKUP_FALLBACK_MESSAGE))
        })?;

        self.wizard
            .execute(&WizardCommand::OrderFound { order, gift })?;
        self.wizard
            .context()
            .order
            .as_ref()
            .ok_or(ShopperError::Wizard(WizardError::MissingOrder))
    }

    /// Returns whether the item is now selected.
    pub fn toggle_item(&mut self, id: impl Into<LineItemId>) -> Result<bool, ShopperError> {
        let id = id.into();
        let events = self.wizard.execute(&WizardCommand::ToggleItem(id))?;
        Ok(matches!(events.first(), Some(WizardEvent::ItemSelected(_))))
    }

    pub fn choose_reason(&mut self, reason: ReturnReason) -> Result<(), ShopperError> {
        self.wizard.execute(&WizardCommand::ChooseReason(reason))?;
        Ok(())
    }

    pub fn choose_resolution(&mut self, resolution: Resolution) -> Result<(), ShopperError> {
        self.wizard
            .execute(&WizardCommand::ChooseResolution(resolution))?;
        Ok(())
    }

    pub fn continue_to_next(&mut self) -> Result<Step, ShopperError> {
        self.wizard.execute(&WizardCommand::Continue)?;
        Ok(self.wizard.step())
    }

    pub fn back(&mut self) -> Result<Step, ShopperError> {
        self.wizard.execute(&WizardCommand::Back)?;
        Ok(self.wizard.step())
    }

    /// Navigate by path. Unknown paths and unmet guards land on `/`.
    pub fn enter(&mut self, path: &str) -> Result<RouteResolution, ShopperError> {
        let resolution = resolve(path, self.wizard.context());
        let target = Step::from_path(path).unwrap_or(Step::FindOrder);
        self.wizard.execute(&WizardCommand::Enter(target))?;
        Ok(resolution)
    }

    /// Submit the return. On failure the wizard stays on the resolution step
    /// with the message recorded and submit re-enabled.
    pub async fn submit(&mut self) -> Result<&ReturnConfirmation, ShopperError> {
        let events = self.wizard.execute(&WizardCommand::BeginSubmit)?;
        let Some(WizardEvent::SubmissionStarted(submission)) = events.into_iter().next() else {
            return Err(ShopperError::Wizard(WizardError::MissingResolution));
        };

        match self.api.submit_return(&submission).await {
            Ok(confirmation) => {
                tracing::info!(return_id = %confirmation.id, "return submitted");
                self.wizard
                    .execute(&WizardCommand::SubmissionSucceeded(confirmation))?;
                self.wizard
                    .confirmation()
                    .ok_or(ShopperError::Wizard(WizardError::MissingResolution))
            }
            Err(err) => {
                let message = submit_error_message(&err);
                self.wizard
                    .execute(&WizardCommand::SubmissionFailed(message.clone()))?;
                Err(ShopperError::Submit(message))
            }
        }
    }

    pub fn start_over(&mut self) -> Result<(), ShopperError> {
        self.wizard.execute(&WizardCommand::StartOver)?;
        Ok(())
    }
}

fn submit_error_message(err: &ApiError) -> String {
    err.message_or(SUBMIT_FALLBACK_MESSAGE)
}
