//! Shopper return wizard as an explicit state machine.
//!
//! Steps run `FindOrder -> SelectItems -> ReturnReason -> ExchangeOption -> Success`.
//! Network calls (lookup, submit) stay in the driver; their outcomes come back
//! in as commands so every transition here is deterministic.

use returnshield_core::{FlowId, LineItemId, Order, StateMachine};
use serde::{Deserialize, Serialize};

use crate::context::{GiftDetails, WizardContext};
use crate::error::WizardError;
use crate::reason::{Resolution, ReturnReason};
use crate::refund::RefundQuote;
use crate::submission::{ReturnConfirmation, ReturnSubmission};

/// Wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    FindOrder,
    SelectItems,
    ReturnReason,
    ExchangeOption,
    Success,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::FindOrder,
        Step::SelectItems,
        Step::ReturnReason,
        Step::ExchangeOption,
        Step::Success,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::FindOrder => "find-order",
            Step::SelectItems => "select-items",
            Step::ReturnReason => "return-reason",
            Step::ExchangeOption => "exchange-option",
            Step::Success => "success",
        }
    }

    /// Step reached by the back control. `Success` and `FindOrder` have none.
    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::FindOrder | Step::Success => None,
            Step::SelectItems => Some(Step::FindOrder),
            Step::ReturnReason => Some(Step::SelectItems),
            Step::ExchangeOption => Some(Step::ReturnReason),
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::FindOrder => Some(Step::SelectItems),
            Step::SelectItems => Some(Step::ReturnReason),
            Step::ReturnReason => Some(Step::ExchangeOption),
            Step::ExchangeOption => Some(Step::Success),
            Step::Success => None,
        }
    }

    /// Entry guard: does `ctx` carry everything this step needs from upstream?
    pub fn guard(&self, ctx: &WizardContext) -> bool {
        match self {
            Step::FindOrder => true,
            Step::SelectItems => ctx.has_order(),
            Step::ReturnReason => ctx.has_items(),
            Step::ExchangeOption => ctx.has_reason(),
            Step::Success => ctx.has_reason() && ctx.resolution.is_some(),
        }
    }
}

impl core::fmt::Display for Step {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    /// The lookup endpoint returned an order.
    OrderFound {
        order: Order,
        gift: Option<GiftDetails>,
    },
    ToggleItem(LineItemId),
    ChooseReason(ReturnReason),
    ChooseResolution(Resolution),
    /// Advance to the next step once the current one is satisfied.
    Continue,
    /// Lock the wizard while the submit request is in flight.
    BeginSubmit,
    SubmissionSucceeded(ReturnConfirmation),
    SubmissionFailed(String),
    Back,
    /// Direct navigation (e.g. a deep link) to a step.
    Enter(Step),
    StartOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    OrderLoaded {
        order: Order,
        gift: Option<GiftDetails>,
    },
    ItemSelected(LineItemId),
    ItemDeselected(LineItemId),
    ReasonChosen(ReturnReason),
    ResolutionChosen(Resolution),
    StepEntered(Step),
    /// A guard failed; the wizard restarted at `FindOrder`.
    Redirected { requested: Step },
    SubmissionStarted(ReturnSubmission),
    SubmissionCompleted(ReturnConfirmation),
    SubmissionRejected(String),
    Restarted,
}

/// One run of the shopper return flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnWizard {
    id: FlowId,
    step: Step,
    context: WizardContext,
    submitting: bool,
    error: Option<String>,
    confirmation: Option<ReturnConfirmation>,
    version: u64,
}

impl ReturnWizard {
    pub fn new() -> Self {
        Self::with_id(FlowId::new())
    }

    pub fn with_id(id: FlowId) -> Self {
        Self {
            id,
            step: Step::FindOrder,
            context: WizardContext::default(),
            submitting: false,
            error: None,
            confirmation: None,
            version: 0,
        }
    }

    pub fn id(&self) -> FlowId {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn context(&self) -> &WizardContext {
        &self.context
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Inline error from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&ReturnConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn quote(&self) -> Option<RefundQuote> {
        self.context.quote()
    }

    /// Whether the forward control of the current step is enabled.
    pub fn can_continue(&self) -> bool {
        match self.step {
            Step::FindOrder => self.context.has_order(),
            Step::SelectItems => self.context.has_items(),
            Step::ReturnReason => self.context.has_reason(),
            Step::ExchangeOption | Step::Success => false,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.step == Step::ExchangeOption
            && !self.submitting
            && self.context.has_reason()
            && self.context.resolution.is_some()
    }
}

impl Default for ReturnWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine for ReturnWizard {
    type Command = WizardCommand;
    type Event = WizardEvent;
    type Error = WizardError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            WizardEvent::OrderLoaded { order, gift } => {
                let same_order = self.context.order.as_ref().map(|o| o.id) == Some(order.id);
                if !same_order {
                    self.context.selected_items.clear();
                    self.context.reason = None;
                    self.context.resolution = None;
                }
                self.context.order = Some(order.clone());
                self.context.gift = gift.clone();
                tracing::info!(flow_id = %self.id, order_id = %order.id, "order loaded");
            }
            WizardEvent::ItemSelected(id) => self.context.selected_items.insert(id.clone()),
            WizardEvent::ItemDeselected(id) => self.context.selected_items.remove(id),
            WizardEvent::ReasonChosen(reason) => self.context.reason = Some(*reason),
            WizardEvent::ResolutionChosen(resolution) => {
                self.context.resolution = Some(*resolution);
            }
            WizardEvent::StepEntered(step) => {
                tracing::info!(flow_id = %self.id, from = %self.step, to = %step, "wizard step");
                self.step = *step;
                self.error = None;
            }
            WizardEvent::Redirected { requested } => {
                tracing::info!(
                    flow_id = %self.id,
                    requested = %requested,
                    "missing upstream state, restarting at find-order"
                );
                self.step = Step::FindOrder;
                self.error = None;
            }
            WizardEvent::SubmissionStarted(_) => {
                self.submitting = true;
                self.error = None;
            }
            WizardEvent::SubmissionCompleted(confirmation) => {
                self.submitting = false;
                self.confirmation = Some(confirmation.clone());
            }
            WizardEvent::SubmissionRejected(message) => {
                tracing::warn!(flow_id = %self.id, error = %message, "return submission failed");
                self.submitting = false;
                self.error = Some(message.clone());
            }
            WizardEvent::Restarted => {
                tracing::info!(flow_id = %self.id, "wizard restarted");
                self.step = Step::FindOrder;
                self.context = WizardContext::default();
                self.submitting = false;
                self.error = None;
                self.confirmation = None;
            }
        }

        // +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            WizardCommand::OrderFound { order, gift } => self.handle_order_found(order, gift),
            WizardCommand::ToggleItem(id) => self.handle_toggle(id),
            WizardCommand::ChooseReason(reason) => self.handle_choose_reason(*reason),
            WizardCommand::ChooseResolution(resolution) => {
                self.handle_choose_resolution(*resolution)
            }
            WizardCommand::Continue => self.handle_continue(),
            WizardCommand::BeginSubmit => self.handle_begin_submit(),
            WizardCommand::SubmissionSucceeded(confirmation) => {
                self.handle_submission_succeeded(confirmation)
            }
            WizardCommand::SubmissionFailed(message) => self.handle_submission_failed(message),
            WizardCommand::Back => self.handle_back(),
            WizardCommand::Enter(step) => self.handle_enter(*step),
            WizardCommand::StartOver => self.handle_start_over(),
        }
    }
}

impl ReturnWizard {
    fn ensure_step(&self, expected: Step, target: Step) -> Result<(), WizardError> {
        if self.step != expected {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: target,
            });
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        Ok(())
    }

    fn handle_order_found(
        &self,
        order: &Order,
        gift: &Option<GiftDetails>,
    ) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_step(Step::FindOrder, Step::SelectItems)?;

        Ok(vec![
            WizardEvent::OrderLoaded {
                order: order.clone(),
                gift: gift.clone(),
            },
            WizardEvent::StepEntered(Step::SelectItems),
        ])
    }

    fn handle_toggle(&self, id: &LineItemId) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_step(Step::SelectItems, Step::SelectItems)?;
        let order = self.context.order.as_ref().ok_or(WizardError::MissingOrder)?;
        if !order.contains_item(id) {
            return Err(WizardError::UnknownItem(id.clone()));
        }

        let event = if self.context.selected_items.contains(id) {
            WizardEvent::ItemDeselected(id.clone())
        } else {
            WizardEvent::ItemSelected(id.clone())
        };
        Ok(vec![event])
    }

    fn handle_choose_reason(&self, reason: ReturnReason) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_step(Step::ReturnReason, Step::ReturnReason)?;
        Ok(vec![WizardEvent::ReasonChosen(reason)])
    }

    fn handle_choose_resolution(
        &self,
        resolution: Resolution,
    ) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_step(Step::ExchangeOption, Step::ExchangeOption)?;
        self.ensure_idle()?;
        Ok(vec![WizardEvent::ResolutionChosen(resolution)])
    }

    fn handle_continue(&self) -> Result<Vec<WizardEvent>, WizardError> {
        let next = match self.step {
            Step::FindOrder => {
                if !self.context.has_order() {
                    return Err(WizardError::MissingOrder);
                }
                Step::SelectItems
            }
            Step::SelectItems => {
                if !self.context.has_items() {
                    return Err(WizardError::NoItemsSelected);
                }
                Step::ReturnReason
            }
            Step::ReturnReason => {
                if self.context.reason.is_none() {
                    return Err(WizardError::MissingReason);
                }
                Step::ExchangeOption
            }
            // Leaving the resolution step goes through submission only.
            Step::ExchangeOption | Step::Success => {
                return Err(WizardError::InvalidTransition {
                    from: self.step,
                    to: self.step.next().unwrap_or(self.step),
                });
            }
        };
        Ok(vec![WizardEvent::StepEntered(next)])
    }

    fn handle_begin_submit(&self) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_step(Step::ExchangeOption, Step::Success)?;
        self.ensure_idle()?;
        let submission = self.context.submission()?;
        Ok(vec![WizardEvent::SubmissionStarted(submission)])
    }

    fn handle_submission_succeeded(
        &self,
        confirmation: &ReturnConfirmation,
    ) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_step(Step::ExchangeOption, Step::Success)?;
        if !self.submitting {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: Step::Success,
            });
        }
        Ok(vec![
            WizardEvent::SubmissionCompleted(confirmation.clone()),
            WizardEvent::StepEntered(Step::Success),
        ])
    }

    fn handle_submission_failed(&self, message: &str) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_step(Step::ExchangeOption, Step::ExchangeOption)?;
        if !self.submitting {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: Step::ExchangeOption,
            });
        }
        Ok(vec![WizardEvent::SubmissionRejected(message.to_string())])
    }

    fn handle_back(&self) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_idle()?;
        let previous = self.step.previous().ok_or(WizardError::InvalidTransition {
            from: self.step,
            to: Step::FindOrder,
        })?;
        Ok(vec![WizardEvent::StepEntered(previous)])
    }

    fn handle_enter(&self, target: Step) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_idle()?;
        if self.step == Step::Success && target != Step::Success {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: target,
            });
        }
        if !target.guard(&self.context) {
            return Ok(vec![WizardEvent::Redirected { requested: target }]);
        }
        if target > self.step {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: target,
            });
        }
        if target == self.step {
            return Ok(Vec::new());
        }
        Ok(vec![WizardEvent::StepEntered(target)])
    }

    fn handle_start_over(&self) -> Result<Vec<WizardEvent>, WizardError> {
        self.ensure_idle()?;
        Ok(vec![WizardEvent::Restarted])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use returnshield_core::{LineItem, OrderId, ReturnId};
    use rust_decimal::Decimal;

    fn test_order(id: i64) -> Order {
        Order {
            id: OrderId::new(id),
            order_number: format!("#{}", 1000 + id),
            created_at: "2024-03-01T10:00:00Z".to_string(),
            currency: "USD".to_string(),
            items: vec![
                LineItem {
                    line_item_id: LineItemId::new("a"),
                    title: "Linen shirt".to_string(),
                    price: Decimal::new(4000, 2),
                    quantity: 2,
                    sku: "SHIRT-L".to_string(),
                    variant_title: Some("L".to_string()),
                },
                LineItem {
                    line_item_id: LineItemId::new("b"),
                    title: "Belt".to_string(),
                    price: Decimal::new(1500, 2),
                    quantity: 1,
                    sku: "BELT".to_string(),
                    variant_title: None,
                },
            ],
        }
    }

    fn confirmation() -> ReturnConfirmation {
        ReturnConfirmation {
            id: ReturnId::new(77),
            message: "Return created".to_string(),
            label_url: None,
        }
    }

    fn found(id: i64) -> WizardCommand {
        WizardCommand::OrderFound {
            order: test_order(id),
            gift: None,
        }
    }

    /// Wizard sitting on `ExchangeOption` with item `a` and a reason chosen.
    fn wizard_at_resolution() -> ReturnWizard {
        let mut wizard = ReturnWizard::new();
        wizard.execute(&found(1)).unwrap();
        wizard.execute(&WizardCommand::ToggleItem(LineItemId::new("a"))).unwrap();
        wizard.execute(&WizardCommand::Continue).unwrap();
        wizard
            .execute(&WizardCommand::ChooseReason(ReturnReason::SizeTooSmall))
            .unwrap();
        wizard.execute(&WizardCommand::Continue).unwrap();
        wizard
    }

    #[test]
    fn happy_path_reaches_success() {
        let mut wizard = wizard_at_resolution();
        assert_eq!(wizard.step(), Step::ExchangeOption);
        assert!(!wizard.can_submit());

        wizard
            .execute(&WizardCommand::ChooseResolution(Resolution::Exchange))
            .unwrap();
        assert!(wizard.can_submit());

        let events = wizard.execute(&WizardCommand::BeginSubmit).unwrap();
        match &events[0] {
            WizardEvent::SubmissionStarted(body) => {
                assert_eq!(body.items, vec![LineItemId::new("a")]);
                assert_eq!(body.reason, ReturnReason::SizeTooSmall);
                assert_eq!(body.resolution, Resolution::Exchange);
            }
            other => panic!("expected SubmissionStarted, got {other:?}"),
        }
        assert!(wizard.is_submitting());
        assert!(!wizard.can_submit());

        wizard
            .execute(&WizardCommand::SubmissionSucceeded(confirmation()))
            .unwrap();
        assert_eq!(wizard.step(), Step::Success);
        assert_eq!(wizard.confirmation().unwrap().id, ReturnId::new(77));
    }

    #[test]
    fn submit_is_rejected_until_resolution_chosen() {
        let wizard = wizard_at_resolution();
        let err = wizard.handle(&WizardCommand::BeginSubmit).unwrap_err();
        assert_eq!(err, WizardError::MissingResolution);
    }

    #[test]
    fn double_submit_is_rejected_while_in_flight() {
        let mut wizard = wizard_at_resolution();
        wizard
            .execute(&WizardCommand::ChooseResolution(Resolution::Refund))
            .unwrap();
        wizard.execute(&WizardCommand::BeginSubmit).unwrap();

        assert_eq!(
            wizard.handle(&WizardCommand::BeginSubmit).unwrap_err(),
            WizardError::SubmissionInFlight
        );
        assert_eq!(
            wizard.handle(&WizardCommand::Back).unwrap_err(),
            WizardError::SubmissionInFlight
        );
    }

    #[test]
    fn failed_submission_stays_and_reenables_submit() {
        let mut wizard = wizard_at_resolution();
        wizard
            .execute(&WizardCommand::ChooseResolution(Resolution::Refund))
            .unwrap();
        wizard.execute(&WizardCommand::BeginSubmit).unwrap();
        wizard
            .execute(&WizardCommand::SubmissionFailed("Return window closed".to_string()))
            .unwrap();

        assert_eq!(wizard.step(), Step::ExchangeOption);
        assert_eq!(wizard.error(), Some("Return window closed"));
        assert!(wizard.can_submit());

        wizard.execute(&WizardCommand::BeginSubmit).unwrap();
        assert_eq!(wizard.error(), None);
    }

    #[test]
    fn back_then_forward_keeps_accumulated_context() {
        let mut wizard = wizard_at_resolution();
        wizard
            .execute(&WizardCommand::ChooseResolution(Resolution::Exchange))
            .unwrap();

        wizard.execute(&WizardCommand::Back).unwrap();
        wizard.execute(&WizardCommand::Back).unwrap();
        wizard.execute(&WizardCommand::Back).unwrap();
        assert_eq!(wizard.step(), Step::FindOrder);

        wizard.execute(&WizardCommand::Continue).unwrap();
        wizard.execute(&WizardCommand::Continue).unwrap();
        wizard.execute(&WizardCommand::Continue).unwrap();

        assert_eq!(wizard.step(), Step::ExchangeOption);
        let ctx = wizard.context();
        assert!(ctx.selected_items.contains(&LineItemId::new("a")));
        assert_eq!(ctx.reason, Some(ReturnReason::SizeTooSmall));
        assert_eq!(ctx.resolution, Some(Resolution::Exchange));
        assert!(wizard.can_submit());
    }

    #[test]
    fn relooking_up_the_same_order_keeps_selections() {
        let mut wizard = wizard_at_resolution();
        wizard.execute(&WizardCommand::Back).unwrap();
        wizard.execute(&WizardCommand::Back).unwrap();
        wizard.execute(&WizardCommand::Back).unwrap();

        wizard.execute(&found(1)).unwrap();
        assert_eq!(wizard.context().selected_items.len(), 1);

        wizard.execute(&WizardCommand::Back).unwrap();
        wizard.execute(&found(2)).unwrap();
        assert!(wizard.context().selected_items.is_empty());
        assert_eq!(wizard.context().reason, None);
    }

    #[test]
    fn continue_requires_selection_and_reason() {
        let mut wizard = ReturnWizard::new();
        assert_eq!(
            wizard.handle(&WizardCommand::Continue).unwrap_err(),
            WizardError::MissingOrder
        );

        wizard.execute(&found(1)).unwrap();
        assert!(!wizard.can_continue());
        assert_eq!(
            wizard.handle(&WizardCommand::Continue).unwrap_err(),
            WizardError::NoItemsSelected
        );

        wizard.execute(&WizardCommand::ToggleItem(LineItemId::new("b"))).unwrap();
        wizard.execute(&WizardCommand::Continue).unwrap();
        assert_eq!(
            wizard.handle(&WizardCommand::Continue).unwrap_err(),
            WizardError::MissingReason
        );
    }

    #[test]
    fn toggling_unknown_item_is_rejected() {
        let mut wizard = ReturnWizard::new();
        wizard.execute(&found(1)).unwrap();

        let err = wizard
            .handle(&WizardCommand::ToggleItem(LineItemId::new("zzz")))
            .unwrap_err();
        assert_eq!(err, WizardError::UnknownItem(LineItemId::new("zzz")));
    }

    #[test]
    fn direct_entry_without_upstream_state_redirects() {
        for target in [Step::SelectItems, Step::ReturnReason, Step::ExchangeOption] {
            let mut wizard = ReturnWizard::new();
            let events = wizard.execute(&WizardCommand::Enter(target)).unwrap();

            assert_eq!(events, vec![WizardEvent::Redirected { requested: target }]);
            assert_eq!(wizard.step(), Step::FindOrder);
        }
    }

    #[test]
    fn direct_entry_cannot_skip_forward() {
        let mut wizard = ReturnWizard::new();
        wizard.execute(&found(1)).unwrap();
        wizard.execute(&WizardCommand::ToggleItem(LineItemId::new("a"))).unwrap();

        let err = wizard
            .handle(&WizardCommand::Enter(Step::ReturnReason))
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidTransition {
                from: Step::SelectItems,
                to: Step::ReturnReason,
            }
        );
    }

    #[test]
    fn success_is_terminal_until_start_over() {
        let mut wizard = wizard_at_resolution();
        wizard
            .execute(&WizardCommand::ChooseResolution(Resolution::Exchange))
            .unwrap();
        wizard.execute(&WizardCommand::BeginSubmit).unwrap();
        wizard
            .execute(&WizardCommand::SubmissionSucceeded(confirmation()))
            .unwrap();

        assert!(wizard.handle(&WizardCommand::Back).is_err());
        assert!(wizard.handle(&WizardCommand::Enter(Step::FindOrder)).is_err());

        wizard.execute(&WizardCommand::StartOver).unwrap();
        assert_eq!(wizard.step(), Step::FindOrder);
        assert_eq!(wizard.context(), &WizardContext::default());
        assert!(wizard.confirmation().is_none());
    }

    #[test]
    fn quote_tracks_selection() {
        let mut wizard = ReturnWizard::new();
        wizard.execute(&found(1)).unwrap();
        wizard.execute(&WizardCommand::ToggleItem(LineItemId::new("a"))).unwrap();
        wizard.execute(&WizardCommand::ToggleItem(LineItemId::new("b"))).unwrap();

        let quote = wizard.quote().unwrap();
        assert_eq!(quote.refund_amount, Decimal::new(5500, 2));
        assert_eq!(quote.bonus_amount, Decimal::new(60500, 3));
    }

    fn arb_command() -> impl Strategy<Value = WizardCommand> {
        let step = prop::sample::select(Step::ALL.to_vec());
        let reason = prop::sample::select(ReturnReason::ALL.to_vec());
        let item = prop::sample::select(vec!["a", "b", "c"]);
        let data = prop_oneof![
            (1i64..3).prop_map(found),
            item.prop_map(|id| WizardCommand::ToggleItem(LineItemId::new(id))),
            reason.prop_map(WizardCommand::ChooseReason),
            prop_oneof![Just(Resolution::Exchange), Just(Resolution::Refund)]
                .prop_map(WizardCommand::ChooseResolution),
        ];
        let navigation = prop_oneof![
            Just(WizardCommand::Continue),
            Just(WizardCommand::BeginSubmit),
            Just(WizardCommand::SubmissionSucceeded(confirmation())),
            Just(WizardCommand::SubmissionFailed("nope".to_string())),
            Just(WizardCommand::Back),
            step.prop_map(WizardCommand::Enter),
            Just(WizardCommand::StartOver),
        ];
        prop_oneof![data, navigation]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: whatever the command sequence, the current step's guard
        /// holds, selections stay within the order, and version counts events.
        #[test]
        fn wizard_invariants_hold(commands in prop::collection::vec(arb_command(), 0..40)) {
            let mut wizard = ReturnWizard::new();
            let mut applied = 0u64;

            for command in &commands {
                let before = wizard.clone();
                match wizard.execute(command) {
                    Ok(events) => applied += events.len() as u64,
                    Err(_) => prop_assert_eq!(&wizard, &before),
                }

                prop_assert!(wizard.step().guard(wizard.context()));
                if let Some(order) = &wizard.context().order {
                    for id in wizard.context().selected_items.iter() {
                        prop_assert!(order.contains_item(id));
                    }
                }
                if wizard.step() == Step::Success {
                    prop_assert!(wizard.confirmation().is_some());
                }
            }

            prop_assert_eq!(wizard.version(), applied);
        }
    }
}
