//! Guided dashboard walkthrough and the section gate it drives.
//!
//! Trial operators who have not finished the tour see each dashboard section
//! as a preview until the tour reveals it. Shopify-connected trial stores see
//! revealed sections blurred until they pick a plan.

use std::collections::BTreeSet;

use returnshield_auth::{SubscriptionTier, UserProfile};
use returnshield_core::StateMachine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{SessionError, SessionManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardSection {
    Summary,
    Returnless,
    Coach,
    Vip,
    Plan,
}

impl DashboardSection {
    /// Tour order.
    pub const ALL: [DashboardSection; 5] = [
        DashboardSection::Summary,
        DashboardSection::Returnless,
        DashboardSection::Coach,
        DashboardSection::Vip,
        DashboardSection::Plan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardSection::Summary => "summary",
            DashboardSection::Returnless => "returnless",
            DashboardSection::Coach => "coach",
            DashboardSection::Vip => "vip",
            DashboardSection::Plan => "plan",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardSection::Summary => "Start with the ROI snapshot",
            DashboardSection::Returnless => "Inspect returnless intelligence",
            DashboardSection::Coach => "Queue up AI Exchange Coach plays",
            DashboardSection::Vip => "Prioritise VIP resolution tickets",
            DashboardSection::Plan => "Pick the package that unlocks live data",
        }
    }

    pub fn cta_label(&self) -> &'static str {
        match self {
            DashboardSection::Summary => "Reveal ROI snapshot",
            DashboardSection::Returnless => "Reveal returnless intelligence",
            DashboardSection::Coach => "Reveal AI Exchange Coach",
            DashboardSection::Vip => "Reveal VIP queue",
            DashboardSection::Plan => "Choose my package",
        }
    }

    fn next(&self) -> DashboardSection {
        let i = (self.index() + 1).min(Self::ALL.len() - 1);
        Self::ALL[i]
    }
}

impl core::fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a dashboard section renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    Open,
    /// Real data, obscured until a plan is chosen.
    Blurred,
    /// Sample content until the tour reaches the section.
    Preview,
}

/// The parts of a profile the gate depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub is_trial: bool,
    pub has_completed_walkthrough: bool,
    pub has_shopify_store: bool,
}

impl From<&UserProfile> for Viewer {
    fn from(user: &UserProfile) -> Self {
        Self {
            is_trial: user.subscription_status == SubscriptionTier::Trial,
            has_completed_walkthrough: user.has_completed_walkthrough,
            has_shopify_store: user.has_shopify_store,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WalkthroughError {
    #[error("the walkthrough is only available during the trial")]
    NotOnTrial,

    #[error("the walkthrough is not running")]
    NotActive,

    #[error("the walkthrough can only finish from the plan step")]
    NotAtFinalStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkthroughCommand {
    /// The signed-in profile changed (or went away).
    SyncViewer(Option<Viewer>),
    Start,
    /// Reveal the current section and move on.
    Advance,
    /// The backend recorded completion.
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkthroughEvent {
    ViewerChanged(Option<Viewer>),
    Started,
    Revealed(DashboardSection),
    MovedTo(DashboardSection),
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardWalkthrough {
    viewer: Option<Viewer>,
    active: bool,
    current: usize,
    revealed: BTreeSet<DashboardSection>,
    version: u64,
}

impl DashboardWalkthrough {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(user: Option<&UserProfile>) -> Self {
        let mut tour = Self::new();
        tour.apply(&WalkthroughEvent::ViewerChanged(user.map(Viewer::from)));
        tour.version = 0;
        tour
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_section(&self) -> DashboardSection {
        DashboardSection::ALL[self.current.min(DashboardSection::ALL.len() - 1)]
    }

    pub fn step_number(&self) -> usize {
        self.current + 1
    }

    fn is_trial(&self) -> bool {
        self.viewer.is_some_and(|v| v.is_trial)
    }

    fn is_complete(&self) -> bool {
        self.viewer.is_some_and(|v| v.has_completed_walkthrough)
    }

    fn is_paid(&self) -> bool {
        self.viewer.is_some_and(|v| !v.is_trial)
    }

    pub fn can_start(&self) -> bool {
        self.is_trial() && !self.is_complete() && !self.active
    }

    pub fn is_revealed(&self, section: DashboardSection) -> bool {
        !self.is_trial() || self.is_complete() || self.revealed.contains(&section)
    }

    pub fn gate_mode(&self, section: DashboardSection) -> GateMode {
        if !self.is_revealed(section) {
            return GateMode::Preview;
        }
        let has_shopify = self.viewer.is_some_and(|v| v.has_shopify_store);
        if has_shopify && !self.is_paid() && section != DashboardSection::Plan {
            return GateMode::Blurred;
        }
        GateMode::Open
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Command handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_advance(&self) -> Result<Vec<WalkthroughEvent>, WalkthroughError> {
        if !self.active {
            return Err(WalkthroughError::NotActive);
        }
        let section = self.current_section();
        let mut events = Vec::new();
        if !self.revealed.contains(&section) {
            events.push(WalkthroughEvent::Revealed(section));
        }
        if section != DashboardSection::Plan {
            events.push(WalkthroughEvent::MovedTo(section.next()));
        }
        Ok(events)
    }

    fn handle_complete(&self) -> Result<Vec<WalkthroughEvent>, WalkthroughError> {
        if !self.active {
            return Err(WalkthroughError::NotActive);
        }
        if self.current_section() != DashboardSection::Plan {
            return Err(WalkthroughError::NotAtFinalStep);
        }
        Ok(vec![WalkthroughEvent::Completed])
    }
}

impl StateMachine for DashboardWalkthrough {
    type Command = WalkthroughCommand;
    type Event = WalkthroughEvent;
    type Error = WalkthroughError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            WalkthroughEvent::ViewerChanged(viewer) => {
                self.viewer = *viewer;
                match viewer {
                    None => {
                        self.active = false;
                        self.revealed.clear();
                    }
                    Some(v) if v.is_trial && !v.has_completed_walkthrough => {
                        self.active = true;
                        self.current = 0;
                        self.revealed.clear();
                    }
                    Some(_) => {
                        self.active = false;
                        self.revealed = DashboardSection::ALL.into_iter().collect();
                    }
                }
            }
            WalkthroughEvent::Started => {
                self.active = true;
                self.current = 0;
                self.revealed.clear();
                tracing::info!("walkthrough started");
            }
            WalkthroughEvent::Revealed(section) => {
                self.revealed.insert(*section);
            }
            WalkthroughEvent::MovedTo(section) => {
                self.current = section.index();
            }
            WalkthroughEvent::Completed => {
                self.active = false;
                self.revealed = DashboardSection::ALL.into_iter().collect();
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.has_completed_walkthrough = true;
                }
                tracing::info!("walkthrough completed");
            }
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            WalkthroughCommand::SyncViewer(viewer) => {
                if *viewer == self.viewer {
                    Ok(vec![])
                } else {
                    Ok(vec![WalkthroughEvent::ViewerChanged(*viewer)])
                }
            }
            WalkthroughCommand::Start => {
                if !self.is_trial() {
                    return Err(WalkthroughError::NotOnTrial);
                }
                Ok(vec![WalkthroughEvent::Started])
            }
            WalkthroughCommand::Advance => self.handle_advance(),
            WalkthroughCommand::Complete => self.handle_complete(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AdvanceError {
    #[error(transparent)]
    Walkthrough(#[from] WalkthroughError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Advance the tour. From the plan step this records completion with the
/// backend first; the tour stays on the plan step if that call fails.
///
/// Returns the section now in focus, or `None` once the tour is finished.
pub async fn advance(
    tour: &mut DashboardWalkthrough,
    session: &SessionManager,
) -> Result<Option<DashboardSection>, AdvanceError> {
    let finishing = tour.is_active() && tour.current_section() == DashboardSection::Plan;
    tour.execute(&WalkthroughCommand::Advance)?;

    if !finishing {
        return Ok(Some(tour.current_section()));
    }

    session.complete_walkthrough(true).await?;
    tour.execute(&WalkthroughCommand::Complete)?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(shopify: bool) -> Viewer {
        Viewer {
            is_trial: true,
            has_completed_walkthrough: false,
            has_shopify_store: shopify,
        }
    }

    fn tour_for(viewer: Option<Viewer>) -> DashboardWalkthrough {
        let mut tour = DashboardWalkthrough::new();
        tour.execute(&WalkthroughCommand::SyncViewer(viewer)).unwrap();
        tour
    }

    #[test]
    fn new_trial_operator_starts_with_everything_in_preview() {
        let tour = tour_for(Some(trial(false)));
        assert!(tour.is_active());
        assert_eq!(tour.current_section(), DashboardSection::Summary);
        for section in DashboardSection::ALL {
            assert_eq!(tour.gate_mode(section), GateMode::Preview);
        }
    }

    #[test]
    fn paid_operator_sees_everything_open() {
        let tour = tour_for(Some(Viewer {
            is_trial: false,
            has_completed_walkthrough: false,
            has_shopify_store: true,
        }));
        assert!(!tour.is_active());
        for section in DashboardSection::ALL {
            assert_eq!(tour.gate_mode(section), GateMode::Open);
        }
    }

    #[test]
    fn shopify_trial_reveals_blurred_except_plan() {
        let mut tour = tour_for(Some(trial(true)));
        tour.execute(&WalkthroughCommand::Advance).unwrap();

        assert_eq!(tour.gate_mode(DashboardSection::Summary), GateMode::Blurred);
        assert_eq!(tour.gate_mode(DashboardSection::Returnless), GateMode::Preview);
        assert_eq!(tour.current_section(), DashboardSection::Returnless);

        for _ in 0..3 {
            tour.execute(&WalkthroughCommand::Advance).unwrap();
        }
        assert_eq!(tour.current_section(), DashboardSection::Plan);
        tour.execute(&WalkthroughCommand::Advance).unwrap();
        assert_eq!(tour.gate_mode(DashboardSection::Plan), GateMode::Open);
        assert!(tour.is_active());
    }

    #[test]
    fn complete_only_from_plan_and_reveals_all() {
        let mut tour = tour_for(Some(trial(false)));
        assert_eq!(
            tour.execute(&WalkthroughCommand::Complete).unwrap_err(),
            WalkthroughError::NotAtFinalStep
        );

        for _ in 0..5 {
            tour.execute(&WalkthroughCommand::Advance).unwrap();
        }
        tour.execute(&WalkthroughCommand::Complete).unwrap();

        assert!(!tour.is_active());
        assert!(!tour.can_start());
        assert!(DashboardSection::ALL.iter().all(|s| tour.is_revealed(*s)));
    }

    #[test]
    fn start_requires_trial() {
        let mut tour = tour_for(Some(Viewer {
            is_trial: false,
            has_completed_walkthrough: true,
            has_shopify_store: false,
        }));
        assert_eq!(
            tour.execute(&WalkthroughCommand::Start).unwrap_err(),
            WalkthroughError::NotOnTrial
        );
        assert_eq!(
            tour.execute(&WalkthroughCommand::Advance).unwrap_err(),
            WalkthroughError::NotActive
        );
    }

    #[test]
    fn signed_out_viewer_hides_nothing() {
        let tour = tour_for(None);
        assert!(!tour.is_active());
        assert_eq!(tour.gate_mode(DashboardSection::Vip), GateMode::Open);
    }

    #[test]
    fn unchanged_viewer_does_not_reset_progress() {
        let mut tour = tour_for(Some(trial(false)));
        tour.execute(&WalkthroughCommand::Advance).unwrap();
        let events = tour
            .execute(&WalkthroughCommand::SyncViewer(Some(trial(false))))
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(tour.current_section(), DashboardSection::Returnless);
    }
}
