//! UI/backend events consumed by the wizard controller.

use shared::domain::{FiveWhysResult, RiskProfile};

/// Identifies one analysis or generation call so a late outcome from a run
/// abandoned by reset cannot land in a newer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    SubmitConcern(String),
    AnalysisSucceeded {
        run: RunId,
        result: FiveWhysResult,
    },
    AnalysisFailed {
        run: RunId,
        message: Option<String>,
    },
    GenerateRequested,
    RiskDetailsSucceeded {
        run: RunId,
        profile: RiskProfile,
    },
    RiskDetailsFailed {
        run: RunId,
        message: Option<String>,
    },
    Reset,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SubmitConcern(_) => "submit_concern",
            WizardEvent::AnalysisSucceeded { .. } => "analysis_succeeded",
            WizardEvent::AnalysisFailed { .. } => "analysis_failed",
            WizardEvent::GenerateRequested => "generate_requested",
            WizardEvent::RiskDetailsSucceeded { .. } => "risk_details_succeeded",
            WizardEvent::RiskDetailsFailed { .. } => "risk_details_failed",
            WizardEvent::Reset => "reset",
        }
    }
}

pub enum UiEvent {
    Status(String),
    Wizard(WizardEvent),
}
