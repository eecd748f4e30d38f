//! Wizard state machine. `WizardState` carries exactly the data valid in its
//! step, and `Wizard::handle` is the only way to move between steps.

use shared::domain::{FiveWhysResult, RiskProfile};
use tracing::debug;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{RunId, WizardEvent};

pub const ANALYSIS_FALLBACK_MESSAGE: &str = "An unknown error occurred during analysis.";
pub const GENERATION_FALLBACK_MESSAGE: &str =
    "An unknown error occurred while generating statements.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Input,
    Analyzing,
    AnalysisComplete,
    Generating,
    StatementsComplete,
    Error,
}

impl WizardStep {
    pub fn is_busy(self) -> bool {
        matches!(self, WizardStep::Analyzing | WizardStep::Generating)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WizardState {
    #[default]
    Input,
    Analyzing {
        run: RunId,
        concern: String,
    },
    AnalysisComplete {
        concern: String,
        analysis: FiveWhysResult,
    },
    Generating {
        run: RunId,
        concern: String,
        analysis: FiveWhysResult,
    },
    StatementsComplete {
        concern: String,
        analysis: FiveWhysResult,
        risk_profile: RiskProfile,
    },
    Error {
        concern: String,
        message: String,
    },
}

impl WizardState {
    pub fn step(&self) -> WizardStep {
        match self {
            WizardState::Input => WizardStep::Input,
            WizardState::Analyzing { .. } => WizardStep::Analyzing,
            WizardState::AnalysisComplete { .. } => WizardStep::AnalysisComplete,
            WizardState::Generating { .. } => WizardStep::Generating,
            WizardState::StatementsComplete { .. } => WizardStep::StatementsComplete,
            WizardState::Error { .. } => WizardStep::Error,
        }
    }

    pub fn concern(&self) -> Option<&str> {
        match self {
            WizardState::Input => None,
            WizardState::Analyzing { concern, .. }
            | WizardState::AnalysisComplete { concern, .. }
            | WizardState::Generating { concern, .. }
            | WizardState::StatementsComplete { concern, .. }
            | WizardState::Error { concern, .. } => Some(concern),
        }
    }

    pub fn analysis(&self) -> Option<&FiveWhysResult> {
        match self {
            WizardState::AnalysisComplete { analysis, .. }
            | WizardState::Generating { analysis, .. }
            | WizardState::StatementsComplete { analysis, .. } => Some(analysis),
            _ => None,
        }
    }

    pub fn risk_profile(&self) -> Option<&RiskProfile> {
        match self {
            WizardState::StatementsComplete { risk_profile, .. } => Some(risk_profile),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            WizardState::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Wizard {
    state: WizardState,
    runs_started: u64,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Applies `event` and returns the backend call the transition starts.
    /// Events that are not valid in the current step leave the state as is.
    pub fn handle(&mut self, event: WizardEvent) -> Option<BackendCommand> {
        let current = std::mem::take(&mut self.state);
        let from = current.step();
        let event_name = event.name();

        let (next, command) = self.transition(current, event);
        if next.step() != from {
            debug!(from = ?from, to = ?next.step(), event = event_name, "wizard transition");
        }
        self.state = next;
        command
    }

    fn next_run(&mut self) -> RunId {
        self.runs_started += 1;
        RunId(self.runs_started)
    }

    fn transition(
        &mut self,
        state: WizardState,
        event: WizardEvent,
    ) -> (WizardState, Option<BackendCommand>) {
        match (state, event) {
            (_, WizardEvent::Reset) => (WizardState::Input, None),

            (WizardState::Input, WizardEvent::SubmitConcern(text)) => {
                let concern = text.trim();
                if concern.is_empty() {
                    debug!("rejecting blank concern");
                    return (WizardState::Input, None);
                }
                let run = self.next_run();
                let concern = concern.to_string();
                let command = BackendCommand::RunFiveWhys {
                    run,
                    concern: concern.clone(),
                };
                (WizardState::Analyzing { run, concern }, Some(command))
            }

            (
                WizardState::Analyzing { run, concern },
                WizardEvent::AnalysisSucceeded {
                    run: finished,
                    result,
                },
            ) if run == finished => (
                WizardState::AnalysisComplete {
                    concern,
                    analysis: result,
                },
                None,
            ),

            (
                WizardState::Analyzing { run, concern },
                WizardEvent::AnalysisFailed {
                    run: finished,
                    message,
                },
            ) if run == finished => (
                WizardState::Error {
                    concern,
                    message: failure_text(message, ANALYSIS_FALLBACK_MESSAGE),
                },
                None,
            ),

            (WizardState::AnalysisComplete { concern, analysis }, WizardEvent::GenerateRequested) => {
                let run = self.next_run();
                let command = BackendCommand::GenerateRiskDetails {
                    run,
                    root_cause: analysis.root_cause.clone(),
                    concern: concern.clone(),
                };
                (
                    WizardState::Generating {
                        run,
                        concern,
                        analysis,
                    },
                    Some(command),
                )
            }

            (
                WizardState::Generating {
                    run,
                    concern,
                    analysis,
                },
                WizardEvent::RiskDetailsSucceeded {
                    run: finished,
                    profile,
                },
            ) if run == finished => (
                WizardState::StatementsComplete {
                    concern,
                    analysis,
                    risk_profile: profile,
                },
                None,
            ),

            (
                WizardState::Generating { run, concern, .. },
                WizardEvent::RiskDetailsFailed {
                    run: finished,
                    message,
                },
            ) if run == finished => (
                WizardState::Error {
                    concern,
                    message: failure_text(message, GENERATION_FALLBACK_MESSAGE),
                },
                None,
            ),

            (state, event) => {
                debug!(
                    step = ?state.step(),
                    event = event.name(),
                    "ignoring event not valid in current step"
                );
                (state, None)
            }
        }
    }
}

fn failure_text(message: Option<String>, fallback: &str) -> String {
    match message {
        Some(message) if !message.trim().is_empty() => message,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
