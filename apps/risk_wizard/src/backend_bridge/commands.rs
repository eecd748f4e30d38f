//! Backend commands queued from UI to backend worker.

use crate::controller::events::{RunId, WizardEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    RunFiveWhys {
        run: RunId,
        concern: String,
    },
    GenerateRiskDetails {
        run: RunId,
        root_cause: String,
        concern: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::RunFiveWhys { .. } => "run_five_whys",
            BackendCommand::GenerateRiskDetails { .. } => "generate_risk_details",
        }
    }

    pub fn run(&self) -> RunId {
        match self {
            BackendCommand::RunFiveWhys { run, .. }
            | BackendCommand::GenerateRiskDetails { run, .. } => *run,
        }
    }

    /// The event reporting this command as failed.
    pub fn failed(&self, message: impl Into<String>) -> WizardEvent {
        let message = Some(message.into());
        match self {
            BackendCommand::RunFiveWhys { run, .. } => WizardEvent::AnalysisFailed {
                run: *run,
                message,
            },
            BackendCommand::GenerateRiskDetails { run, .. } => WizardEvent::RiskDetailsFailed {
                run: *run,
                message,
            },
        }
    }
}
