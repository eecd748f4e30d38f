//! Backend worker: owns the async runtime and runs one analysis call at a time.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{build_http_client, AnalysisService, GeminiClient, RelayClient};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{Settings, TransportTarget};
use crate::controller::events::{UiEvent, WizardEvent};

/// Picks the analysis binding from configuration. Nothing downstream knows
/// which one it got.
pub fn build_analysis_service(settings: &Settings) -> anyhow::Result<Arc<dyn AnalysisService>> {
    let http = build_http_client(settings.request_timeout()).context("failed to build HTTP client")?;

    match settings.transport_target()? {
        TransportTarget::Direct {
            api_key,
            base_url,
            model,
        } => {
            info!(model = %model, "using direct provider transport");
            Ok(Arc::new(
                GeminiClient::new(http, api_key)
                    .with_base_url(base_url)
                    .with_model(model),
            ))
        }
        TransportTarget::Relay { endpoint } => {
            info!(endpoint = %endpoint, "using relay transport");
            Ok(Arc::new(RelayClient::new(http, endpoint)))
        }
    }
}

pub async fn execute(service: &dyn AnalysisService, cmd: BackendCommand) -> WizardEvent {
    match cmd {
        BackendCommand::RunFiveWhys { run, concern } => {
            match service.perform_five_whys(&concern).await {
                Ok(result) => {
                    info!(run = run.0, steps = result.whys.len(), "5 Whys analysis complete");
                    WizardEvent::AnalysisSucceeded { run, result }
                }
                Err(err) => {
                    warn!(run = run.0, "5 Whys analysis failed: {err}");
                    WizardEvent::AnalysisFailed {
                        run,
                        message: Some(err.to_string()),
                    }
                }
            }
        }
        BackendCommand::GenerateRiskDetails {
            run,
            root_cause,
            concern,
        } => match service.generate_risk_details(&root_cause, &concern).await {
            Ok(profile) => {
                info!(
                    run = run.0,
                    statements = profile.statements.len(),
                    "risk profile generated"
                );
                WizardEvent::RiskDetailsSucceeded { run, profile }
            }
            Err(err) => {
                warn!(run = run.0, "risk profile generation failed: {err}");
                WizardEvent::RiskDetailsFailed {
                    run,
                    message: Some(err.to_string()),
                }
            }
        },
    }
}

pub fn launch(
    service: Arc<dyn AnalysisService>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Status(format!(
                    "Backend worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let event = execute(service.as_ref(), cmd).await;
                if ui_tx.send(UiEvent::Wizard(event)).is_err() {
                    break;
                }
            }
        });
    })
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
