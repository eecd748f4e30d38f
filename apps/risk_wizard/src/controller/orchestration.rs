//! Command orchestration from wizard transitions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use tracing::{debug, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::WizardEvent, reducer::Wizard};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            Err("UI command queue is full; please start over and retry".to_string())
        }
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend worker disconnected (possible startup/runtime failure); restart the app"
                .to_string(),
        ),
    }
}

/// Feeds `event` to the wizard and queues the call it starts, if any. A call
/// that cannot be queued is reported back to the wizard as that call failing.
pub fn drive(wizard: &mut Wizard, cmd_tx: &Sender<BackendCommand>, event: WizardEvent) {
    let Some(cmd) = wizard.handle(event) else {
        return;
    };

    if let Err(message) = dispatch_backend_command(cmd_tx, cmd.clone()) {
        warn!(command = cmd.name(), "failed to queue backend command: {message}");
        let _ = wizard.handle(cmd.failed(message));
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
