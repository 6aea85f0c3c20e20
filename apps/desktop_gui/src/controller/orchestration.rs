//! Command orchestration helpers from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::RequestOrganicGuidance { .. } => "request_organic_guidance",
        BackendCommand::RequestYieldOptimization { .. } => "request_yield_optimization",
        BackendCommand::RequestDiseaseSolution => "request_disease_solution",
        BackendCommand::AskAdvisor { .. } => "ask_advisor",
        BackendCommand::UpdateDetections { .. } => "update_detections",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Advisory backend disconnected; restart the application".to_string();
        }
    }
}
