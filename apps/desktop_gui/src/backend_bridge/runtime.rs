//! Advisory backend worker: owns the tokio runtime and one controller per
//! form, wired to channel-backed implementations of the UI surface traits.

use std::{
    sync::{Arc, Mutex},
    thread,
};

use client_core::{
    ActivityIndicator, AdvisoryClient, AdvisoryController, DetectionSource, Notifier, ResultRegion,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::AdvisoryKind;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

struct ChannelIndicator {
    kind: AdvisoryKind,
    ui_tx: Sender<UiEvent>,
}

impl ActivityIndicator for ChannelIndicator {
    fn enter_pending(&self) {
        let _ = self.ui_tx.try_send(UiEvent::FormPending(self.kind));
    }

    fn restore_idle(&self) {
        let _ = self.ui_tx.try_send(UiEvent::FormIdle(self.kind));
    }
}

struct ChannelRegion {
    kind: AdvisoryKind,
    ui_tx: Sender<UiEvent>,
}

impl ResultRegion for ChannelRegion {
    fn render_text(&self, text: &str) {
        let _ = self.ui_tx.try_send(UiEvent::ResultText {
            kind: self.kind,
            text: text.to_string(),
        });
    }

    fn render_markup(&self, markup: &str) {
        let _ = self.ui_tx.try_send(UiEvent::ResultMarkup {
            kind: self.kind,
            markup: markup.to_string(),
        });
    }
}

struct ChannelNotifier {
    ui_tx: Sender<UiEvent>,
}

impl Notifier for ChannelNotifier {
    fn alert(&self, message: &str) {
        let _ = self.ui_tx.try_send(UiEvent::Alert(message.to_string()));
    }
}

/// Detection list shared between the command loop (writer) and the
/// disease-solution controller's pre-flight extractor (reader).
#[derive(Default)]
struct SharedDetections {
    entries: Mutex<Vec<String>>,
}

impl SharedDetections {
    fn replace(&self, entries: Vec<String>) {
        *self.entries.lock().expect("detections lock") = entries;
    }
}

impl DetectionSource for SharedDetections {
    fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("detections lock").clone()
    }
}

fn field_controller(
    client: &Arc<AdvisoryClient>,
    kind: AdvisoryKind,
    ui_tx: &Sender<UiEvent>,
) -> Arc<AdvisoryController> {
    Arc::new(AdvisoryController::new(
        Arc::clone(client),
        kind,
        Arc::new(ChannelIndicator {
            kind,
            ui_tx: ui_tx.clone(),
        }),
        Arc::new(ChannelRegion {
            kind,
            ui_tx: ui_tx.clone(),
        }),
        Arc::new(ChannelNotifier {
            ui_tx: ui_tx.clone(),
        }),
    ))
}

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Alert(format!(
                    "Advisory backend failed to start: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = Arc::new(AdvisoryClient::new(server_url));
            let detections = Arc::new(SharedDetections::default());

            let organic = field_controller(&client, AdvisoryKind::OrganicGuidance, &ui_tx);
            let yield_form = field_controller(&client, AdvisoryKind::YieldOptimization, &ui_tx);
            let chat = field_controller(&client, AdvisoryKind::AdvisorChat, &ui_tx);
            let disease = Arc::new(AdvisoryController::new_with_detection_source(
                Arc::clone(&client),
                Arc::new(ChannelIndicator {
                    kind: AdvisoryKind::DiseaseSolution,
                    ui_tx: ui_tx.clone(),
                }),
                Arc::new(ChannelRegion {
                    kind: AdvisoryKind::DiseaseSolution,
                    ui_tx: ui_tx.clone(),
                }),
                Arc::new(ChannelNotifier {
                    ui_tx: ui_tx.clone(),
                }),
                Arc::clone(&detections) as Arc<dyn DetectionSource>,
            ));

            let _ = ui_tx.try_send(UiEvent::Info("Advisory backend ready".to_string()));

            // Each fire runs on its own task so forms stay independent; a
            // form's own controller drops overlapping fires itself.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::RequestOrganicGuidance { crop } => {
                        let controller = Arc::clone(&organic);
                        tokio::spawn(async move { controller.fire(&crop).await });
                    }
                    BackendCommand::RequestYieldOptimization { crop } => {
                        let controller = Arc::clone(&yield_form);
                        tokio::spawn(async move { controller.fire(&crop).await });
                    }
                    BackendCommand::RequestDiseaseSolution => {
                        let controller = Arc::clone(&disease);
                        tokio::spawn(async move { controller.fire("").await });
                    }
                    BackendCommand::AskAdvisor { message } => {
                        let controller = Arc::clone(&chat);
                        tokio::spawn(async move { controller.fire(&message).await });
                    }
                    BackendCommand::UpdateDetections { entries } => {
                        detections.replace(entries);
                    }
                }
            }
        });
    });
}
