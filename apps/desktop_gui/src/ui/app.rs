//! Application shell: registration panel with live password-requirement
//! indicators, the advisory forms, and the detection/solution panel.

use std::sync::{Arc, Mutex};

use client_core::validation::{
    is_valid_email, is_valid_phone, PasswordPolicyValidator, PasswordRequirement,
    RequirementIndicators,
};
use client_core::Notifier;
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{AdvisoryKind, DetectionEntry};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

fn requirement_slot(requirement: PasswordRequirement) -> usize {
    match requirement {
        PasswordRequirement::MinLength => 0,
        PasswordRequirement::Uppercase => 1,
        PasswordRequirement::Lowercase => 2,
        PasswordRequirement::Digit => 3,
        PasswordRequirement::Special => 4,
    }
}

fn requirement_label(requirement: PasswordRequirement) -> &'static str {
    match requirement {
        PasswordRequirement::MinLength => "At least 8 characters",
        PasswordRequirement::Uppercase => "One uppercase letter",
        PasswordRequirement::Lowercase => "One lowercase letter",
        PasswordRequirement::Digit => "One number",
        PasswordRequirement::Special => "One special character (!@#$%^&*)",
    }
}

/// Requirement indicator slots written by the validator and read back when
/// the registration panel is painted.
#[derive(Default)]
struct IndicatorCells {
    satisfied: Mutex<[bool; 5]>,
}

impl IndicatorCells {
    fn snapshot(&self) -> [bool; 5] {
        *self.satisfied.lock().expect("indicator lock")
    }
}

impl RequirementIndicators for IndicatorCells {
    fn set_satisfied(&self, requirement: PasswordRequirement, satisfied: bool) {
        self.satisfied.lock().expect("indicator lock")[requirement_slot(requirement)] = satisfied;
    }
}

/// Collects blocking notifications raised synchronously by the validator so
/// the frame can surface them as the modal dialog.
#[derive(Default)]
struct AlertSink {
    queued: Mutex<Vec<String>>,
}

impl AlertSink {
    fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.queued.lock().expect("alert lock"))
    }
}

impl Notifier for AlertSink {
    fn alert(&self, message: &str) {
        self.queued
            .lock()
            .expect("alert lock")
            .push(message.to_string());
    }
}

#[derive(Default)]
struct FormUiState {
    pending: bool,
    result: Option<String>,
}

pub struct AdvisorGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,

    name_input: String,
    email_input: String,
    phone_input: String,
    password_input: String,
    confirmation_input: String,
    validator: PasswordPolicyValidator,
    indicator_cells: Arc<IndicatorCells>,
    alert_sink: Arc<AlertSink>,

    organic_crop_input: String,
    yield_crop_input: String,
    chat_input: String,
    detection_label_input: String,
    detection_confidence_input: f32,
    detections: Vec<DetectionEntry>,

    organic: FormUiState,
    yield_form: FormUiState,
    disease: FormUiState,
    chat: FormUiState,

    active_alert: Option<String>,
}

impl AdvisorGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let indicator_cells = Arc::new(IndicatorCells::default());
        let alert_sink = Arc::new(AlertSink::default());
        let validator = PasswordPolicyValidator::new(
            Arc::clone(&indicator_cells) as Arc<dyn RequirementIndicators>,
            Arc::clone(&alert_sink) as Arc<dyn Notifier>,
        );
        Self {
            cmd_tx,
            ui_rx,
            status: "Starting advisory backend...".to_string(),
            name_input: String::new(),
            email_input: String::new(),
            phone_input: String::new(),
            password_input: String::new(),
            confirmation_input: String::new(),
            validator,
            indicator_cells,
            alert_sink,
            organic_crop_input: String::new(),
            yield_crop_input: String::new(),
            chat_input: String::new(),
            detection_label_input: String::new(),
            detection_confidence_input: 0.9,
            detections: Vec::new(),
            organic: FormUiState::default(),
            yield_form: FormUiState::default(),
            disease: FormUiState::default(),
            chat: FormUiState::default(),
            active_alert: None,
        }
    }

    fn form_state_mut(&mut self, kind: AdvisoryKind) -> &mut FormUiState {
        match kind {
            AdvisoryKind::OrganicGuidance => &mut self.organic,
            AdvisoryKind::YieldOptimization => &mut self.yield_form,
            AdvisoryKind::DiseaseSolution => &mut self.disease,
            AdvisoryKind::AdvisorChat => &mut self.chat,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::FormPending(kind) => self.form_state_mut(kind).pending = true,
                UiEvent::FormIdle(kind) => self.form_state_mut(kind).pending = false,
                UiEvent::ResultText { kind, text } => {
                    self.form_state_mut(kind).result = Some(text);
                }
                UiEvent::ResultMarkup { kind, markup } => {
                    self.form_state_mut(kind).result = Some(markup);
                }
                UiEvent::Alert(message) => self.active_alert = Some(message),
                UiEvent::Info(message) => self.status = message,
            }
        }

        if let Some(message) = self.alert_sink.drain().pop() {
            self.active_alert = Some(message);
        }
    }

    fn registration_section(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading("Create your account");
            ui.add(egui::TextEdit::singleline(&mut self.name_input).hint_text("Full name"));
            ui.add(egui::TextEdit::singleline(&mut self.email_input).hint_text("Email"));
            if !self.email_input.is_empty() && !is_valid_email(&self.email_input) {
                ui.colored_label(egui::Color32::from_rgb(178, 64, 64), "Invalid email format.");
            }
            ui.add(egui::TextEdit::singleline(&mut self.phone_input).hint_text("Contact number"));
            if !self.phone_input.is_empty() && !is_valid_phone(&self.phone_input) {
                ui.colored_label(
                    egui::Color32::from_rgb(178, 64, 64),
                    "Invalid phone number. Please enter a 10-digit number.",
                );
            }

            let password_changed = ui
                .add(
                    egui::TextEdit::singleline(&mut self.password_input)
                        .password(true)
                        .hint_text("Password"),
                )
                .changed();
            let confirmation_changed = ui
                .add(
                    egui::TextEdit::singleline(&mut self.confirmation_input)
                        .password(true)
                        .hint_text("Confirm password"),
                )
                .changed();
            if password_changed || confirmation_changed {
                self.validator
                    .evaluate(&self.password_input, &self.confirmation_input);
            }

            ui.add_space(4.0);
            let snapshot = self.indicator_cells.snapshot();
            for requirement in PasswordRequirement::ALL {
                let satisfied = snapshot[requirement_slot(requirement)];
                let (mark, color) = if satisfied {
                    ("\u{2714}", egui::Color32::from_rgb(46, 160, 67))
                } else {
                    ("\u{2716}", egui::Color32::from_rgb(178, 64, 64))
                };
                ui.colored_label(color, format!("{mark} {}", requirement_label(requirement)));
            }
        });
    }

    fn detection_section(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading("Disease detection results");
            let mut changed = false;
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.detection_label_input)
                        .hint_text("Disease label"),
                );
                ui.add(
                    egui::Slider::new(&mut self.detection_confidence_input, 0.0..=1.0)
                        .text("confidence"),
                );
                if ui.button("Add").clicked() && !self.detection_label_input.trim().is_empty() {
                    self.detections.push(DetectionEntry::new(
                        self.detection_label_input.trim(),
                        self.detection_confidence_input,
                    ));
                    self.detection_label_input.clear();
                    changed = true;
                }
                if ui.button("Clear").clicked() {
                    self.detections.clear();
                    changed = true;
                }
            });
            if self.detections.is_empty() {
                ui.weak("No detections yet");
            }
            for entry in &self.detections {
                ui.label(entry.to_string());
            }
            if changed {
                let entries = self.detections.iter().map(DetectionEntry::to_string).collect();
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::UpdateDetections { entries },
                    &mut self.status,
                );
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let trigger =
                    ui.add_enabled(!self.disease.pending, egui::Button::new("Get Solution"));
                if self.disease.pending {
                    ui.add(egui::Spinner::new());
                }
                if trigger.clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::RequestDiseaseSolution,
                        &mut self.status,
                    );
                }
            });

            if let Some(solution) = &self.disease.result {
                ui.add_space(6.0);
                ui.group(|ui| {
                    ui.label(solution);
                });
            }
        });
    }

    fn chat_section(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading("Ask the advisor");
            ui.add(
                egui::TextEdit::singleline(&mut self.chat_input)
                    .hint_text("e.g. How do I keep soil healthy?"),
            );
            ui.horizontal(|ui| {
                let trigger = ui.add_enabled(!self.chat.pending, egui::Button::new("Ask"));
                if self.chat.pending {
                    ui.add(egui::Spinner::new());
                }
                if trigger.clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::AskAdvisor {
                            message: self.chat_input.clone(),
                        },
                        &mut self.status,
                    );
                }
            });
            if let Some(response) = &self.chat.result {
                ui.add_space(6.0);
                ui.group(|ui| {
                    ui.label(response);
                });
            }
        });
    }

    fn show_alert_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.active_alert.clone() {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.active_alert = None;
                    }
                });
        }
    }
}

/// Crop-input advisory form: text field plus a trigger whose label/spinner
/// pair and enabled state follow the form's pending flag. Returns whether the
/// trigger fired.
fn advisory_form(
    ui: &mut egui::Ui,
    title: &str,
    hint: &str,
    trigger_label: &str,
    input: &mut String,
    state: &FormUiState,
) -> bool {
    let mut fired = false;
    ui.group(|ui| {
        ui.heading(title);
        ui.add(egui::TextEdit::singleline(input).hint_text(hint));
        ui.horizontal(|ui| {
            let trigger = ui.add_enabled(!state.pending, egui::Button::new(trigger_label));
            if state.pending {
                ui.add(egui::Spinner::new());
            }
            fired = trigger.clicked();
        });
        if let Some(result) = &state.result {
            ui.add_space(6.0);
            ui.group(|ui| {
                ui.label(result);
            });
        }
    });
    fired
}

impl eframe::App for AdvisorGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Agro Advisor");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(&self.status);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.registration_section(ui);
                ui.add_space(8.0);

                if advisory_form(
                    ui,
                    "Organic cultivation guidance",
                    "Crop name",
                    "Get Guidance",
                    &mut self.organic_crop_input,
                    &self.organic,
                ) {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::RequestOrganicGuidance {
                            crop: self.organic_crop_input.clone(),
                        },
                        &mut self.status,
                    );
                }
                ui.add_space(8.0);

                if advisory_form(
                    ui,
                    "Crop yield optimization",
                    "Crop name",
                    "Get Guidance",
                    &mut self.yield_crop_input,
                    &self.yield_form,
                ) {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::RequestYieldOptimization {
                            crop: self.yield_crop_input.clone(),
                        },
                        &mut self.status,
                    );
                }
                ui.add_space(8.0);

                self.detection_section(ui);
                ui.add_space(8.0);
                self.chat_section(ui);
            });
        });

        self.show_alert_modal(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
