use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiEvent, WizardEvent},
    orchestration::drive,
    reducer::{Wizard, WizardStep},
};
use crate::ui::panels::{self, PanelAction};

pub struct WizardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    wizard: Wizard,
    concern_input: String,
    status: String,
}

impl WizardApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            wizard: Wizard::new(),
            concern_input: String::new(),
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Status(message) => self.status = message,
                UiEvent::Wizard(event) => self.apply(event),
            }
        }
    }

    fn apply(&mut self, event: WizardEvent) {
        let resetting = matches!(event, WizardEvent::Reset);
        drive(&mut self.wizard, &self.cmd_tx, event);
        if resetting {
            self.concern_input.clear();
            self.status.clear();
        }
    }

    fn apply_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::FindRootCause => {
                self.status.clear();
                self.apply(WizardEvent::SubmitConcern(self.concern_input.clone()));
            }
            PanelAction::CreateRiskProfile => self.apply(WizardEvent::GenerateRequested),
            PanelAction::StartOver => self.apply(WizardEvent::Reset),
            PanelAction::StatementCopied => {
                self.status = "Statement copied to clipboard.".to_string();
            }
        }
    }

    fn show_step(&mut self, ui: &mut egui::Ui) -> Option<PanelAction> {
        let state = self.wizard.state();
        let mut action = match state.step() {
            WizardStep::Input => panels::concern_input(ui, &mut self.concern_input),
            WizardStep::Analyzing => {
                panels::busy(ui, "Finding the Root Cause...");
                None
            }
            WizardStep::Generating => {
                panels::busy(ui, "Creating the Risk Profile...");
                None
            }
            WizardStep::AnalysisComplete => state
                .analysis()
                .and_then(|analysis| panels::five_whys(ui, analysis)),
            WizardStep::StatementsComplete => state
                .risk_profile()
                .and_then(|profile| panels::risk_profile(ui, profile)),
            WizardStep::Error => {
                panels::error(ui, state.error_message().unwrap_or_default());
                None
            }
        };

        if state.step() != WizardStep::Input {
            ui.add_space(16.0);
            if let Some(start_over) = panels::start_over(ui) {
                action = Some(start_over);
            }
        }
        action
    }
}

impl eframe::App for WizardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(840.0);
                panels::header(ui);
                ui.add_space(16.0);
                action = self.show_step(ui);
                ui.add_space(24.0);
                panels::footer(ui, &self.status);
            });
        });

        if let Some(action) = action {
            self.apply_action(action);
        }

        if self.wizard.state().step().is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
