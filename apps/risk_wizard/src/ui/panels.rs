//! One panel per wizard step. Panels only draw and report what the user
//! clicked; state changes happen in the controller.

use eframe::egui;
use shared::domain::{FiveWhysResult, RiskProfile, RiskStatementParts};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(124, 58, 237);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    FindRootCause,
    CreateRiskProfile,
    StartOver,
    StatementCopied,
}

pub fn header(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new("Risk Root-Cause Wizard").color(ACCENT).size(28.0));
        ui.weak("Find the real problem behind a concern, then turn it into a risk profile.");
    });
}

pub fn concern_input(ui: &mut egui::Ui, concern: &mut String) -> Option<PanelAction> {
    let mut action = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(egui::RichText::new("What are you concerned about?").strong().size(18.0));
        ui.weak(
            "Tell us about a problem or something you're worried about. For example, \"Customer reports often have mistakes.\"",
        );
        ui.add(
            egui::TextEdit::multiline(concern)
                .hint_text("Type your concern here...")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            let ready = !concern.trim().is_empty();
            if ui
                .add_enabled(ready, egui::Button::new("Find Root Cause"))
                .clicked()
            {
                action = Some(PanelAction::FindRootCause);
            }
        });
    });
    action
}

pub fn busy(ui: &mut egui::Ui, headline: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new(headline).color(ACCENT).size(20.0));
            });
            ui.weak("The AI is thinking. This may take a moment.");
        });
    });
}

pub fn five_whys(ui: &mut egui::Ui, analysis: &FiveWhysResult) -> Option<PanelAction> {
    let mut action = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(egui::RichText::new("5 Whys Analysis").color(ACCENT).strong().size(22.0));
        for (index, step) in analysis.whys.iter().enumerate() {
            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(format!("Why {}:", index + 1)).color(ACCENT).strong());
                ui.label(egui::RichText::new(&step.why).strong());
            });
            ui.horizontal_wrapped(|ui| {
                ui.add_space(12.0);
                ui.label(egui::RichText::new("Answer:").strong());
                ui.label(step.answer.as_str());
            });
        }

        ui.add_space(10.0);
        ui.separator();
        ui.label(egui::RichText::new("The Real Problem (Root Cause)").strong().size(18.0));
        ui.label(egui::RichText::new(&analysis.root_cause).size(16.0));

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            if ui.button("Create Full Risk Profile").clicked() {
                action = Some(PanelAction::CreateRiskProfile);
            }
        });
    });
    action
}

pub fn risk_profile(ui: &mut egui::Ui, profile: &RiskProfile) -> Option<PanelAction> {
    let mut action = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(egui::RichText::new("Generated Risk Profile").color(ACCENT).strong().size(22.0));
        ui.weak("Here is the risk profile the AI created. You can copy the information you need for your reports or records.");

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Risk Description").strong().size(18.0));
        ui.label(profile.description.as_str());

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Risk Objective").strong().size(18.0));
        ui.label(profile.objective.as_str());

        ui.add_space(8.0);
        ui.label(egui::RichText::new("If/Then Statements").strong().size(18.0));
        for (statement, parts) in profile.statements.iter().zip(profile.statement_parts()) {
            if statement_card(ui, statement, parts) {
                action = Some(PanelAction::StatementCopied);
            }
        }
    });
    action
}

/// Returns true when the statement was copied.
fn statement_card(ui: &mut egui::Ui, statement: &str, parts: RiskStatementParts<'_>) -> bool {
    let mut copied = false;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.horizontal_wrapped(|ui| {
                match parts.effect {
                    Some(effect) => {
                        ui.label(
                            egui::RichText::new(format!("{},", parts.cause))
                                .color(ACCENT)
                                .strong(),
                        );
                        ui.label(format!("then {effect}"));
                    }
                    None => {
                        ui.label(parts.cause);
                    }
                }
            });
            if ui.small_button("Copy").on_hover_text("Copy statement").clicked() {
                ui.ctx().copy_text(statement.to_string());
                copied = true;
            }
        });
    });
    copied
}

pub fn error(ui: &mut egui::Ui, message: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("Analysis Failed").color(ERROR_RED).strong().size(22.0));
            ui.label(egui::RichText::new(message).color(ERROR_RED));
        });
    });
}

pub fn start_over(ui: &mut egui::Ui) -> Option<PanelAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        if ui.button("Start Over").clicked() {
            action = Some(PanelAction::StartOver);
        }
    });
    action
}

pub fn footer(ui: &mut egui::Ui, status: &str) {
    ui.vertical_centered(|ui| {
        if !status.is_empty() {
            ui.label(status);
        }
        ui.weak("Powered by AI. Always check the AI's work to make sure it's correct and makes sense for your situation.");
    });
}
