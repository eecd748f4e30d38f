use std::path::PathBuf;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::{commands::BackendCommand, runtime};
use config::{load_settings, Settings, TransportKind, DEFAULT_CONFIG_PATH};
use controller::events::UiEvent;
use ui::WizardApp;

#[derive(Parser, Debug)]
#[command(about = "Guided 5 Whys root-cause analysis and risk profile generation")]
struct Args {
    /// TOML settings file; missing is fine.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long, value_enum)]
    transport: Option<TransportKind>,
    #[arg(long)]
    relay_url: Option<String>,
    #[arg(long)]
    model: Option<String>,
}

impl Args {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(transport) = self.transport {
            settings.transport = transport;
        }
        if let Some(relay_url) = &self.relay_url {
            settings.relay_url = Some(relay_url.clone());
        }
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    args.apply_to(&mut settings);
    let service = runtime::build_analysis_service(&settings)?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    runtime::launch(service, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Risk Root-Cause Wizard")
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Risk Root-Cause Wizard",
        options,
        Box::new(|_cc| Ok(Box::new(WizardApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("desktop UI exited with an error: {err}"))
}
