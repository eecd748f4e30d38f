//! UI layer: app shell and the per-step panels.

pub mod app;
pub mod panels;

pub use app::WizardApp;
