//! Bridge between the UI thread and the backend worker that performs network calls.

pub mod commands;
pub mod runtime;
