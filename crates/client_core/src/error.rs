//! Failure taxonomy for analysis calls.

use serde::Deserialize;
use shared::error::RelayErrorBody;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOperation {
    FiveWhys,
    RiskDetails,
}

impl AnalysisOperation {
    pub fn name(self) -> &'static str {
        match self {
            AnalysisOperation::FiveWhys => "five_whys",
            AnalysisOperation::RiskDetails => "risk_details",
        }
    }

    fn request_label(self) -> &'static str {
        match self {
            AnalysisOperation::FiveWhys => "5 Whys analysis",
            AnalysisOperation::RiskDetails => "risk details generation",
        }
    }

    fn result_label(self) -> &'static str {
        match self {
            AnalysisOperation::FiveWhys => "the analysis",
            AnalysisOperation::RiskDetails => "the risk details",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("request failed with status {status}")]
    RequestFailed { status: u16 },
    #[error("API returned an empty response for {label}.", label = .operation.request_label())]
    EmptyResponse { operation: AnalysisOperation },
    #[error(
        "The AI returned an invalid format for {label}. Please try again.",
        label = .operation.result_label()
    )]
    InvalidFormat { operation: AnalysisOperation },
    #[error(
        "The AI response for {label} was missing `{field}` or had the wrong type. Please try again.",
        label = .operation.result_label()
    )]
    ShapeMismatch {
        operation: AnalysisOperation,
        field: String,
    },
}

impl AnalysisError {
    /// Maps a non-2xx response to a failure, preferring the message carried
    /// in the body (relay `{error: "..."}` or provider `{error: {message}}`).
    pub fn from_status(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorPayload>(body) {
            Ok(ErrorPayload::Relay(RelayErrorBody { error }))
            | Ok(ErrorPayload::Provider {
                error: ProviderErrorDetail { message: error },
            }) if !error.trim().is_empty() => AnalysisError::Upstream {
                status,
                message: error,
            },
            _ => AnalysisError::RequestFailed { status },
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::Transport(format!("request timed out: {err}"))
        } else {
            AnalysisError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Relay(RelayErrorBody),
    Provider { error: ProviderErrorDetail },
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}
