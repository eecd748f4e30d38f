use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::domain::{FiveWhysResult, RiskProfile};

pub mod error;
pub mod gemini;
pub mod prompts;
pub mod relay;
pub mod schema;
pub mod validation;

pub use error::{AnalysisError, AnalysisOperation};
pub use gemini::GeminiClient;
pub use relay::RelayClient;

/// The two analysis calls the wizard makes. Each is a single round trip with
/// no retry; every failure is handed straight back to the caller.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn perform_five_whys(&self, concern: &str) -> Result<FiveWhysResult, AnalysisError>;

    async fn generate_risk_details(
        &self,
        root_cause: &str,
        original_concern: &str,
    ) -> Result<RiskProfile, AnalysisError>;
}

pub fn build_http_client(request_timeout: Duration) -> Result<Client, AnalysisError> {
    Client::builder()
        .timeout(request_timeout)
        .build()
        .map_err(|err| AnalysisError::Transport(format!("failed to build HTTP client: {err}")))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
