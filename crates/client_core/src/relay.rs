//! Relay binding: posts `{action, ...payload}` to a server endpoint that
//! holds the credential and forwards to the provider.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{FiveWhysResult, RiskProfile},
    protocol::RelayRequest,
};
use tracing::{debug, warn};

use crate::{error::AnalysisError, validation, AnalysisService};

#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    async fn dispatch(&self, request: &RelayRequest) -> Result<String, AnalysisError> {
        debug!(action = request.action(), endpoint = %self.endpoint, "sending relay request");
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(
                action = request.action(),
                status = status.as_u16(),
                "relay request failed"
            );
            return Err(AnalysisError::from_status(status.as_u16(), &body));
        }

        Ok(body)
    }
}

#[async_trait]
impl AnalysisService for RelayClient {
    async fn perform_five_whys(&self, concern: &str) -> Result<FiveWhysResult, AnalysisError> {
        let body = self
            .dispatch(&RelayRequest::FiveWhys {
                concern: concern.to_string(),
            })
            .await?;
        validation::parse_five_whys(&body)
    }

    async fn generate_risk_details(
        &self,
        root_cause: &str,
        original_concern: &str,
    ) -> Result<RiskProfile, AnalysisError> {
        let body = self
            .dispatch(&RelayRequest::GenerateDetails {
                root_cause: root_cause.to_string(),
                original_concern: original_concern.to_string(),
            })
            .await?;
        validation::parse_risk_profile(&body)
    }
}
