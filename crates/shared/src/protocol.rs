use serde::{Deserialize, Serialize};

/// Body posted to the relay endpoint, which holds the provider credential
/// and forwards the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RelayRequest {
    FiveWhys {
        concern: String,
    },
    #[serde(rename_all = "camelCase")]
    GenerateDetails {
        root_cause: String,
        original_concern: String,
    },
}

impl RelayRequest {
    pub fn action(&self) -> &'static str {
        match self {
            RelayRequest::FiveWhys { .. } => "fiveWhys",
            RelayRequest::GenerateDetails { .. } => "generateDetails",
        }
    }
}
