use serde::{Deserialize, Serialize};

/// `{ "error": "..." }` body returned by the relay with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
}
