//! Shape checks applied to every response body before it becomes a domain
//! value. Both operations and both transports go through here.

use serde_json::Value;
use shared::domain::{FiveWhysResult, RiskProfile, WhyStep};
use tracing::{error, warn};

use crate::error::{AnalysisError, AnalysisOperation};

pub const EXPECTED_WHY_COUNT: usize = 5;
pub const MIN_STATEMENTS: usize = 3;
pub const MAX_STATEMENTS: usize = 5;

pub fn parse_five_whys(raw: &str) -> Result<FiveWhysResult, AnalysisError> {
    let operation = AnalysisOperation::FiveWhys;
    let value = parse_json(raw, operation)?;

    let entries = value
        .get("whys")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_mismatch(operation, "whys", raw))?;

    let mut whys = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let why = string_field(entry, "why")
            .ok_or_else(|| shape_mismatch(operation, format!("whys[{index}].why"), raw))?;
        let answer = string_field(entry, "answer")
            .ok_or_else(|| shape_mismatch(operation, format!("whys[{index}].answer"), raw))?;
        whys.push(WhyStep {
            why: why.to_string(),
            answer: answer.to_string(),
        });
    }

    let root_cause = string_field(&value, "rootCause")
        .ok_or_else(|| shape_mismatch(operation, "rootCause", raw))?;

    if whys.len() != EXPECTED_WHY_COUNT {
        warn!(
            count = whys.len(),
            expected = EXPECTED_WHY_COUNT,
            "5 Whys response has an unexpected number of steps"
        );
    }

    Ok(FiveWhysResult {
        whys,
        root_cause: root_cause.to_string(),
    })
}

pub fn parse_risk_profile(raw: &str) -> Result<RiskProfile, AnalysisError> {
    let operation = AnalysisOperation::RiskDetails;
    let value = parse_json(raw, operation)?;

    let description = string_field(&value, "description")
        .ok_or_else(|| shape_mismatch(operation, "description", raw))?;
    let objective = string_field(&value, "objective")
        .ok_or_else(|| shape_mismatch(operation, "objective", raw))?;
    let entries = value
        .get("statements")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_mismatch(operation, "statements", raw))?;

    let statements = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| shape_mismatch(operation, format!("statements[{index}]"), raw))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !(MIN_STATEMENTS..=MAX_STATEMENTS).contains(&statements.len()) {
        warn!(
            count = statements.len(),
            min = MIN_STATEMENTS,
            max = MAX_STATEMENTS,
            "risk details response has an unexpected number of statements"
        );
    }

    Ok(RiskProfile {
        description: description.to_string(),
        objective: objective.to_string(),
        statements,
    })
}

fn parse_json(raw: &str, operation: AnalysisOperation) -> Result<Value, AnalysisError> {
    if raw.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse { operation });
    }

    serde_json::from_str(raw).map_err(|err| {
        error!(
            operation = operation.name(),
            raw = %raw,
            "failed to parse response JSON: {err}"
        );
        AnalysisError::InvalidFormat { operation }
    })
}

fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn shape_mismatch(
    operation: AnalysisOperation,
    field: impl Into<String>,
    raw: &str,
) -> AnalysisError {
    let field = field.into();
    error!(
        operation = operation.name(),
        field = %field,
        raw = %raw,
        "response JSON does not match the expected shape"
    );
    AnalysisError::ShapeMismatch { operation, field }
}
