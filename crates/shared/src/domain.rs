use serde::{Deserialize, Serialize};

/// Separator between the cause and effect halves of a risk statement.
pub const STATEMENT_SEPARATOR: &str = ", then ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhyStep {
    pub why: String,
    pub answer: String,
}

/// Outcome of a 5 Whys analysis. Built once from a validated response and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiveWhysResult {
    pub whys: Vec<WhyStep>,
    pub root_cause: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub description: String,
    pub objective: String,
    pub statements: Vec<String>,
}

impl RiskProfile {
    pub fn statement_parts(&self) -> impl Iterator<Item = RiskStatementParts<'_>> {
        self.statements.iter().map(|statement| split_statement(statement))
    }
}

/// Display halves of an `If <cause>, then <effect>` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskStatementParts<'a> {
    pub cause: &'a str,
    pub effect: Option<&'a str>,
}

/// Splits on the first `", then "`. A statement without the separator comes
/// back whole as the cause with no effect.
pub fn split_statement(statement: &str) -> RiskStatementParts<'_> {
    match statement.split_once(STATEMENT_SEPARATOR) {
        Some((cause, effect)) => RiskStatementParts {
            cause,
            effect: Some(effect),
        },
        None => RiskStatementParts {
            cause: statement,
            effect: None,
        },
    }
}
