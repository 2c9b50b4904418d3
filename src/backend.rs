use crate::error::EvaluationError;
use serde::{Deserialize, Serialize};

/// The outcome of rolling a fully substituted expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub total: i64,
    /// A human-readable breakdown of every die and operation.
    pub details: String,
}

/// A roll engine the flow hands its finished expressions to.
///
/// The validator calls `validate` from rayon worker threads, so engines must
/// be shareable.
pub trait RollEvaluator: Send + Sync {
    /// Checks an expression without rolling it. Returns a description of the
    /// problem, or `None` if the expression can be rolled.
    fn validate(&self, expression: &str) -> Option<String>;

    fn roll(&self, expression: &str) -> Result<RollResult, EvaluationError>;
}
