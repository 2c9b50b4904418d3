use super::FlowState;
use crate::compiler::CompiledFlow;
use crate::config::AnswerFormat;
use serde::{Deserialize, Serialize};

/// What is handed to the evaluator once every placeholder is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    pub expression: String,
    pub label: Option<String>,
}

impl CompiledFlow {
    /// The `@label` suffix of the template wins. Otherwise, unless the full
    /// answer format already shows the expression, the chosen option labels
    /// are listed as `Name: label, ...`.
    pub(super) fn answer_label(&self, state: &FlowState, format: AnswerFormat) -> Option<String> {
        if let Some(label) = self.template.answer_label() {
            return Some(label.to_string());
        }
        if format == AnswerFormat::Full {
            return None;
        }
        let chosen: Vec<String> = state
            .selections
            .iter()
            .zip(&self.parameters)
            .map(|(value, parameter)| {
                let label = parameter
                    .option_by_value(value)
                    .map(|o| o.label.as_str())
                    .unwrap_or(value);
                format!("{}: {}", parameter.placeholder.name, label)
            })
            .collect();
        if chosen.is_empty() {
            None
        } else {
            Some(chosen.join(", "))
        }
    }
}
