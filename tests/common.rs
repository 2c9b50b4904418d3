//! Common test utilities: fake roll engines and template helpers.
use sentaku::backend::{RollEvaluator, RollResult};
use sentaku::error::EvaluationError;
use sentaku::prelude::*;
use std::sync::Mutex;

/// Records every expression it is asked to validate. Expressions containing
/// `reject` are reported as invalid.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingEvaluator {
    pub validated: Mutex<Vec<String>>,
    pub reject: Option<String>,
}

#[allow(dead_code)]
impl RecordingEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(pattern: &str) -> Self {
        Self {
            validated: Mutex::new(Vec::new()),
            reject: Some(pattern.to_string()),
        }
    }

    /// The validated expressions, sorted, since branches run in parallel.
    pub fn validated_sorted(&self) -> Vec<String> {
        let mut validated = self.validated.lock().unwrap().clone();
        validated.sort();
        validated
    }
}

impl RollEvaluator for RecordingEvaluator {
    fn validate(&self, expression: &str) -> Option<String> {
        self.validated.lock().unwrap().push(expression.to_string());
        match &self.reject {
            Some(pattern) if expression.contains(pattern.as_str()) => {
                Some(format!("'{}' is not allowed", pattern))
            }
            _ => None,
        }
    }

    fn roll(&self, expression: &str) -> std::result::Result<RollResult, EvaluationError> {
        Ok(RollResult {
            total: 0,
            details: expression.to_string(),
        })
    }
}

/// Accepts everything and always rolls `total`.
#[allow(dead_code)]
pub struct FixedEvaluator {
    pub total: i64,
}

impl RollEvaluator for FixedEvaluator {
    fn validate(&self, _expression: &str) -> Option<String> {
        None
    }

    fn roll(&self, expression: &str) -> std::result::Result<RollResult, EvaluationError> {
        Ok(RollResult {
            total: self.total,
            details: format!("{} = {}", expression, self.total),
        })
    }
}

/// Compiles `template` with the default limits.
#[allow(dead_code)]
pub fn compile(template: &str) -> CompiledFlow {
    FlowCompiler::compile_with(template, &Limits::default()).expect("Failed to compile")
}

/// Builds a flow for `template` with the default limits.
#[allow(dead_code)]
pub fn flow(template: &str) -> ParameterFlow {
    ParameterFlow::new(Config::new(template), &Limits::default()).expect("Failed to compile")
}

/// The values offered for the parameter at `index`.
#[allow(dead_code)]
pub fn values(flow: &CompiledFlow, index: usize) -> Vec<String> {
    flow.parameters[index]
        .options
        .iter()
        .map(|o| o.value.clone())
        .collect()
}

/// Finds the button labelled `label` in `prompt`.
#[allow(dead_code)]
pub fn button<'a>(prompt: &'a Prompt, label: &str) -> &'a sentaku::flow::Button {
    prompt
        .buttons()
        .find(|b| b.label == label)
        .unwrap_or_else(|| panic!("No button labelled '{}'", label))
}
