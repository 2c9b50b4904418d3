//! The interaction state machine: `Empty` → `Partial(k)` → `Complete`.

use crate::compiler::{CompiledFlow, FlowCompiler};
use crate::config::{Config, Limits};
use crate::error::{ClickError, ConfigError};
use serde::{Deserialize, Serialize};

mod answer;
mod machine;
mod render;

pub use answer::RollRequest;
pub use machine::{CLEAR_BUTTON_ID, SKIPPED_VALUE};
pub use render::{Button, ButtonRow, ButtonStyle, Prompt};

/// Selections made so far on one rendered message, and who made them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowState {
    /// Raw values, one per resolved placeholder, left to right.
    pub selections: Vec<String>,
    /// Set by the first click; other users can not continue the selection.
    pub locked_user_name: Option<String>,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selections<S: AsRef<str>>(selections: &[S]) -> Self {
        Self {
            selections: selections.iter().map(|s| s.as_ref().to_string()).collect(),
            locked_user_name: None,
        }
    }

    pub fn locked_for(mut self, user: impl Into<String>) -> Self {
        self.locked_user_name = Some(user.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStatus {
    Empty,
    /// `k` placeholders resolved, more to go.
    Partial(usize),
    Complete,
}

/// The result of one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Continue(FlowState),
    Complete { state: FlowState, roll: RollRequest },
    Cleared(FlowState),
    /// The click was rejected; `state` is the unchanged prior state.
    Ignored { state: FlowState, reason: ClickError },
}

impl ClickOutcome {
    pub fn state(&self) -> &FlowState {
        match self {
            ClickOutcome::Continue(state) | ClickOutcome::Cleared(state) => state,
            ClickOutcome::Complete { state, .. } | ClickOutcome::Ignored { state, .. } => state,
        }
    }
}

/// A configuration bound to its compiled template.
#[derive(Debug, Clone)]
pub struct ParameterFlow {
    pub config: Config,
    pub compiled: CompiledFlow,
}

impl ParameterFlow {
    pub fn new(config: Config, limits: &Limits) -> Result<Self, ConfigError> {
        let compiled = FlowCompiler::compile_with(&config.template, limits)?;
        Ok(Self { config, compiled })
    }

    pub fn render_prompt(&self, state: &FlowState) -> Prompt {
        self.compiled
            .render_prompt(state, self.config.answer_target, self.config.answer_format)
    }

    pub fn on_click(&self, state: &FlowState, clicked: &str, user: &str) -> ClickOutcome {
        self.compiled
            .on_click(state, clicked, user, self.config.answer_format)
    }
}

/// Renders the prompt of `config` in `state` with default limits.
pub fn render_prompt(config: &Config, state: &FlowState) -> Result<Prompt, ConfigError> {
    ParameterFlow::new(config.clone(), &Limits::default()).map(|flow| flow.render_prompt(state))
}

/// Applies a click to `state` with default limits.
pub fn on_click(
    config: &Config,
    state: &FlowState,
    clicked: &str,
    user: &str,
) -> Result<ClickOutcome, ConfigError> {
    ParameterFlow::new(config.clone(), &Limits::default())
        .map(|flow| flow.on_click(state, clicked, user))
}
