use super::{ClickOutcome, FlowState, FlowStatus, RollRequest};
use crate::compiler::{CompiledFlow, Parameter};
use crate::config::AnswerFormat;
use crate::error::ClickError;
use tracing::debug;

/// Click value of the control that discards all selections.
pub const CLEAR_BUTTON_ID: &str = "clear";
/// Substituted for placeholders skipped by a direct roll; the evaluator reads
/// it as an empty value.
pub const SKIPPED_VALUE: &str = "''";

impl CompiledFlow {
    pub fn status(&self, state: &FlowState) -> FlowStatus {
        let selected = state.selections.len();
        if selected >= self.len() || self.ended_by_direct_roll(state) {
            FlowStatus::Complete
        } else if selected == 0 {
            FlowStatus::Empty
        } else {
            FlowStatus::Partial(selected)
        }
    }

    fn ended_by_direct_roll(&self, state: &FlowState) -> bool {
        let Some(last) = state.selections.len().checked_sub(1) else {
            return false;
        };
        self.parameter(last)
            .and_then(|p| p.option_by_value(&state.selections[last]))
            .is_some_and(|o| o.direct_roll)
    }

    /// The parameter the next click fills, `None` once the flow is complete.
    pub fn next_parameter(&self, state: &FlowState) -> Option<&Parameter> {
        match self.status(state) {
            FlowStatus::Complete => None,
            _ => self.parameter(state.selections.len()),
        }
    }

    /// Appends the value of `option_id` to the selections. The lock owner is
    /// carried over untouched.
    pub fn advance(&self, state: &FlowState, option_id: &str) -> Result<FlowState, ClickError> {
        let parameter = self.next_parameter(state).ok_or(ClickError::AlreadyComplete)?;
        let option = parameter
            .find_option(option_id)
            .ok_or_else(|| ClickError::UnknownOption {
                option_id: option_id.to_string(),
                placeholder: parameter.placeholder.expression.clone(),
            })?;
        let mut next = state.clone();
        next.selections.push(option.value.clone());
        Ok(next)
    }

    /// Checks that `selections` could have been made through the offered
    /// buttons: every value is an option of its placeholder and nothing follows
    /// a direct roll.
    pub fn check_selections<S: AsRef<str>>(&self, selections: &[S]) -> Result<(), ClickError> {
        let mut ended = false;
        for (index, value) in selections.iter().enumerate() {
            let value = value.as_ref();
            let parameter = self.parameter(index).ok_or(ClickError::AlreadyComplete)?;
            let option = parameter
                .option_by_value(value)
                .filter(|_| !ended)
                .ok_or_else(|| ClickError::UnknownOption {
                    option_id: value.to_string(),
                    placeholder: parameter.placeholder.expression.clone(),
                })?;
            ended = option.direct_roll;
        }
        Ok(())
    }

    /// Handles a click of `user` on the button with click value `clicked`.
    ///
    /// The first user to click locks the flow; clicks of anyone else are
    /// ignored, as are clicks on options that are not currently offered and
    /// clicks carrying selections no button ever offered. An ignored click
    /// returns the state unchanged.
    pub fn on_click(
        &self,
        state: &FlowState,
        clicked: &str,
        user: &str,
        format: AnswerFormat,
    ) -> ClickOutcome {
        if let Some(owner) = state.locked_user_name.as_deref() {
            if owner != user {
                return ignore(
                    state,
                    ClickError::LockedByOtherUser {
                        owner: owner.to_string(),
                        user: user.to_string(),
                    },
                );
            }
        }
        if clicked == CLEAR_BUTTON_ID {
            return ClickOutcome::Cleared(FlowState::default());
        }

        if let Err(reason) = self.check_selections(&state.selections) {
            return ignore(state, reason);
        }
        let mut next = match self.advance(state, clicked) {
            Ok(next) => next,
            Err(reason) => return ignore(state, reason),
        };
        next.locked_user_name.get_or_insert_with(|| user.to_string());

        match self.roll_request(&next, format) {
            Some(roll) => ClickOutcome::Complete { state: next, roll },
            None => ClickOutcome::Continue(next),
        }
    }

    /// The fully substituted expression and its answer label, once complete.
    pub fn roll_request(&self, state: &FlowState, format: AnswerFormat) -> Option<RollRequest> {
        if self.status(state) != FlowStatus::Complete {
            return None;
        }
        let values: Vec<&str> = (0..self.len())
            .map(|i| {
                state
                    .selections
                    .get(i)
                    .map(String::as_str)
                    .unwrap_or(SKIPPED_VALUE)
            })
            .collect();
        Some(RollRequest {
            expression: self.template.substitute(&values),
            label: self.answer_label(state, format),
        })
    }
}

fn ignore(state: &FlowState, reason: ClickError) -> ClickOutcome {
    debug!("Ignoring click: {}", reason);
    ClickOutcome::Ignored {
        state: state.clone(),
        reason,
    }
}
