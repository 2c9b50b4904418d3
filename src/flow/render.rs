use super::{CLEAR_BUTTON_ID, FlowState, FlowStatus};
use crate::codec;
use crate::compiler::CompiledFlow;
use crate::config::AnswerFormat;
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    /// Direct-roll options.
    Success,
    /// The clear control.
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Encoded button id, see [`crate::codec`].
    pub id: String,
    pub label: String,
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonRow {
    pub buttons: Vec<Button>,
}

/// Message content plus its button layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub rows: Vec<ButtonRow>,
}

impl Prompt {
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flat_map(|row| row.buttons.iter())
    }
}

impl CompiledFlow {
    /// The buttons offered in `state`: one per option of the next placeholder,
    /// followed by the clear control once anything is selected. Empty when the
    /// flow is complete.
    pub fn buttons(&self, state: &FlowState, routing_target: Option<u64>) -> Vec<Button> {
        let Some(parameter) = self.next_parameter(state) else {
            return Vec::new();
        };
        let command = self.limits.command_name.as_str();
        let mut buttons: Vec<Button> = parameter
            .options
            .iter()
            .map(|option| Button {
                id: codec::encode(command, &state.selections, routing_target, &option.id),
                label: option.label.clone(),
                style: if option.direct_roll {
                    ButtonStyle::Success
                } else {
                    ButtonStyle::Primary
                },
            })
            .collect();
        if !state.selections.is_empty() {
            buttons.push(Button {
                id: codec::encode(command, &state.selections, routing_target, CLEAR_BUTTON_ID),
                label: "Clear".to_string(),
                style: ButtonStyle::Danger,
            });
        }
        buttons
    }

    /// Renders the prompt for `state`. A complete state renders the initial
    /// prompt, since the message is reset once the roll is answered.
    pub fn render_prompt(
        &self,
        state: &FlowState,
        routing_target: Option<u64>,
        format: AnswerFormat,
    ) -> Prompt {
        let fresh = FlowState::default();
        let state = match self.status(state) {
            FlowStatus::Complete => &fresh,
            _ => state,
        };

        let mut text = String::new();
        if let Some(user) = &state.locked_user_name {
            text.push_str(&format!("{}: ", user));
        }
        if format == AnswerFormat::Full {
            text.push_str(&self.template.display_expression(&state.selections));
            text.push('\n');
        }
        if let Some(parameter) = self.next_parameter(state) {
            text.push_str(&format!(
                "Please select value for {}",
                parameter.placeholder.display_label()
            ));
        }

        let per_row = self.limits.buttons_per_row.max(1);
        let chunks = self.buttons(state, routing_target).into_iter().chunks(per_row);
        let rows = chunks
            .into_iter()
            .map(|chunk| ButtonRow {
                buttons: chunk.collect(),
            })
            .collect();
        Prompt { text, rows }
    }
}
