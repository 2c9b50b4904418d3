use crate::template::Placeholder;
use serde::{Deserialize, Serialize};

/// One concrete value offered for a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterOption {
    /// Substituted for the placeholder verbatim.
    pub value: String,
    pub label: String,
    /// Unique within the placeholder's options: `id1`, `id2`, ...
    pub id: String,
    /// Selecting this option completes the flow immediately.
    pub direct_roll: bool,
    /// Index of the placeholder asked for after this option, if any.
    pub next: Option<usize>,
}

impl ParameterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, position: usize) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            id: option_id(position),
            direct_roll: false,
            next: None,
        }
    }

    pub fn direct_roll(mut self) -> Self {
        self.direct_roll = true;
        self
    }

    /// Whether the raw value is an integer literal.
    pub fn numeric_value(&self) -> Option<i64> {
        self.value.trim().parse().ok()
    }
}

/// Selection id for the option at `position` (1-based).
pub fn option_id(position: usize) -> String {
    format!("id{}", position)
}

/// A placeholder together with its expanded, ordered options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub placeholder: Placeholder,
    pub options: Vec<ParameterOption>,
}

impl Parameter {
    /// Finds the option a button click refers to. Buttons issued before ids
    /// were introduced carry the raw value, so the value is tried second.
    pub fn find_option(&self, clicked: &str) -> Option<&ParameterOption> {
        self.options
            .iter()
            .find(|o| o.id == clicked)
            .or_else(|| self.option_by_value(clicked))
    }

    pub fn option_by_value(&self, value: &str) -> Option<&ParameterOption> {
        self.options.iter().find(|o| o.value == value)
    }
}
