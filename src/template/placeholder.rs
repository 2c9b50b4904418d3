use serde::{Deserialize, Serialize};
use std::fmt;

/// A `{name[:spec]}` slot inside a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placeholder {
    /// Position among the template's placeholders, left to right.
    pub index: usize,
    /// The verbatim `{...}` text, braces included.
    pub expression: String,
    pub name: String,
    /// Everything after the first `:`, if present.
    pub spec: Option<String>,
    /// Byte offset of the opening brace.
    pub start: usize,
    /// Byte offset just past the closing brace.
    pub end: usize,
}

impl Placeholder {
    /// The name in bold markdown, for prompt text.
    pub fn display_label(&self) -> String {
        format!("**{}**", self.name)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}
