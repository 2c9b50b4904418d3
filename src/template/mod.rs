//! The expression model: a roll expression with `{name[:spec]}` placeholders.

use crate::error::ConfigError;

pub mod parsing;
pub mod placeholder;

pub use parsing::parse_placeholders;
pub use placeholder::*;

/// Returns the first placeholder not consumed by `selections`, which are
/// substituted left to right.
pub fn next_unresolved<'a, S>(
    placeholders: &'a [Placeholder],
    selections: &[S],
) -> Option<&'a Placeholder> {
    placeholders.get(selections.len())
}

/// A parsed template. Created once per configuration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    placeholders: Vec<Placeholder>,
    label_start: Option<usize>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let placeholders = parse_placeholders(source)?;
        let label_start = parsing::find_label_start(source, &placeholders);
        Ok(Self {
            source: source.to_string(),
            placeholders,
            label_start,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn len(&self) -> usize {
        self.placeholders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty()
    }

    pub fn next_unresolved<S>(&self, selections: &[S]) -> Option<&Placeholder> {
        next_unresolved(&self.placeholders, selections)
    }

    /// The answer label given as an `@label` suffix after the last placeholder.
    pub fn answer_label(&self) -> Option<&str> {
        self.label_start.map(|start| &self.source[start + 1..])
    }

    /// Replaces the first `values.len()` placeholders with `values` and drops the
    /// answer label. Placeholders beyond `values` keep their template text.
    pub fn substitute<S: AsRef<str>>(&self, values: &[S]) -> String {
        self.render(values, |p| p.expression.clone(), false)
    }

    /// Like `substitute`, but unresolved placeholders are shown as `{name}` and
    /// the answer label is kept. Used for prompt text.
    pub fn display_expression<S: AsRef<str>>(&self, values: &[S]) -> String {
        self.render(values, |p| format!("{{{}}}", p.name), true)
    }

    fn render<S, F>(&self, values: &[S], unresolved: F, keep_label: bool) -> String
    where
        S: AsRef<str>,
        F: Fn(&Placeholder) -> String,
    {
        let end = match (keep_label, self.label_start) {
            (false, Some(start)) => start,
            _ => self.source.len(),
        };
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for placeholder in &self.placeholders {
            out.push_str(&self.source[cursor..placeholder.start]);
            match values.get(placeholder.index) {
                Some(value) => out.push_str(value.as_ref()),
                None => out.push_str(&unresolved(placeholder)),
            }
            cursor = placeholder.end;
        }
        out.push_str(&self.source[cursor..end]);
        out
    }
}
