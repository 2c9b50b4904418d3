use super::options::ParameterOption;
use crate::config::Limits;
use crate::error::ConfigError;
use crate::template::Placeholder;

const RANGE_DELIMITER: &str = "<=>";
const LIST_DELIMITER: char = '/';
const LABEL_DELIMITER: char = '@';
const DIRECT_ROLL_MARKER: char = '!';

/// Defines the contract for expanding one spec format into options.
pub trait SpecParser: Send + Sync {
    fn spec_type(&self) -> &str;
    /// Whether `spec` is written in this parser's format.
    fn accepts(&self, spec: &str) -> bool;
    fn parse(
        &self,
        placeholder: &Placeholder,
        spec: &str,
        limits: &Limits,
    ) -> Result<Vec<ParameterOption>, ConfigError>;
}

/// `min<=>max`, ascending integers.
pub struct RangeSpecParser;

impl RangeSpecParser {
    fn bounds(spec: &str) -> Option<(i64, i64)> {
        let (min, max) = spec.trim().split_once(RANGE_DELIMITER)?;
        Some((min.trim().parse().ok()?, max.trim().parse().ok()?))
    }
}

impl SpecParser for RangeSpecParser {
    fn spec_type(&self) -> &str {
        "range"
    }

    fn accepts(&self, spec: &str) -> bool {
        Self::bounds(spec).is_some()
    }

    fn parse(
        &self,
        placeholder: &Placeholder,
        spec: &str,
        limits: &Limits,
    ) -> Result<Vec<ParameterOption>, ConfigError> {
        let (min, max) = Self::bounds(spec).ok_or_else(|| ConfigError::EmptyOptionSet {
            placeholder: placeholder.expression.clone(),
        })?;
        let span = limits.range_cap.saturating_sub(1) as i64;
        let max = max.max(min).min(min.saturating_add(span));
        Ok((min..=max)
            .enumerate()
            .map(|(i, n)| ParameterOption::new(n.to_string(), n.to_string(), i + 1))
            .collect())
    }
}

/// `v1@l1/v2@l2/...`; a label starting with `!` marks a direct roll.
pub struct ListSpecParser;

impl ListSpecParser {
    fn entry_to_option(entry: &str, position: usize) -> ParameterOption {
        let mut parts = entry.split(LABEL_DELIMITER);
        if let (Some(value), Some(label), None) = (parts.next(), parts.next(), parts.next()) {
            if !value.is_empty() && !label.is_empty() {
                return match label.strip_prefix(DIRECT_ROLL_MARKER) {
                    Some(clean) if !clean.is_empty() => {
                        ParameterOption::new(value, clean, position).direct_roll()
                    }
                    _ => ParameterOption::new(value, label, position),
                };
            }
        }
        ParameterOption::new(entry, entry, position)
    }
}

impl SpecParser for ListSpecParser {
    fn spec_type(&self) -> &str {
        "list"
    }

    fn accepts(&self, spec: &str) -> bool {
        spec.contains(LIST_DELIMITER)
    }

    fn parse(
        &self,
        placeholder: &Placeholder,
        spec: &str,
        limits: &Limits,
    ) -> Result<Vec<ParameterOption>, ConfigError> {
        let options: Vec<ParameterOption> = spec
            .split(LIST_DELIMITER)
            .take(limits.list_cap)
            .filter(|entry| !entry.trim().is_empty())
            .enumerate()
            .map(|(i, entry)| Self::entry_to_option(entry, i + 1))
            .collect();
        if options.is_empty() {
            return Err(ConfigError::EmptyOptionSet {
                placeholder: placeholder.expression.clone(),
            });
        }
        Ok(options)
    }
}

/// Options for a placeholder without a usable spec: `1..=n`.
pub fn default_options(limits: &Limits) -> Vec<ParameterOption> {
    (1..=limits.default_option_count)
        .map(|n| ParameterOption::new(n.to_string(), n.to_string(), n))
        .collect()
}

pub(super) fn default_parsers() -> Vec<Box<dyn SpecParser>> {
    vec![Box::new(RangeSpecParser), Box::new(ListSpecParser)]
}
