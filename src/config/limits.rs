use serde::{Deserialize, Serialize};
use std::fs;

/// Platform and search bounds. Every field falls back to its default when it is
/// missing from a loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Command name written as the first field of every button id.
    pub command_name: String,
    /// Maximum length of a button id, in characters.
    pub max_identifier_length: usize,
    /// Maximum number of selections along one path.
    pub max_placeholders: usize,
    /// Maximum number of options generated from a `min<=>max` range.
    pub range_cap: usize,
    /// Maximum number of entries taken from a `/` separated list.
    pub list_cap: usize,
    /// Options offered when a placeholder has no usable spec (`1..=n`).
    pub default_option_count: usize,
    pub buttons_per_row: usize,
    /// Upper bound on validated leaf paths.
    pub max_explored_paths: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            command_name: "custom_parameter".to_string(),
            max_identifier_length: 100,
            max_placeholders: 4,
            range_cap: 24,
            list_cap: 23,
            default_option_count: 15,
            buttons_per_row: 5,
            max_explored_paths: 4096,
        }
    }
}

impl Limits {
    /// Load limits from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let limits = serde_json::from_str(&content)?;
        Ok(limits)
    }
}
