use super::Placeholder;
use crate::error::ConfigError;

const OPEN: char = '{';
const CLOSE: char = '}';
const SPEC_DELIMITER: char = ':';
const LABEL_DELIMITER: char = '@';

/// Extracts every placeholder of `template`, left to right.
///
/// Fails on a brace opened inside another placeholder, a closing brace without
/// a matching opening one, an unclosed brace, and placeholders that are blank
/// or have no name.
pub fn parse_placeholders(template: &str) -> Result<Vec<Placeholder>, ConfigError> {
    let mut placeholders = Vec::new();
    let mut open: Option<usize> = None;

    for (position, c) in template.char_indices() {
        match c {
            OPEN => {
                if open.is_some() {
                    return Err(malformed(position, "placeholders can not be nested"));
                }
                open = Some(position);
            }
            CLOSE => {
                let start = open
                    .take()
                    .ok_or_else(|| malformed(position, "closing brace without opening brace"))?;
                let inner = &template[start + OPEN.len_utf8()..position];
                placeholders.push(build_placeholder(
                    placeholders.len(),
                    inner,
                    start,
                    position + CLOSE.len_utf8(),
                )?);
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        return Err(malformed(start, "brace is never closed"));
    }
    Ok(placeholders)
}

fn build_placeholder(
    index: usize,
    inner: &str,
    start: usize,
    end: usize,
) -> Result<Placeholder, ConfigError> {
    if inner.trim().is_empty() {
        return Err(malformed(start, "placeholder is empty"));
    }
    let (name, spec) = match inner.split_once(SPEC_DELIMITER) {
        Some((name, spec)) => (name, Some(spec.to_string())),
        None => (inner, None),
    };
    if name.trim().is_empty() {
        return Err(malformed(start, "placeholder has no name"));
    }
    Ok(Placeholder {
        index,
        expression: format!("{}{}{}", OPEN, inner, CLOSE),
        name: name.to_string(),
        spec,
        start,
        end,
    })
}

/// Byte offset of the `@` that starts the answer label, if the template ends
/// with one. Only text after the last placeholder is considered.
pub(super) fn find_label_start(template: &str, placeholders: &[Placeholder]) -> Option<usize> {
    let tail_start = placeholders.last().map(|p| p.end).unwrap_or(0);
    let tail = &template[tail_start..];
    let at = tail.find(LABEL_DELIMITER)?;
    let label = &tail[at + LABEL_DELIMITER.len_utf8()..];
    if label.is_empty() {
        None
    } else {
        Some(tail_start + at)
    }
}

fn malformed(position: usize, reason: &str) -> ConfigError {
    ConfigError::MalformedTemplate {
        position,
        reason: reason.to_string(),
    }
}
