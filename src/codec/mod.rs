//! Button ids exchanged with the chat platform.
//!
//! A button id carries everything a click needs to be handled without a
//! lookup: the command, the values selected so far, where the answer goes and
//! the clicked value. The platform caps its length, so the validator encodes
//! an id for every explored state and checks it against that cap.

use crate::error::CodecError;

mod layout;

pub use layout::WireLayout;

/// Separates the fields of a button id.
pub const FIELD_DELIMITER: char = '\u{1e}';
/// Separates the selected values inside the selections field.
pub const SELECTION_DELIMITER: char = '\t';
/// Characters a template may not contain, since they would corrupt an id.
pub const RESERVED_CHARACTERS: [char; 2] = [FIELD_DELIMITER, SELECTION_DELIMITER];

/// The decoded fields of a button id, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireId {
    pub command: String,
    pub selections: Vec<String>,
    pub routing_target: Option<u64>,
    pub click_value: String,
}

impl WireId {
    pub fn new<S: AsRef<str>>(
        command: &str,
        selections: &[S],
        routing_target: Option<u64>,
        click_value: &str,
    ) -> Self {
        Self {
            command: command.to_string(),
            selections: selections.iter().map(|s| s.as_ref().to_string()).collect(),
            routing_target,
            click_value: click_value.to_string(),
        }
    }

    pub fn encode(&self) -> String {
        encode(
            &self.command,
            &self.selections,
            self.routing_target,
            &self.click_value,
        )
    }

    pub fn decode(wire_id: &str) -> Result<Self, CodecError> {
        decode_with_layout(wire_id).map(|(_, id)| id)
    }
}

/// Joins the fields in the current layout. Pure: equal inputs give equal ids.
pub fn encode<S: AsRef<str>>(
    command: &str,
    selections: &[S],
    routing_target: Option<u64>,
    click_value: &str,
) -> String {
    let selections: Vec<&str> = selections.iter().map(|s| s.as_ref()).collect();
    let selections = selections.join(&SELECTION_DELIMITER.to_string());
    let routing_target = routing_target.map(|t| t.to_string()).unwrap_or_default();
    [
        command,
        selections.as_str(),
        routing_target.as_str(),
        click_value,
    ]
    .join(&FIELD_DELIMITER.to_string())
}

pub fn decode(wire_id: &str) -> Result<WireId, CodecError> {
    WireId::decode(wire_id)
}

/// Decodes `wire_id`, trying the newest layout first.
pub fn decode_with_layout(wire_id: &str) -> Result<(WireLayout, WireId), CodecError> {
    let fields: Vec<&str> = wire_id.split(FIELD_DELIMITER).collect();
    WireLayout::NEWEST_FIRST
        .iter()
        .find_map(|layout| layout.read(&fields).map(|read| read.map(|id| (*layout, id))))
        .unwrap_or_else(|| {
            Err(CodecError::FieldCount {
                wire_id: wire_id.to_string(),
                found: fields.len(),
            })
        })
}

/// Length as the platform counts it, in characters.
pub fn identifier_length(wire_id: &str) -> usize {
    wire_id.chars().count()
}
