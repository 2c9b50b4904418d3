use super::{SELECTION_DELIMITER, WireId};
use crate::error::CodecError;

/// The field layouts button ids have been issued with. Buttons live in old
/// messages indefinitely, so every layout stays decodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireLayout {
    /// `[command, selections, routing target, click value]`
    Current,
    /// `[command, selections, click value]`, from before answers could be routed.
    LegacyWithoutTarget,
}

impl WireLayout {
    pub const NEWEST_FIRST: [WireLayout; 2] =
        [WireLayout::Current, WireLayout::LegacyWithoutTarget];

    pub fn field_count(self) -> usize {
        match self {
            WireLayout::Current => 4,
            WireLayout::LegacyWithoutTarget => 3,
        }
    }

    /// Reads `fields` in this layout. `None` if the field count does not fit.
    pub(super) fn read(self, fields: &[&str]) -> Option<Result<WireId, CodecError>> {
        if fields.len() != self.field_count() {
            return None;
        }
        let (routing_target, click_value) = match self {
            WireLayout::Current => (parse_routing_target(fields[2]), fields[3]),
            WireLayout::LegacyWithoutTarget => (Ok(None), fields[2]),
        };
        Some(routing_target.map(|routing_target| WireId {
            command: fields[0].to_string(),
            selections: split_selections(fields[1]),
            routing_target,
            click_value: click_value.to_string(),
        }))
    }
}

fn parse_routing_target(field: &str) -> Result<Option<u64>, CodecError> {
    if field.is_empty() {
        return Ok(None);
    }
    field
        .parse()
        .map(Some)
        .map_err(|_| CodecError::InvalidRoutingTarget(field.to_string()))
}

/// An empty field means no selections. A single empty selection encodes the
/// same way; option values are never empty, so the two never meet.
fn split_selections(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(SELECTION_DELIMITER).map(str::to_string).collect()
}
