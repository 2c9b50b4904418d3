//! Where configurations and in-flight selections live between clicks.

use crate::config::Config;
use crate::error::StoreError;
use crate::flow::FlowState;
use uuid::Uuid;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Identifies a persisted configuration.
pub type ConfigId = Uuid;

/// A persistence backend.
///
/// Configurations are written once and never modified. Flow states are keyed
/// by the platform message they belong to and are overwritten on every click.
pub trait Persistence: Send + Sync {
    fn save_config(&self, id: ConfigId, config: &Config) -> Result<(), StoreError>;

    fn load_config(&self, id: ConfigId) -> Result<Option<Config>, StoreError>;

    fn save_flow_state(&self, message_id: u64, state: &FlowState) -> Result<(), StoreError>;

    fn load_flow_state(&self, message_id: u64) -> Result<Option<FlowState>, StoreError>;

    fn delete_flow_state(&self, message_id: u64) -> Result<(), StoreError>;
}
