use super::{ConfigId, Persistence};
use crate::config::Config;
use crate::error::StoreError;
use crate::flow::FlowState;
use ahash::AHashMap;
use std::sync::RwLock;

/// Keeps everything in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    configs: RwLock<AHashMap<ConfigId, Config>>,
    states: RwLock<AHashMap<u64, FlowState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryStore {
    fn save_config(&self, id: ConfigId, config: &Config) -> Result<(), StoreError> {
        let mut configs = self.configs.write().map_err(|_| StoreError::Poisoned)?;
        configs.insert(id, config.clone());
        Ok(())
    }

    fn load_config(&self, id: ConfigId) -> Result<Option<Config>, StoreError> {
        let configs = self.configs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(configs.get(&id).cloned())
    }

    fn save_flow_state(&self, message_id: u64, state: &FlowState) -> Result<(), StoreError> {
        let mut states = self.states.write().map_err(|_| StoreError::Poisoned)?;
        states.insert(message_id, state.clone());
        Ok(())
    }

    fn load_flow_state(&self, message_id: u64) -> Result<Option<FlowState>, StoreError> {
        let states = self.states.read().map_err(|_| StoreError::Poisoned)?;
        Ok(states.get(&message_id).cloned())
    }

    fn delete_flow_state(&self, message_id: u64) -> Result<(), StoreError> {
        let mut states = self.states.write().map_err(|_| StoreError::Poisoned)?;
        states.remove(&message_id);
        Ok(())
    }
}
