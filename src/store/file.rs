use super::{ConfigId, Persistence};
use crate::config::Config;
use crate::error::StoreError;
use crate::flow::FlowState;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores one bincode file per configuration and per message below a root
/// directory:
///
/// ```text
/// <root>/configs/<uuid>.bin
/// <root>/states/<message id>.bin
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store below `root`, creating its directories if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        for dir in [root.join("configs"), root.join("states")] {
            fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self, id: ConfigId) -> PathBuf {
        self.root.join("configs").join(format!("{}.bin", id))
    }

    fn state_path(&self, message_id: u64) -> PathBuf {
        self.root.join("states").join(format!("{}.bin", message_id))
    }
}

impl Persistence for FileStore {
    fn save_config(&self, id: ConfigId, config: &Config) -> Result<(), StoreError> {
        write(&self.config_path(id), config)
    }

    fn load_config(&self, id: ConfigId) -> Result<Option<Config>, StoreError> {
        read(&self.config_path(id))
    }

    fn save_flow_state(&self, message_id: u64, state: &FlowState) -> Result<(), StoreError> {
        write(&self.state_path(message_id), state)
    }

    fn load_flow_state(&self, message_id: u64) -> Result<Option<FlowState>, StoreError> {
        read(&self.state_path(message_id))
    }

    fn delete_flow_state(&self, message_id: u64) -> Result<(), StoreError> {
        let path = self.state_path(message_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

fn write<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = encode_to_vec(value, standard())
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    fs::write(path, bytes).map_err(|e| io_error(path, e))
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    decode_from_slice(&bytes, standard())
        .map(|(value, _)| Some(value))
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

fn io_error(path: &Path, error: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
