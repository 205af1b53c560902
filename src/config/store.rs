//! Shared handle to the loaded configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Loaded config plus the file it came from. Clones share one config.
#[derive(Clone)]
pub struct ConfigStore {
    current: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            current: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Snapshot of the current config.
    pub fn get(&self) -> Config {
        self.current.read().clone()
    }

    /// Re-read the file. Returns whether anything changed.
    ///
    /// A file that fails to load leaves the current config in place.
    pub fn reload(&self) -> Result<bool, ConfigError> {
        let fresh = Config::load_from(&self.path)?;
        let mut current = self.current.write();
        if *current == fresh {
            return Ok(false);
        }
        *current = fresh;
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
