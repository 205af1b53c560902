//! Configuration loading.
//!
//! Config lives at `<config_dir>/moviefinder/config.toml`. Every field
//! has a default, so a missing file is a valid configuration.

mod loader;
mod store;
mod types;

pub use loader::{ConfigError, API_KEY_ENV_VAR};
pub use store::ConfigStore;
pub use types::{ApiConfig, Config, SearchConfig, StorageConfig, UiConfig};
