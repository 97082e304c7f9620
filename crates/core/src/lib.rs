//! Shared configuration and settings storage for repo sync.

pub mod config;
pub mod errors;
pub mod store;

pub use config::{clear_config, load_config, save_config, GitHubConfig, GITHUB_CONFIG_KEY};
pub use errors::{Error, Result};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
