mod loader;
mod types;
mod validate;

pub use loader::{
    config_dir_from_env, load_config, load_config_from_str, CONFIG_DIR_ENV, DEFAULT_CONFIG_DIR,
    ENV_OVERRIDE_PREFIX,
};
pub(crate) use loader::{list_documents, merge_documents};
pub use types::*;
pub use validate::validate_config;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("No configuration file (.toml, .yaml, .yml) found in: {0}")]
    FileNotFound(String),

    #[error("Failed to read configuration directory: {0}")]
    ReadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
