use figment::{
    providers::{Env, Format, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};

use super::{types::Config, ConfigError};

/// Environment variable naming the configuration directory
pub const CONFIG_DIR_ENV: &str = "CONFIG_DIRECTORY_NAME";

/// Directory used when `CONFIG_DIRECTORY_NAME` is unset
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix of per-key environment overrides, `__` separates nesting levels
pub const ENV_OVERRIDE_PREFIX: &str = "AAXCONV_";

/// Resolve the configuration directory from the environment
pub fn config_dir_from_env() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Toml,
    Yaml,
}

fn document_kind(path: &Path) -> Option<DocumentKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "toml" => Some(DocumentKind::Toml),
        "yaml" | "yml" => Some(DocumentKind::Yaml),
        _ => None,
    }
}

/// List the structured documents of a directory in file-name order.
///
/// Files with other extensions and subdirectories are ignored.
pub(crate) fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && document_kind(&path).is_some() {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Merge every document of `documents` into one figment, later files winning.
pub(crate) fn merge_documents(documents: &[PathBuf]) -> Figment {
    documents
        .iter()
        .fold(Figment::new(), |figment, path| match document_kind(path) {
            Some(DocumentKind::Toml) => figment.merge(Toml::file(path)),
            Some(DocumentKind::Yaml) => figment.merge(Yaml::file(path)),
            None => figment,
        })
}

/// Load configuration from every document in `dir` with environment variable overrides
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::DirectoryNotFound(dir.display().to_string()));
    }

    let documents =
        list_documents(dir).map_err(|e| ConfigError::ReadError(format!("{}: {}", dir.display(), e)))?;
    if documents.is_empty() {
        return Err(ConfigError::FileNotFound(dir.display().to_string()));
    }

    let config: Config = merge_documents(&documents)
        .merge(Env::prefixed(ENV_OVERRIDE_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
