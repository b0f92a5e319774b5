//! Secret resolution.
//!
//! The only secret is the activation bytes ffmpeg needs to decrypt AAX
//! audio. They come from the documents of a secrets directory, falling back
//! to the `ACTIVATION_BYTES` environment variable.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::config::{list_documents, merge_documents};

/// Environment variable naming the secrets directory
pub const SECRETS_DIR_ENV: &str = "SECRETS_DIRECTORY_NAME";

/// Directory used when `SECRETS_DIRECTORY_NAME` is unset
pub const DEFAULT_SECRETS_DIR: &str = "secrets";

/// Fallback source of the activation bytes
pub const ACTIVATION_BYTES_ENV: &str = "ACTIVATION_BYTES";

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Activation bytes not found in secrets nor in the ACTIVATION_BYTES environment variable")]
    Missing,

    #[error("Failed to read secrets: {0}")]
    ReadError(String),

    #[error("Failed to parse secrets: {0}")]
    ParseError(String),
}

/// Decryption key for AAX files. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ActivationBytes(String);

impl ActivationBytes {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for building the ffmpeg command line.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Activation bytes are 4 bytes written as 8 hex digits.
    pub fn looks_valid(&self) -> bool {
        self.0.len() == 8 && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Debug for ActivationBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActivationBytes(<redacted>)")
    }
}

/// Resolved secrets
#[derive(Debug, Clone)]
pub struct Secrets {
    pub activation_bytes: ActivationBytes,
}

#[derive(Debug, Default, Deserialize)]
struct SecretDocuments {
    #[serde(default)]
    activation_bytes: Option<RawSecret>,
}

/// Unquoted all-digit values arrive as numbers from YAML and TOML.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSecret {
    Text(String),
    Number(u64),
}

impl RawSecret {
    fn into_string(self) -> String {
        match self {
            RawSecret::Text(s) => s,
            RawSecret::Number(n) => n.to_string(),
        }
    }
}

/// Resolve the secrets directory from the environment
pub fn secrets_dir_from_env() -> PathBuf {
    std::env::var(SECRETS_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_DIR))
}

/// Load secrets from `dir`, falling back to the `ACTIVATION_BYTES` variable
pub fn load_secrets(dir: &Path) -> Result<Secrets, SecretError> {
    resolve_secrets(dir, std::env::var(ACTIVATION_BYTES_ENV).ok())
}

/// Load secrets from `dir`, falling back to `env_value`.
pub fn resolve_secrets(dir: &Path, env_value: Option<String>) -> Result<Secrets, SecretError> {
    let from_documents = if dir.is_dir() {
        let documents = list_documents(dir)
            .map_err(|e| SecretError::ReadError(format!("{}: {}", dir.display(), e)))?;
        let parsed: SecretDocuments = merge_documents(&documents)
            .extract()
            .map_err(|e| SecretError::ParseError(e.to_string()))?;
        parsed.activation_bytes.map(RawSecret::into_string)
    } else {
        warn!(
            "Secrets directory {:?} not found, using environment variables instead",
            dir
        );
        None
    };

    let value = match from_documents.filter(|v| !v.trim().is_empty()) {
        Some(value) => value,
        None => env_value
            .filter(|v| !v.trim().is_empty())
            .ok_or(SecretError::Missing)?,
    };

    let activation_bytes = ActivationBytes::new(value.trim());
    if !activation_bytes.looks_valid() {
        warn!("Activation bytes are not 8 hex digits, ffmpeg will likely reject them");
    }

    Ok(Secrets { activation_bytes })
}
