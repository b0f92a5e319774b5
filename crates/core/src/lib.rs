//! Idempotent batch conversion of AAX audiobooks.
//!
//! A run lists the candidate inputs, catalogues the titles of the files
//! already converted, and converts each candidate whose title is new.

pub mod catalog;
pub mod config;
pub mod converter;
pub mod planner;
pub mod scan;
pub mod secrets;
pub mod testing;

pub use catalog::{build_catalog, Catalog, CatalogError};
pub use config::{
    config_dir_from_env, load_config, load_config_from_str, validate_config, Config, ConfigError,
    DuplicatePolicy, LogFormat, LogLevel, SanitizedConfig,
};
pub use converter::{
    ConversionCommand, FfmpegTranscoder, FfprobeProber, MediaFile, Prober, Title, ToolError,
    Transcoder,
};
pub use planner::{ConversionPlanner, Outcome, PlannerError, PlannerSettings, RunReport};
pub use scan::{list_candidates, list_converted, ScanError};
pub use secrets::{load_secrets, secrets_dir_from_env, ActivationBytes, SecretError, Secrets};
