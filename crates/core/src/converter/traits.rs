//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::Path;

use super::command::ConversionCommand;
use super::error::ToolError;
use super::types::Title;

/// Reads the embedded title of a media file.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Returns the name of this prober implementation.
    fn name(&self) -> &str;

    /// Probes `path` and returns its title metadata.
    async fn probe_title(&self, path: &Path) -> Result<Title, ToolError>;
}

/// Runs a conversion command to completion.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Runs `command`. Success means the tool exited with status zero.
    async fn transcode(&self, command: &ConversionCommand) -> Result<(), ToolError>;
}
