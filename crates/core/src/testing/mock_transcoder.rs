//! Mock transcoder for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{ConversionCommand, ToolError, Transcoder};

/// A recorded transcode call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranscode {
    /// The command that was submitted.
    pub command: ConversionCommand,
    /// Whether the transcode succeeded.
    pub success: bool,
}

/// What a successful mock transcode leaves at the output path.
#[derive(Debug, Clone, Default)]
pub enum MockOutput {
    /// Copy the input's bytes (a `-c copy` remux of the same size).
    #[default]
    CopyInput,
    /// Write these bytes.
    Bytes(Vec<u8>),
    /// Leave nothing behind.
    Nothing,
}

/// Mock implementation of the Transcoder trait.
///
/// Records every command, writes an output file on success and supports
/// error injection. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTranscoder {
    /// Recorded transcodes.
    transcodes: Arc<RwLock<Vec<RecordedTranscode>>>,
    /// If set, the next transcode will fail with this error.
    next_error: Arc<RwLock<Option<ToolError>>>,
    /// Output written on success.
    output: Arc<RwLock<MockOutput>>,
}

impl MockTranscoder {
    /// Create a new mock transcoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded transcodes.
    pub async fn recorded_transcodes(&self) -> Vec<RecordedTranscode> {
        self.transcodes.read().await.clone()
    }

    /// Get the number of transcodes attempted.
    pub async fn transcode_count(&self) -> usize {
        self.transcodes.read().await.len()
    }

    /// Configure the next transcode to fail with the given error.
    pub async fn set_next_error(&self, error: ToolError) {
        *self.next_error.write().await = Some(error);
    }

    /// Choose what successful transcodes write.
    pub async fn set_output(&self, output: MockOutput) {
        *self.output.write().await = output;
    }

    async fn write_output(&self, command: &ConversionCommand) -> Result<(), ToolError> {
        if let Some(parent) = command.output().parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        match &*self.output.read().await {
            MockOutput::CopyInput => {
                let bytes = tokio::fs::read(command.input()).await.unwrap_or_default();
                tokio::fs::write(command.output(), bytes).await?;
            }
            MockOutput::Bytes(bytes) => tokio::fs::write(command.output(), bytes).await?,
            MockOutput::Nothing => {}
        }
        Ok(())
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcode(&self, command: &ConversionCommand) -> Result<(), ToolError> {
        if let Some(err) = self.next_error.write().await.take() {
            self.transcodes.write().await.push(RecordedTranscode {
                command: command.clone(),
                success: false,
            });
            return Err(err);
        }

        self.write_output(command).await?;

        self.transcodes.write().await.push(RecordedTranscode {
            command: command.clone(),
            success: true,
        });
        Ok(())
    }
}
