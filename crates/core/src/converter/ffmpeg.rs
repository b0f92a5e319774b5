//! FFmpeg/FFprobe subprocess implementations.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::command::ConversionCommand;
use super::error::ToolError;
use super::traits::{Prober, Transcoder};
use super::types::Title;
use crate::config::{FfmpegConfig, FfprobeConfig};

/// Lines of stderr kept in a failure report.
const STDERR_TAIL_LINES: usize = 20;

/// Runs `program` with `args` and waits for it to exit.
///
/// Without a timeout the call blocks for as long as the tool runs.
async fn run_tool(
    tool: &str,
    program: &Path,
    args: &[OsString],
    timeout_secs: Option<u64>,
) -> Result<Output, ToolError> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound {
                    tool: tool.to_string(),
                    path: program.to_path_buf(),
                }
            } else {
                ToolError::Io(e)
            }
        })?;

    let output = match timeout_secs {
        Some(secs) => timeout(Duration::from_secs(secs), child.wait_with_output())
            .await
            // Dropping the future kills the child (kill_on_drop).
            .map_err(|_| ToolError::Timeout {
                tool: tool.to_string(),
                timeout_secs: secs,
            })??,
        None => child.wait_with_output().await?,
    };

    if !output.status.success() {
        return Err(ToolError::failed(
            tool,
            output.status.code(),
            stderr_tail(&output.stderr),
        ));
    }

    Ok(output)
}

fn stderr_tail(stderr: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return None;
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    Some(lines[start..].join("\n"))
}

/// Title prober backed by `ffprobe`.
///
/// Invoked as `<path> [additional_args] <file>`, the title is read from stdout.
pub struct FfprobeProber {
    config: FfprobeConfig,
}

impl FfprobeProber {
    pub fn new(config: FfprobeConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FfprobeConfig::default())
    }

    fn build_args(&self, path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self
            .config
            .additional_args
            .iter()
            .map(OsString::from)
            .collect();
        args.push(path.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl Prober for FfprobeProber {
    fn name(&self) -> &str {
        "ffprobe"
    }

    async fn probe_title(&self, path: &Path) -> Result<Title, ToolError> {
        let output = run_tool(
            self.name(),
            &self.config.path,
            &self.build_args(path),
            self.config.timeout_secs,
        )
        .await?;

        let title = Title::from_probe_output(&String::from_utf8_lossy(&output.stdout));
        debug!("Probed {:?}: {:?}", path, title.as_str());
        Ok(title)
    }
}

/// Transcoder backed by `ffmpeg`.
pub struct FfmpegTranscoder {
    config: FfmpegConfig,
}

impl FfmpegTranscoder {
    pub fn new(config: FfmpegConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FfmpegConfig::default())
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn transcode(&self, command: &ConversionCommand) -> Result<(), ToolError> {
        let start = Instant::now();

        if let Some(parent) = command.output().parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        run_tool(
            self.name(),
            command.program(),
            &command.args(),
            self.config.timeout_secs,
        )
        .await?;

        debug!(
            "ffmpeg finished {:?} in {} ms",
            command.output(),
            start.elapsed().as_millis()
        );
        Ok(())
    }
}
