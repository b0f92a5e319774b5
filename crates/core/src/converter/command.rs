//! Transcoding command line construction.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::FfmpegConfig;
use crate::secrets::ActivationBytes;

const REDACTED: &str = "<redacted>";

/// A single ffmpeg invocation:
/// `<path> [additional_args] -activation_bytes <secret> -i <input> -c copy <output>`.
///
/// `Display` renders the command with the activation bytes redacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionCommand {
    program: PathBuf,
    additional_args: Vec<String>,
    activation_bytes: ActivationBytes,
    input: PathBuf,
    output: PathBuf,
}

impl ConversionCommand {
    pub fn build(
        config: &FfmpegConfig,
        activation_bytes: &ActivationBytes,
        input: &Path,
        output: &Path,
    ) -> Self {
        Self {
            program: config.path.clone(),
            additional_args: config.additional_args.clone(),
            activation_bytes: activation_bytes.clone(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Arguments passed to the program, secret included.
    pub fn args(&self) -> Vec<OsString> {
        self.build_args(self.activation_bytes.expose())
    }

    /// Arguments with the activation bytes replaced, for logging.
    pub fn redacted_args(&self) -> Vec<String> {
        self.build_args(REDACTED)
            .into_iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    fn build_args(&self, secret: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.additional_args.iter().map(OsString::from).collect();
        args.extend([
            OsString::from("-activation_bytes"),
            OsString::from(secret),
            OsString::from("-i"),
            self.input.clone().into_os_string(),
            OsString::from("-c"),
            OsString::from("copy"),
            self.output.clone().into_os_string(),
        ]);
        args
    }
}

impl fmt::Display for ConversionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in self.redacted_args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
