//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while invoking an external media tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool binary not found.
    #[error("{tool} not found at path: {path}")]
    NotFound { tool: String, path: PathBuf },

    /// Tool exited with a non-zero status.
    #[error("{tool} exited with code {code:?}")]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: Option<String>,
    },

    /// Tool did not finish in time and was killed.
    #[error("{tool} timed out after {timeout_secs} seconds")]
    Timeout { tool: String, timeout_secs: u64 },

    /// Output failed the post-conversion check.
    #[error("Output verification failed for {path}: {reason}")]
    VerificationFailed { path: PathBuf, reason: String },

    /// I/O error while running the tool.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Creates a failed-run error.
    pub fn failed(tool: impl Into<String>, code: Option<i32>, stderr: Option<String>) -> Self {
        Self::Failed {
            tool: tool.into(),
            code,
            stderr,
        }
    }

    /// Creates a verification error.
    pub fn verification_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::VerificationFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Captured standard error of a failed run, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Failed { stderr, .. } => stderr.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ToolError::failed("ffmpeg", Some(1), Some("Invalid data".to_string()));
        assert_eq!(err.to_string(), "ffmpeg exited with code Some(1)");
        assert_eq!(err.stderr(), Some("Invalid data"));

        let err = ToolError::NotFound {
            tool: "ffprobe".to_string(),
            path: PathBuf::from("/opt/ffprobe"),
        };
        assert_eq!(err.to_string(), "ffprobe not found at path: /opt/ffprobe");
        assert!(err.stderr().is_none());
    }
}
