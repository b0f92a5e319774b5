//! Types shared by the probing and transcoding tools.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// An audio file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MediaFile {
    path: PathBuf,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its last extension (`book1.aax` -> `book1`).
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Last extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
    }

    /// Deterministic destination: `{output_dir}/{stem}{output_extension}`.
    pub fn output_path(&self, output_dir: &Path, output_extension: &str) -> PathBuf {
        output_dir.join(format!("{}{}", self.stem(), output_extension))
    }

    /// Whether the file name ends with `suffix`, ignoring ASCII case.
    pub fn has_suffix(path: &Path, suffix: &str) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        name.len() >= suffix.len()
            && name.is_char_boundary(name.len() - suffix.len())
            && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    }
}

impl fmt::Display for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Embedded title metadata, used as the content fingerprint of a book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds a title from the probing tool's standard output.
    ///
    /// Only the trailing line terminator(s) are removed.
    pub fn from_probe_output(stdout: &str) -> Self {
        Self(stdout.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
