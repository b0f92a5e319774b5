use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub ffmpeg: FfmpegConfig,
    #[serde(default)]
    pub ffprobe: FfprobeConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

/// Log verbosity. `warn` and `warning` are the same level, `critical` folds into `error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Log line layout
///
/// Any other value, such as a printf-style pattern, parses as `Custom` and is
/// rendered like `Full`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
    Custom,
}

impl LogFormat {
    /// Whether the configured value was not one of the known layouts.
    pub fn is_custom(&self) -> bool {
        matches!(self, LogFormat::Custom)
    }
}

impl std::str::FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "full" => LogFormat::Full,
            "compact" => LogFormat::Compact,
            "json" => LogFormat::Json,
            _ => LogFormat::Custom,
        })
    }
}

impl<'de> Deserialize<'de> for LogFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// What to do with the rest of the run once a duplicate title is found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Clean up the duplicate input and stop processing the remaining candidates.
    #[default]
    Abort,
    /// Clean up the duplicate input and continue with the next candidate.
    Skip,
}

/// Input (source audiobook) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Directory scanned for candidate files (not recursive).
    pub path: PathBuf,
    /// File name suffix of candidates, e.g. ".aax".
    #[serde(default = "default_input_extension")]
    pub extension: String,
    /// Delete inputs after a successful conversion or on a duplicate hit.
    #[serde(default)]
    pub cleanup: bool,
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

fn default_input_extension() -> String {
    ".aax".to_string()
}

/// Output (converted audiobook) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory converted files are written to and catalogued from.
    pub path: PathBuf,
    /// Appended to the input's stem, e.g. ".m4b".
    #[serde(default = "default_output_extension")]
    pub extension: String,
    /// Convert even when the title is already catalogued or the output exists.
    #[serde(default)]
    pub overwrite: bool,
    /// Check the output's size against the input's after each conversion.
    #[serde(default)]
    pub verify: bool,
    /// Maximum relative size difference accepted when `verify` is on.
    #[serde(default = "default_size_tolerance")]
    pub size_tolerance: f64,
}

fn default_output_extension() -> String {
    ".m4b".to_string()
}

fn default_size_tolerance() -> f64 {
    0.10
}

/// Transcoding tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FfmpegConfig {
    #[serde(default = "default_ffmpeg_path")]
    pub path: PathBuf,
    /// Spliced in right after the program name.
    #[serde(default = "default_ffmpeg_args")]
    pub additional_args: Vec<String>,
    /// When false, candidates are probed but never converted.
    #[serde(default = "default_true")]
    pub run: bool,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            path: default_ffmpeg_path(),
            additional_args: default_ffmpeg_args(),
            run: true,
            timeout_secs: None,
        }
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_ffmpeg_args() -> Vec<String> {
    vec!["-hide_banner".to_string(), "-y".to_string()]
}

fn default_true() -> bool {
    true
}

/// Probing tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FfprobeConfig {
    #[serde(default = "default_ffprobe_path")]
    pub path: PathBuf,
    /// Must make the tool print nothing but the title on stdout.
    #[serde(default = "default_ffprobe_args")]
    pub additional_args: Vec<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for FfprobeConfig {
    fn default() -> Self {
        Self {
            path: default_ffprobe_path(),
            additional_args: default_ffprobe_args(),
            timeout_secs: None,
        }
    }
}

fn default_ffprobe_path() -> PathBuf {
    PathBuf::from("ffprobe")
}

fn default_ffprobe_args() -> Vec<String> {
    [
        "-v",
        "quiet",
        "-show_entries",
        "format_tags=title",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Config view suitable for logging
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub logging: LoggingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub ffmpeg: SanitizedToolConfig,
    pub ffprobe: SanitizedToolConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedToolConfig {
    pub path: String,
    pub additional_args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            logging: config.logging.clone(),
            input: config.input.clone(),
            output: config.output.clone(),
            ffmpeg: SanitizedToolConfig {
                path: config.ffmpeg.path.display().to_string(),
                additional_args: config.ffmpeg.additional_args.clone(),
                run: Some(config.ffmpeg.run),
                timeout_secs: config.ffmpeg.timeout_secs,
            },
            ffprobe: SanitizedToolConfig {
                path: config.ffprobe.path.display().to_string(),
                additional_args: config.ffprobe.additional_args.clone(),
                run: None,
                timeout_secs: config.ffprobe.timeout_secs,
            },
        }
    }
}
