//! Converter module wrapping the external media tools.
//!
//! Probing (reading a file's embedded title) and transcoding (AAX to M4B with
//! `-c copy`) are both opaque subprocess calls. They sit behind the `Prober`
//! and `Transcoder` traits so the planner can be driven by fakes in tests.
//!
//! # Example
//!
//! ```ignore
//! use aaxconv_core::converter::{ConversionCommand, FfmpegTranscoder, FfprobeProber, Prober, Transcoder};
//!
//! let prober = FfprobeProber::new(config.ffprobe.clone());
//! let title = prober.probe_title(Path::new("/audible/book1.aax")).await?;
//!
//! let command = ConversionCommand::build(
//!     &config.ffmpeg,
//!     &secrets.activation_bytes,
//!     Path::new("/audible/book1.aax"),
//!     Path::new("/books/book1.m4b"),
//! );
//! FfmpegTranscoder::new(config.ffmpeg.clone()).transcode(&command).await?;
//! ```

mod command;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use command::ConversionCommand;
pub use error::ToolError;
pub use ffmpeg::{FfmpegTranscoder, FfprobeProber};
pub use traits::{Prober, Transcoder};
pub use types::{MediaFile, Title};
