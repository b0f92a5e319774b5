//! Testing utilities and mock implementations of the tool traits.
//!
//! The mocks let the catalog builder and the planner run against real
//! directories without spawning ffmpeg or ffprobe.
//!
//! # Example
//!
//! ```rust,ignore
//! use aaxconv_core::testing::{fixtures, MockProber, MockTranscoder};
//!
//! let prober = MockProber::new();
//! let transcoder = MockTranscoder::new();
//! let settings = fixtures::settings(&input_dir, &output_dir);
//!
//! let planner = ConversionPlanner::new(settings, prober.clone(), transcoder.clone(), fixtures::activation_bytes());
//! planner.run().await?;
//! assert_eq!(transcoder.transcode_count().await, 1);
//! ```

mod mock_prober;
mod mock_transcoder;

pub use mock_prober::MockProber;
pub use mock_transcoder::{MockOutput, MockTranscoder, RecordedTranscode};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::Path;

    use crate::config::{DuplicatePolicy, FfmpegConfig};
    use crate::planner::PlannerSettings;
    use crate::secrets::ActivationBytes;

    /// Activation bytes used throughout the tests.
    pub fn activation_bytes() -> ActivationBytes {
        ActivationBytes::new("1a2b3c4d")
    }

    /// Planner settings for `.aax` to `.m4b` with every policy off.
    pub fn settings(input_dir: &Path, output_dir: &Path) -> PlannerSettings {
        PlannerSettings {
            input_dir: input_dir.to_path_buf(),
            input_extension: ".aax".to_string(),
            output_dir: output_dir.to_path_buf(),
            output_extension: ".m4b".to_string(),
            overwrite: false,
            cleanup: false,
            on_duplicate: DuplicatePolicy::Abort,
            conversion_enabled: true,
            verify_tolerance: None,
            ffmpeg: FfmpegConfig::default(),
        }
    }
}
