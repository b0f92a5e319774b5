//! Settings the planner reads from the loaded configuration.

use std::path::PathBuf;

use crate::config::{Config, DuplicatePolicy, FfmpegConfig};

/// Everything the planner needs to decide and act on each candidate.
#[derive(Debug, Clone)]
pub struct PlannerSettings {
    pub input_dir: PathBuf,
    pub input_extension: String,
    pub output_dir: PathBuf,
    pub output_extension: String,
    /// Bypass both the duplicate short-circuit and the existing-output skip.
    pub overwrite: bool,
    /// Delete inputs after conversion or on a duplicate hit.
    pub cleanup: bool,
    pub on_duplicate: DuplicatePolicy,
    /// `ffmpeg.run`; when false nothing is transcoded.
    pub conversion_enabled: bool,
    /// Relative size tolerance when output verification is on.
    pub verify_tolerance: Option<f64>,
    pub ffmpeg: FfmpegConfig,
}

impl From<&Config> for PlannerSettings {
    fn from(config: &Config) -> Self {
        Self {
            input_dir: config.input.path.clone(),
            input_extension: config.input.extension.clone(),
            output_dir: config.output.path.clone(),
            output_extension: config.output.extension.clone(),
            overwrite: config.output.overwrite,
            cleanup: config.input.cleanup,
            on_duplicate: config.input.on_duplicate,
            conversion_enabled: config.ffmpeg.run,
            verify_tolerance: config
                .output
                .verify
                .then_some(config.output.size_tolerance),
            ffmpeg: config.ffmpeg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_settings_from_config() {
        let config = load_config_from_str(
            r#"
[input]
path = "/in"
cleanup = true

[output]
path = "/out"
verify = true
size_tolerance = 0.05

[ffmpeg]
run = false
"#,
        )
        .unwrap();

        let settings = PlannerSettings::from(&config);
        assert_eq!(settings.input_dir, PathBuf::from("/in"));
        assert_eq!(settings.output_extension, ".m4b");
        assert!(settings.cleanup);
        assert!(!settings.overwrite);
        assert!(!settings.conversion_enabled);
        assert_eq!(settings.verify_tolerance, Some(0.05));
        assert_eq!(settings.on_duplicate, DuplicatePolicy::Abort);
    }

    #[test]
    fn test_verification_off_by_default() {
        let config = load_config_from_str(
            r#"
[input]
path = "/in"

[output]
path = "/out"
"#,
        )
        .unwrap();
        assert!(PlannerSettings::from(&config).verify_tolerance.is_none());
    }
}
