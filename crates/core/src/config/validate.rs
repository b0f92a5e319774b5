use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Input and output extensions are not empty
/// - Output extension starts with a dot (it is appended to the input's stem)
/// - Size tolerance is a ratio between 0 and 1
/// - Tool paths are not empty and timeouts, when set, are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.input.extension.is_empty() {
        return Err(ConfigError::ValidationError(
            "input.extension cannot be empty".to_string(),
        ));
    }

    if !config.output.extension.starts_with('.') || config.output.extension.len() < 2 {
        return Err(ConfigError::ValidationError(format!(
            "output.extension must look like \".m4b\", got {:?}",
            config.output.extension
        )));
    }

    let tolerance = config.output.size_tolerance;
    if !tolerance.is_finite() || !(0.0..=1.0).contains(&tolerance) {
        return Err(ConfigError::ValidationError(format!(
            "output.size_tolerance must be between 0 and 1, got {}",
            tolerance
        )));
    }

    if config.ffmpeg.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "ffmpeg.path cannot be empty".to_string(),
        ));
    }

    if config.ffprobe.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "ffprobe.path cannot be empty".to_string(),
        ));
    }

    if config.ffmpeg.timeout_secs == Some(0) || config.ffprobe.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use std::path::PathBuf;

    fn base_config() -> Config {
        load_config_from_str(
            r#"
[input]
path = "/in"

[output]
path = "/out"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_validate_output_extension_without_dot_fails() {
        let mut config = base_config();
        config.output.extension = "m4b".to_string();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        config.output.extension = ".".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_input_extension_fails() {
        let mut config = base_config();
        config.input.extension = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_size_tolerance_range() {
        let mut config = base_config();
        config.output.size_tolerance = 1.5;
        assert!(validate_config(&config).is_err());

        config.output.size_tolerance = f64::NAN;
        assert!(validate_config(&config).is_err());

        config.output.size_tolerance = 0.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_tools() {
        let mut config = base_config();
        config.ffprobe.path = PathBuf::new();
        assert!(validate_config(&config).is_err());

        let mut config = base_config();
        config.ffmpeg.timeout_secs = Some(0);
        assert!(validate_config(&config).is_err());
    }
}
