//! Configuration validation.

use crate::config::{Config, DefaultsConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults(&config.defaults)?;

    if config.synthesis.program.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "synthesis.program must not be empty".to_string(),
        });
    }

    if config.output.dir_name.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "output.dir_name must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate build settings after CLI overrides have been applied.
pub fn validate_defaults(defaults: &DefaultsConfig) -> Result<()> {
    if defaults.sample_rate == 0 {
        return Err(Error::ConfigValidation {
            message: "sample_rate must be at least 1".to_string(),
        });
    }

    if !(defaults.window_len.is_finite() && defaults.window_len > 0.0) {
        return Err(Error::ConfigValidation {
            message: format!("window_len must be positive, got {}", defaults.window_len),
        });
    }

    // Windows are clamped into the recording; a recording shorter than a
    // window has no valid placement.
    if !defaults.recording_duration.is_finite()
        || defaults.recording_duration < defaults.window_len
    {
        return Err(Error::ConfigValidation {
            message: format!(
                "recording_duration ({}) must be at least window_len ({})",
                defaults.recording_duration, defaults.window_len
            ),
        });
    }

    if defaults.jobs == 0 {
        return Err(Error::ConfigValidation {
            message: "jobs must be at least 1".to_string(),
        });
    }

    Ok(())
}
