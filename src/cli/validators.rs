//! CLI argument validators.

/// Parse a strictly positive, finite number of seconds.
pub fn parse_positive_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("seconds must be greater than 0, got {value}"));
    }

    Ok(value)
}

/// Parse a non-zero sample rate in Hz.
pub fn parse_sample_rate(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid sample rate"))?;

    if value == 0 {
        return Err("sample rate must be at least 1 Hz".to_string());
    }

    Ok(value)
}
