use casematch_core::config::validate_threshold;
use casematch_core::format::OutputFormat;

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a similarity threshold in `[0, 1]`
pub fn parse_threshold(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("invalid threshold: {} (expected a number)", s))?;
    validate_threshold("threshold", value).map_err(|e| e.to_string())?;
    Ok(value)
}
