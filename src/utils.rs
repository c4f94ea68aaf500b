// Utility functions
use chrono::DateTime;

/// Formats epoch seconds as `HH:mm` (UTC). Out-of-range timestamps render as `--:--`.
pub fn format_clock(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".into())
}

/// Signed percentage with two decimals, e.g. `+1.49%`.
pub fn format_signed_pct(value: f64) -> String {
    format!("{:+.2}%", value)
}
