pub mod fetcher;
pub mod traits;

pub use fetcher::ChartFetcher;
pub use traits::QuoteFetcher;

use crate::model::{QuoteError, QuoteRequest};

pub const SUPPORTED_RANGES: &[&str] = &["1d", "5d", "1mo"];
pub const SUPPORTED_INTERVALS: &[&str] = &["1m", "2m", "5m", "15m", "30m", "60m", "90m"];

/// Checks a request before any I/O. One-minute bars are only served for short ranges.
pub fn validate_request(req: &QuoteRequest) -> Result<(), QuoteError> {
    if req.symbol.is_empty() || req.symbol.chars().any(char::is_whitespace) {
        return Err(QuoteError::InvalidRequest(format!("bad symbol {:?}", req.symbol)));
    }
    if !SUPPORTED_RANGES.contains(&req.range.as_str()) {
        return Err(QuoteError::InvalidRequest(format!("unsupported range {}", req.range)));
    }
    if !SUPPORTED_INTERVALS.contains(&req.interval.as_str()) {
        return Err(QuoteError::InvalidRequest(format!(
            "unsupported interval {}",
            req.interval
        )));
    }
    if req.interval == "1m" && req.range == "1mo" {
        return Err(QuoteError::InvalidRequest(
            "1m bars are limited to the 1d and 5d ranges".into(),
        ));
    }
    Ok(())
}
