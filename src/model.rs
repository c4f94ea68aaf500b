// Core structs: IntradayPoint, PatternInsight, AnalysisSummary
use serde::{Deserialize, Serialize};

/// One OHLCV sample. `timestamp` is seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayPoint {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    /// Non-negative changes count as bullish.
    pub fn from_change(change_pct: f64) -> Self {
        if change_pct >= 0.0 {
            Direction::Bullish
        } else {
            Direction::Bearish
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Bullish => "bullish",
            Direction::Bearish => "bearish",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInsight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Chart-anchorable event, always positioned on an existing point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMarker {
    pub timestamp: i64,
    pub price: f64,
    pub label: String,
    pub confidence: Confidence,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub range_pct: f64,
    pub avg_volume: f64,
    pub session_change_pct: f64,
    pub session_high: f64,
    pub session_low: f64,
}

/// The engine's sole output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub narrative: String,
    pub stats: SessionStats,
    pub insights: Vec<PatternInsight>,
    pub signals: Vec<SignalMarker>,
    pub ema9: Vec<f64>,
    pub ema21: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub symbol: String,
    pub range: String,
    pub interval: String,
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("provider error {code}: {description}")]
    Provider { code: String, description: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] ParserError),
}

#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("series length mismatch: {0}")]
    LengthMismatch(String),
    #[error("provider error {code}: {description}")]
    ProviderError { code: String, description: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Telegram unreachable")]
    Unreachable,
}
