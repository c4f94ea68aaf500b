use crate::model::{Confidence, QuoteRequest};
use crate::quotes::validate_request;
use serde::Deserialize;
use std::fs;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentConfig {
    pub symbol: String,
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_min_alert_confidence")]
    pub min_alert_confidence: Confidence,
}

impl InstrumentConfig {
    pub fn request(&self) -> QuoteRequest {
        QuoteRequest {
            symbol: self.symbol.clone(),
            range: self.range.clone(),
            interval: self.interval.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub telegram_chat_id: i64,
    pub instruments: Vec<InstrumentConfig>,
    pub check_interval_seconds: u64,
    #[serde(default)]
    pub jitter_seconds: u64,
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_range() -> String {
    "1d".into()
}

fn default_interval() -> String {
    "5m".into()
}

fn default_min_alert_confidence() -> Confidence {
    Confidence::Medium
}

fn default_database_path() -> String {
    "alerts.db".into()
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    if config.instruments.is_empty() {
        return Err(ConfigError::Invalid("no instruments configured".into()));
    }
    for instrument in &config.instruments {
        validate_request(&instrument.request())
            .map_err(|e| ConfigError::Invalid(format!("{}: {}", instrument.symbol, e)))?;
    }
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
