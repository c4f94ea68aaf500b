// Chart-endpoint JSON parsing
use crate::model::{IntradayPoint, ParserError};
use serde::Deserialize;

pub trait Parser {
    fn parse(&self, body: &str) -> Result<Vec<IntradayPoint>, ParserError>;
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Default)]
pub struct ChartParser;

impl ChartParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for ChartParser {
    /// Decodes parallel OHLCV arrays into points. Samples with a null close or volume are
    /// dropped; null open/high/low fall back to the close.
    fn parse(&self, body: &str) -> Result<Vec<IntradayPoint>, ParserError> {
        let envelope: ChartEnvelope = serde_json::from_str(body)?;

        if let Some(err) = envelope.chart.error {
            return Err(ParserError::ProviderError {
                code: err.code,
                description: err.description,
            });
        }

        let result = envelope
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| ParserError::MissingField("chart.result".into()))?;

        if result.timestamp.is_empty() {
            return Ok(Vec::new());
        }
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ParserError::MissingField("indicators.quote".into()))?;

        let n = result.timestamp.len();
        if quote.close.len() != n || quote.volume.len() != n {
            return Err(ParserError::LengthMismatch(format!(
                "{} timestamps, {} closes, {} volumes",
                n,
                quote.close.len(),
                quote.volume.len()
            )));
        }

        let at = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();
        let points = result
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &timestamp)| {
                let close = at(&quote.close, i)?;
                let volume = at(&quote.volume, i)?;
                Some(IntradayPoint {
                    timestamp,
                    open: at(&quote.open, i).unwrap_or(close),
                    high: at(&quote.high, i).unwrap_or(close),
                    low: at(&quote.low, i).unwrap_or(close),
                    close,
                    volume,
                })
            })
            .collect();

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL" },
                "timestamp": [1709287200, 1709287260, 1709287320],
                "indicators": { "quote": [{
                    "open":   [100.0, null, 100.4],
                    "high":   [100.5, 100.6, null],
                    "low":    [99.8, 100.0, 100.1],
                    "close":  [100.2, null, 100.3],
                    "volume": [1200, 800, 950]
                }]}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn drops_samples_without_close() {
        let points = ChartParser::new().parse(BODY).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp, 1_709_287_200);
        assert_eq!(points[0].close, 100.2);
        assert_eq!(points[1].timestamp, 1_709_287_320);
        assert_eq!(points[1].volume, 950.0);
    }

    #[test]
    fn missing_high_falls_back_to_close() {
        let points = ChartParser::default().parse(BODY).unwrap();
        assert_eq!(points[1].high, 100.3);
        assert_eq!(points[1].open, 100.4);
    }

    #[test]
    fn provider_error_is_reported() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        match ChartParser::new().parse(body) {
            Err(ParserError::ProviderError { code, .. }) => assert_eq!(code, "Not Found"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn result_without_timestamps_is_empty() {
        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(ChartParser::new().parse(body).unwrap().is_empty());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let body = r#"{"chart":{"result":[{"timestamp":[1,2],"indicators":{"quote":[{"close":[1.0],"volume":[1,2]}]}}],"error":null}}"#;
        assert!(matches!(
            ChartParser::new().parse(body),
            Err(ParserError::LengthMismatch(_))
        ));
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(
            ChartParser::new().parse("<html>"),
            Err(ParserError::JsonParseError(_))
        ));
    }
}
