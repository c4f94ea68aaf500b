use crate::model::{Confidence, IntradayPoint, SessionStats};

/// Change magnitude at or above which a move is high confidence.
pub const HIGH_CONFIDENCE_PCT: f64 = 1.5;
/// Change magnitude at or above which a move is medium confidence.
pub const MEDIUM_CONFIDENCE_PCT: f64 = 1.0;

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Exponential moving average seeded with the first value, `k = 2 / (span + 1)`.
    /// Returns a series of the same length as `data`.
    pub fn ema(data: &[f64], span: usize) -> Vec<f64> {
        let Some(&seed) = data.first() else {
            return Vec::new();
        };
        let k = 2.0 / (span as f64 + 1.0);

        let mut result = Vec::with_capacity(data.len());
        result.push(seed);
        let mut prev = seed;
        for &value in &data[1..] {
            // close·k + prev·(1−k), arranged so a flat series stays exactly flat
            prev += k * (value - prev);
            result.push(prev);
        }
        result
    }

    /// Convenience wrapper smoothing the closes of `points`.
    pub fn ema_of_closes(points: &[IntradayPoint], span: usize) -> Vec<f64> {
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        Self::ema(&closes, span)
    }

    /// Percentage change from `base` to `value`. A zero base is not guarded.
    pub fn percent_change(base: f64, value: f64) -> f64 {
        (value - base) / base * 100.0
    }

    /// Session-level summary metrics. All zero for an empty session.
    pub fn session_stats(points: &[IntradayPoint]) -> SessionStats {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return SessionStats::default();
        };

        let total_volume: f64 = points.iter().map(|p| p.volume).sum();
        let session_high = points.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);
        let session_low = points.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);

        SessionStats {
            range_pct: (session_high - session_low) / session_low * 100.0,
            avg_volume: total_volume / points.len() as f64,
            session_change_pct: Self::percent_change(first.close, last.close),
            session_high,
            session_low,
        }
    }

    /// Maps the magnitude of a percentage change onto a confidence level.
    /// NaN falls through to `Low`.
    pub fn confidence_for(change_pct: f64) -> Confidence {
        let magnitude = change_pct.abs();
        if magnitude >= HIGH_CONFIDENCE_PCT {
            Confidence::High
        } else if magnitude >= MEDIUM_CONFIDENCE_PCT {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}
