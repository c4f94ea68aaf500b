use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::model::{Direction, IntradayPoint, PatternInsight};
use crate::utils::format_signed_pct;

/// Trailing window length used to measure the range.
pub const WINDOW: usize = 10;
/// Samples after the tightest window at which the breakout is measured.
pub const BREAKOUT_OFFSET: usize = 3;
/// Minimum breakout magnitude, in percent.
pub const BREAKOUT_THRESHOLD_PCT: f64 = 0.8;
/// Series shorter than this never yield a compression insight.
pub const MIN_POINTS: usize = 20;

/// The tightest trailing window found in a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compression {
    /// First sample after the window.
    pub index: usize,
    /// Window high-low range relative to the close at `index`.
    pub range: f64,
}

/// Finds the trailing window with the smallest range relative to price.
/// Ties keep the first occurrence. NaN ranges never win, in which case the first
/// scanned index is reported.
pub fn tightest_window(points: &[IntradayPoint]) -> Option<Compression> {
    if points.len() <= WINDOW {
        return None;
    }

    let mut best = Compression { index: WINDOW, range: f64::INFINITY };
    for i in WINDOW..points.len() {
        let window = &points[i - WINDOW..i];
        let high = window.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);
        let low = window.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);
        let range = (high - low) / points[i].close;
        if range < best.range {
            best = Compression { index: i, range };
        }
    }
    Some(best)
}

/// Evaluates the move following the tightest window. Returns at most one insight.
pub fn detect_compression_breakout(points: &[IntradayPoint]) -> Vec<PatternInsight> {
    if points.len() < MIN_POINTS {
        return Vec::new();
    }
    let Some(compression) = tightest_window(points) else {
        return Vec::new();
    };

    let breakout_index = (points.len() - 1).min(compression.index + BREAKOUT_OFFSET);
    let change_pct = MarketAnalyzer::percent_change(
        points[compression.index].close,
        points[breakout_index].close,
    );
    if change_pct.abs() < BREAKOUT_THRESHOLD_PCT {
        return Vec::new();
    }

    let direction = Direction::from_change(change_pct);
    let follow_through = match direction {
        Direction::Bullish => "broke out higher",
        Direction::Bearish => "broke down",
    };

    vec![PatternInsight {
        id: format!("compression-{}", breakout_index),
        title: "Volatility compression breakout".to_string(),
        description: format!(
            "Range tightened to {:.2}% of price across {} bars, then price {} {} within {} bars.",
            compression.range * 100.0,
            WINDOW,
            follow_through,
            format_signed_pct(change_pct),
            breakout_index - compression.index
        ),
        confidence: MarketAnalyzer::confidence_for(change_pct),
        start_index: Some(compression.index),
        end_index: Some(breakout_index),
        change_pct: Some(change_pct),
        direction: Some(direction),
    }]
}
