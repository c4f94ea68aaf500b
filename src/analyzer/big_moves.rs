use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::model::{Direction, IntradayPoint, PatternInsight, SignalMarker};
use crate::utils::{format_clock, format_signed_pct};

/// Samples between the base close and the measured close.
pub const LOOKBACK: usize = 3;
/// Minimum absolute move, in percent.
pub const THRESHOLD_PCT: f64 = 0.6;
/// Strongest moves kept after ranking.
pub const MAX_MOVES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct BigMove {
    pub index: usize,
    pub span_start: usize,
    pub change_pct: f64,
    pub direction: Direction,
}

/// Every lookback-window move whose magnitude reaches the threshold, in scan order.
pub fn scan_moves(points: &[IntradayPoint]) -> Vec<BigMove> {
    (LOOKBACK..points.len())
        .filter_map(|i| {
            let span_start = i - LOOKBACK;
            let change_pct = MarketAnalyzer::percent_change(points[span_start].close, points[i].close);
            (change_pct.abs() >= THRESHOLD_PCT).then(|| BigMove {
                index: i,
                span_start,
                change_pct,
                direction: Direction::from_change(change_pct),
            })
        })
        .collect()
}

/// Ranks candidates by magnitude and keeps the strongest.
/// The sort is stable, so equal magnitudes stay in discovery order.
pub fn strongest_moves(mut moves: Vec<BigMove>) -> Vec<BigMove> {
    moves.sort_by(|a, b| {
        b.change_pct
            .abs()
            .partial_cmp(&a.change_pct.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    moves.truncate(MAX_MOVES);
    moves
}

/// Detects sharp short-horizon moves, returning one insight and one chart marker per move,
/// both ordered strongest first.
pub fn detect_big_moves(points: &[IntradayPoint]) -> (Vec<PatternInsight>, Vec<SignalMarker>) {
    let moves = strongest_moves(scan_moves(points));

    let mut insights = Vec::with_capacity(moves.len());
    let mut signals = Vec::with_capacity(moves.len());
    for mv in moves {
        let confidence = MarketAnalyzer::confidence_for(mv.change_pct);
        let start = &points[mv.span_start];
        let end = &points[mv.index];
        let (title, verb, label) = match mv.direction {
            Direction::Bullish => ("Sharp upside move", "pushed higher", "Momentum Upswing"),
            Direction::Bearish => ("Sharp downside move", "dropped", "Momentum Flush"),
        };

        insights.push(PatternInsight {
            id: format!("big-move-{}", mv.index),
            title: title.to_string(),
            description: format!(
                "Price {} {} between {} and {} over {} bars.",
                verb,
                format_signed_pct(mv.change_pct),
                format_clock(start.timestamp),
                format_clock(end.timestamp),
                LOOKBACK
            ),
            confidence,
            start_index: Some(mv.span_start),
            end_index: Some(mv.index),
            change_pct: Some(mv.change_pct),
            direction: Some(mv.direction),
        });
        signals.push(SignalMarker {
            timestamp: end.timestamp,
            price: end.close,
            label: label.to_string(),
            confidence,
            direction: mv.direction,
        });
    }

    (insights, signals)
}
