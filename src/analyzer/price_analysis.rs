use crate::analyzer::big_moves::detect_big_moves;
use crate::analyzer::compression::detect_compression_breakout;
use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::analyzer::narrative::build_narrative;
use crate::analyzer::trend_shift::detect_trend_shifts;
use crate::model::{AnalysisSummary, IntradayPoint, SessionStats};
use tracing::debug;

pub const FAST_EMA_SPAN: usize = 9;
pub const SLOW_EMA_SPAN: usize = 21;
/// Total insights returned across all detectors.
pub const MAX_INSIGHTS: usize = 6;

pub const NO_DATA_NARRATIVE: &str = "No intraday prints were returned from the data source.";

/// Trait defining the interface for an intraday analyzer.
pub trait Analyzer {
    fn analyze(&self, points: &[IntradayPoint]) -> AnalysisSummary;
}

/// Implementation of the intraday analysis engine.
#[derive(Default)]
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    /// Runs every detector over the series and assembles the summary.
    /// Insights are concatenated as big moves, trend shifts, then compression, and
    /// truncated to `MAX_INSIGHTS`, so later categories are dropped first.
    fn analyze(&self, points: &[IntradayPoint]) -> AnalysisSummary {
        if points.is_empty() {
            return AnalysisSummary {
                narrative: NO_DATA_NARRATIVE.to_string(),
                stats: SessionStats::default(),
                insights: Vec::new(),
                signals: Vec::new(),
                ema9: Vec::new(),
                ema21: Vec::new(),
            };
        }

        let ema9 = MarketAnalyzer::ema_of_closes(points, FAST_EMA_SPAN);
        let ema21 = MarketAnalyzer::ema_of_closes(points, SLOW_EMA_SPAN);

        let (move_insights, signals) = detect_big_moves(points);
        let shift_insights = detect_trend_shifts(points, &ema9, &ema21);
        let compression_insights = detect_compression_breakout(points);
        debug!(
            "Detected {} big moves, {} trend shifts, {} compression breakouts over {} points",
            move_insights.len(),
            shift_insights.len(),
            compression_insights.len(),
            points.len()
        );

        let insights = move_insights
            .into_iter()
            .chain(shift_insights)
            .chain(compression_insights)
            .take(MAX_INSIGHTS)
            .collect();

        AnalysisSummary {
            narrative: build_narrative(points),
            stats: MarketAnalyzer::session_stats(points),
            insights,
            signals,
            ema9,
            ema21,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Confidence, Direction};

    fn point(i: usize, close: f64) -> IntradayPoint {
        IntradayPoint {
            timestamp: 1_709_287_200 + i as i64 * 60,
            open: close,
            high: close + 0.05,
            low: close - 0.05,
            close,
            volume: 1_000.0 + i as f64,
        }
    }

    fn series(closes: &[f64]) -> Vec<IntradayPoint> {
        closes.iter().enumerate().map(|(i, &c)| point(i, c)).collect()
    }

    #[test]
    fn empty_input_short_circuits() {
        let summary = AnalyzerImpl::new().analyze(&[]);
        assert_eq!(summary.narrative, NO_DATA_NARRATIVE);
        assert_eq!(summary.stats, SessionStats::default());
        assert!(summary.insights.is_empty());
        assert!(summary.signals.is_empty());
        assert!(summary.ema9.is_empty());
        assert!(summary.ema21.is_empty());
    }

    #[test]
    fn single_point_keeps_stats_but_falls_back_on_narrative() {
        let summary = AnalyzerImpl::new().analyze(&series(&[100.0]));
        assert_eq!(summary.narrative, crate::analyzer::narrative::INSUFFICIENT_DATA);
        assert_eq!(summary.stats.session_high, 100.05);
        assert_eq!(summary.ema9, vec![100.0]);
        assert_eq!(summary.ema21, vec![100.0]);
    }

    #[test]
    fn ema_series_align_with_points() {
        let points = series(&[100.0, 101.0, 99.5, 102.0, 103.5, 101.0, 100.0]);
        let summary = AnalyzerImpl::new().analyze(&points);
        assert_eq!(summary.ema9.len(), points.len());
        assert_eq!(summary.ema21.len(), points.len());
        assert_eq!(summary.ema9[0], points[0].close);
        assert_eq!(summary.ema21[0], points[0].close);
    }

    #[test]
    fn constant_series_is_quiet_and_balanced() {
        let points = series(&[250.0; 40]);
        let summary = AnalyzerImpl::new().analyze(&points);
        assert!(summary.ema9.iter().all(|&v| v == 250.0));
        assert!(summary.ema21.iter().all(|&v| v == 250.0));
        assert!(summary.signals.is_empty());
        assert!(summary.insights.is_empty());
        assert!(summary.narrative.starts_with("The session is trading as a balanced"));
    }

    #[test]
    fn scenario_series_reports_the_jump() {
        let points = series(&[100.0, 100.2, 100.4, 100.7, 100.5, 101.9]);
        let summary = AnalyzerImpl::new().analyze(&points);

        let jump = summary
            .insights
            .iter()
            .find(|i| i.start_index == Some(2) && i.end_index == Some(5))
            .expect("jump insight");
        assert_eq!(jump.direction, Some(Direction::Bullish));
        assert_eq!(jump.confidence, Confidence::Medium);
        for signal in &summary.signals {
            assert!(points.iter().any(|p| p.timestamp == signal.timestamp));
        }
    }

    #[test]
    fn insights_are_capped_with_big_moves_first() {
        // Saw-tooth closes: many big moves and many EMA crossovers.
        let closes: Vec<f64> = (0..60)
            .map(|i| if (i / 4) % 2 == 0 { 100.0 } else { 103.0 })
            .collect();
        let summary = AnalyzerImpl::new().analyze(&series(&closes));

        assert_eq!(summary.insights.len(), MAX_INSIGHTS);
        assert_eq!(summary.signals.len(), 4);
        assert!(summary.insights[..4].iter().all(|i| i.id.starts_with("big-move-")));
        assert!(summary.insights[4..].iter().all(|i| i.id.contains("-cross-")));
    }

    #[test]
    fn categories_keep_priority_order_under_the_cap() {
        // Flat session, a slight uptick at 15, then a step to 101 that holds.
        let mut closes = vec![100.0; 15];
        closes.push(100.05);
        closes.extend([101.0; 9]);
        let summary = AnalyzerImpl::new().analyze(&series(&closes));

        let ids: Vec<&str> = summary.insights.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["big-move-16", "big-move-17", "big-move-18", "bullish-cross-15", "compression-18"]
        );
        assert!(summary.insights.len() < MAX_INSIGHTS);
        assert_eq!(summary.signals.len(), 3);
    }

    #[test]
    fn default_matches_new() {
        let points = series(&[100.0, 100.4, 100.9, 101.2]);
        assert_eq!(AnalyzerImpl::default().analyze(&points), AnalyzerImpl::new().analyze(&points));
    }

    #[test]
    fn falling_series_reads_bearish() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 - i as f64 * 0.3).collect();
        let summary = AnalyzerImpl::new().analyze(&series(&closes));
        assert!(summary.stats.session_change_pct < 0.0);
        assert!(summary.narrative.starts_with("Sellers have dominated"));
    }

    #[test]
    fn analysis_is_idempotent() {
        let closes: Vec<f64> = (0..45).map(|i| 100.0 + ((i * 7) % 11) as f64 * 0.2).collect();
        let points = series(&closes);
        let analyzer = AnalyzerImpl::new();
        assert_eq!(analyzer.analyze(&points), analyzer.analyze(&points));
    }
}
