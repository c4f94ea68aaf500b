use crate::analyzer::price_analysis::Analyzer;
use crate::model::{AnalysisSummary, IntradayPoint};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Fingerprint of a point sequence: timestamps plus the exact bit patterns of every value.
pub fn fingerprint(points: &[IntradayPoint]) -> u64 {
    let mut hasher = DefaultHasher::new();
    points.len().hash(&mut hasher);
    for p in points {
        p.timestamp.hash(&mut hasher);
        for value in [p.open, p.high, p.low, p.close, p.volume] {
            value.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}

/// Result of a cached analysis.
#[derive(Debug, Clone)]
pub struct CachedAnalysis {
    pub summary: Arc<AnalysisSummary>,
    /// False when the input matched the previous sequence for this key.
    pub changed: bool,
}

/// Remembers the last analysis per instrument so an unchanged fetch is not re-analyzed.
#[derive(Default)]
pub struct AnalysisCache {
    entries: HashMap<String, (u64, Arc<AnalysisSummary>)>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze<A: Analyzer + ?Sized>(
        &mut self,
        key: &str,
        points: &[IntradayPoint],
        analyzer: &A,
    ) -> CachedAnalysis {
        let print = fingerprint(points);
        if let Some((cached_print, summary)) = self.entries.get(key) {
            if *cached_print == print {
                return CachedAnalysis { summary: summary.clone(), changed: false };
            }
        }

        let summary = Arc::new(analyzer.analyze(points));
        self.entries.insert(key.to_string(), (print, summary.clone()));
        CachedAnalysis { summary, changed: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::price_analysis::AnalyzerImpl;
    use std::cell::Cell;

    struct CountingAnalyzer {
        calls: Cell<usize>,
    }

    impl Analyzer for CountingAnalyzer {
        fn analyze(&self, points: &[IntradayPoint]) -> AnalysisSummary {
            self.calls.set(self.calls.get() + 1);
            AnalyzerImpl::new().analyze(points)
        }
    }

    fn points(last_close: f64) -> Vec<IntradayPoint> {
        vec![
            IntradayPoint { timestamp: 60, open: 10.0, high: 10.5, low: 9.5, close: 10.0, volume: 5.0 },
            IntradayPoint { timestamp: 120, open: 10.0, high: 11.0, low: 9.9, close: last_close, volume: 7.0 },
        ]
    }

    #[test]
    fn identical_input_is_served_from_cache() {
        let analyzer = CountingAnalyzer { calls: Cell::new(0) };
        let mut cache = AnalysisCache::new();

        let first = cache.analyze("AAPL", &points(10.8), &analyzer);
        let second = cache.analyze("AAPL", &points(10.8), &analyzer);

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(analyzer.calls.get(), 1);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn changed_input_or_key_recomputes() {
        let analyzer = CountingAnalyzer { calls: Cell::new(0) };
        let mut cache = AnalysisCache::new();

        cache.analyze("AAPL", &points(10.8), &analyzer);
        assert!(cache.analyze("AAPL", &points(10.9), &analyzer).changed);
        assert!(cache.analyze("MSFT", &points(10.9), &analyzer).changed);
        assert!(!cache.analyze("MSFT", &points(10.9), &analyzer).changed);
        assert_eq!(analyzer.calls.get(), 3);
    }

    #[test]
    fn fingerprint_sees_value_changes() {
        assert_eq!(fingerprint(&points(10.8)), fingerprint(&points(10.8)));
        assert_ne!(fingerprint(&points(10.8)), fingerprint(&points(10.81)));
        assert_ne!(fingerprint(&[]), fingerprint(&points(10.8)));
    }
}
