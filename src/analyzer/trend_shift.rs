use crate::model::{Confidence, Direction, IntradayPoint, PatternInsight};
use crate::utils::format_clock;

/// Only the most recent transitions are kept.
pub const MAX_TRANSITIONS: usize = 3;

/// Detects sign changes of `fast - slow` between consecutive samples.
///
/// A zero difference counts as the boundary for both legs (`<= 0` for a bullish
/// cross, `>= 0` for a bearish one). Crossovers are always medium confidence.
pub fn detect_trend_shifts(
    points: &[IntradayPoint],
    ema_fast: &[f64],
    ema_slow: &[f64],
) -> Vec<PatternInsight> {
    let n = points.len().min(ema_fast.len()).min(ema_slow.len());

    let mut transitions = Vec::new();
    for i in 1..n {
        let prev_diff = ema_fast[i - 1] - ema_slow[i - 1];
        let curr_diff = ema_fast[i] - ema_slow[i];

        let direction = if prev_diff <= 0.0 && curr_diff > 0.0 {
            Direction::Bullish
        } else if prev_diff >= 0.0 && curr_diff < 0.0 {
            Direction::Bearish
        } else {
            continue;
        };
        transitions.push(crossover_insight(i, direction, points[i].timestamp, points[i].close));
    }

    let skip = transitions.len().saturating_sub(MAX_TRANSITIONS);
    transitions.split_off(skip)
}

fn crossover_insight(index: usize, direction: Direction, timestamp: i64, price: f64) -> PatternInsight {
    let (id, title, description) = match direction {
        Direction::Bullish => (
            format!("bullish-cross-{}", index),
            "Bullish EMA crossover",
            format!(
                "EMA 9 crossed above EMA 21 at {} near {:.2}, tilting short-term momentum higher.",
                format_clock(timestamp),
                price
            ),
        ),
        Direction::Bearish => (
            format!("bearish-cross-{}", index),
            "Bearish EMA crossover",
            format!(
                "EMA 9 slipped below EMA 21 at {} near {:.2}, tilting short-term momentum lower.",
                format_clock(timestamp),
                price
            ),
        ),
    };

    PatternInsight {
        id,
        title: title.to_string(),
        description,
        confidence: Confidence::Medium,
        start_index: Some(index - 1),
        end_index: Some(index),
        change_pct: None,
        direction: Some(direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_points(n: usize) -> Vec<IntradayPoint> {
        (0..n)
            .map(|i| IntradayPoint {
                timestamp: i as i64 * 60,
                open: 50.0,
                high: 50.0,
                low: 50.0,
                close: 50.0,
                volume: 1.0,
            })
            .collect()
    }

    #[test]
    fn no_transitions_when_lines_never_cross() {
        let points = flat_points(5);
        let fast = vec![50.0; 5];
        let slow = vec![50.0; 5];
        assert!(detect_trend_shifts(&points, &fast, &slow).is_empty());
    }

    #[test]
    fn detects_both_directions() {
        let points = flat_points(4);
        let fast = [1.0, 3.0, 1.0, 1.0];
        let slow = [2.0, 2.0, 2.0, 2.0];
        let shifts = detect_trend_shifts(&points, &fast, &slow);
        let ids: Vec<&str> = shifts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["bullish-cross-1", "bearish-cross-2"]);
        assert_eq!(shifts[0].start_index, Some(0));
        assert_eq!(shifts[0].end_index, Some(1));
        assert!(shifts.iter().all(|s| s.confidence == Confidence::Medium));
        assert_eq!(shifts[1].direction, Some(Direction::Bearish));
    }

    #[test]
    fn touching_zero_counts_as_boundary_for_both_legs() {
        // diff: -1, 0, +1, 0, -1
        let points = flat_points(5);
        let fast = [1.0, 2.0, 3.0, 2.0, 1.0];
        let slow = [2.0; 5];
        let shifts = detect_trend_shifts(&points, &fast, &slow);
        let ids: Vec<&str> = shifts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["bullish-cross-2", "bearish-cross-4"]);
    }

    #[test]
    fn keeps_only_the_three_most_recent() {
        // diff alternates sign on every step: five transitions
        let points = flat_points(6);
        let fast = [1.0, 3.0, 1.0, 3.0, 1.0, 3.0];
        let slow = [2.0; 6];
        let shifts = detect_trend_shifts(&points, &fast, &slow);
        let ends: Vec<usize> = shifts.iter().map(|s| s.end_index.unwrap()).collect();
        assert_eq!(ends, vec![3, 4, 5]);
        for s in &shifts {
            let i = s.end_index.unwrap();
            let before = fast[i - 1] - slow[i - 1];
            let after = fast[i] - slow[i];
            assert!(before.signum() != after.signum());
        }
    }
}
