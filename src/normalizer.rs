use crate::model::IntradayPoint;
use tracing::warn;

/// Prepares a fetched series for the engine: drops unusable samples, sorts by time and
/// keeps the last print for any repeated timestamp.
pub fn normalize_points(mut points: Vec<IntradayPoint>, symbol: &str) -> Vec<IntradayPoint> {
    let before = points.len();
    points.retain(is_usable);

    // Stable sort keeps arrival order among equal timestamps, so the last one wins below.
    points.sort_by_key(|p| p.timestamp);
    let mut normalized: Vec<IntradayPoint> = Vec::with_capacity(points.len());
    for point in points {
        match normalized.last_mut() {
            Some(last) if last.timestamp == point.timestamp => *last = point,
            _ => normalized.push(point),
        }
    }

    let dropped = before - normalized.len();
    if dropped > 0 {
        warn!("Dropped {} of {} points for {}", dropped, before, symbol);
    }
    normalized
}

/// Closes must be finite and strictly positive; every percentage in the engine divides by one.
fn is_usable(point: &IntradayPoint) -> bool {
    point.close.is_finite()
        && point.close > 0.0
        && point.open.is_finite()
        && point.high.is_finite()
        && point.low.is_finite()
        && point.volume.is_finite()
        && point.volume >= 0.0
}
