// Plain-text rendering of analysis results for chat delivery.
use crate::model::{AnalysisSummary, Confidence, Direction, SessionStats, SignalMarker};
use crate::utils::{format_clock, format_signed_pct};

pub fn confidence_badge(confidence: Confidence) -> String {
    let icon = match confidence {
        Confidence::High => "🔥",
        Confidence::Medium => "⚡",
        Confidence::Low => "▫️",
    };
    format!("{} {}", icon, confidence.as_str().to_uppercase())
}

pub fn direction_icon(direction: Direction) -> &'static str {
    match direction {
        Direction::Bullish => "📈",
        Direction::Bearish => "📉",
    }
}

pub fn stats_line(stats: &SessionStats) -> String {
    format!(
        "Change {} | Range {:.2}% | High {:.2} | Low {:.2} | Avg vol {:.0}",
        format_signed_pct(stats.session_change_pct),
        stats.range_pct,
        stats.session_high,
        stats.session_low,
        stats.avg_volume
    )
}

/// Full summary card: narrative, stats, insights and the latest EMA values.
pub fn summary_message(symbol: &str, summary: &AnalysisSummary) -> String {
    let mut msg = format!("📊 {}\n\n{}\n\n{}\n", symbol, summary.narrative, stats_line(&summary.stats));

    if !summary.insights.is_empty() {
        msg.push_str("\n🧭 Insights:\n");
        for insight in &summary.insights {
            let icon = insight.direction.map(direction_icon).unwrap_or("🔹");
            msg.push_str(&format!(
                "{} {} [{}]\n   {}\n",
                icon,
                insight.title,
                confidence_badge(insight.confidence),
                insight.description
            ));
        }
    }

    if let (Some(fast), Some(slow)) = (summary.ema9.last(), summary.ema21.last()) {
        msg.push_str(&format!("\nEMA9 {:.2} | EMA21 {:.2}\n", fast, slow));
    }
    msg
}

pub fn signal_message(symbol: &str, signal: &SignalMarker) -> String {
    format!(
        "{} {} — {}\n💰 {:.2} at {} UTC\n{} ({})",
        direction_icon(signal.direction),
        symbol,
        signal.label,
        signal.price,
        format_clock(signal.timestamp),
        confidence_badge(signal.confidence),
        signal.direction.as_str()
    )
}
