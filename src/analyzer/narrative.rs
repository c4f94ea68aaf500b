use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::model::IntradayPoint;
use crate::utils::format_signed_pct;

pub const INSUFFICIENT_DATA: &str =
    "Not enough intraday prints yet to describe the session. Check back after a few more bars.";

/// Session change beyond which the session is called directional, in percent.
pub const BIAS_THRESHOLD_PCT: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBias {
    Bullish,
    Bearish,
    Balanced,
}

impl SessionBias {
    pub fn classify(change_pct: f64) -> Self {
        if change_pct > BIAS_THRESHOLD_PCT {
            SessionBias::Bullish
        } else if change_pct < -BIAS_THRESHOLD_PCT {
            SessionBias::Bearish
        } else {
            SessionBias::Balanced
        }
    }

    fn sentence(&self) -> &'static str {
        match self {
            SessionBias::Bullish => {
                "Buyers have controlled the session, lifting price steadily away from the open."
            }
            SessionBias::Bearish => {
                "Sellers have dominated the session, pressing price below where it opened."
            }
            SessionBias::Balanced => {
                "The session is trading as a balanced two-way auction without a decisive bias."
            }
        }
    }
}

/// Templated session summary: a bias sentence plus the session's reference levels.
pub fn build_narrative(points: &[IntradayPoint]) -> String {
    if points.len() < 2 {
        return INSUFFICIENT_DATA.to_string();
    }

    let stats = MarketAnalyzer::session_stats(points);
    let bias = SessionBias::classify(stats.session_change_pct);

    format!(
        "{} Session change stands at {} with a {:.2}% high-low range; \
         watch {:.2} as resistance and {:.2} as support for continuation or rejection.",
        bias.sentence(),
        format_signed_pct(stats.session_change_pct),
        stats.range_pct,
        stats.session_high,
        stats.session_low
    )
}
