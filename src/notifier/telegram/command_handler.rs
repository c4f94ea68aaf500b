// notifier/telegram/command_handler.rs

use crate::notifier::render::{signal_message, stats_line, summary_message};
use crate::notifier::telegram::TelegramNotifier;
use tracing::{info, warn};

const HELP: &str = "📋 Available commands:\n\
    /ping — check connection\n\
    /status — analyzer status\n\
    /help — command list\n\
    /summary — latest analysis per instrument\n\
    /signals — latest momentum signals\n\
    /stats — session statistics\n\
    /config — configured instruments\n\
    /refresh — refresh now\n\
    /uptime — service uptime";

/// Handles an incoming command and sends the reply.
pub async fn handle_command(command_text: &str, notifier: &TelegramNotifier) {
    info!("Handling command: {}", command_text);
    let reply = reply_for(command_text, notifier).await;
    if let Err(e) = notifier.notify_text(&reply).await {
        warn!("{} reply error: {:?}", command_text, e);
    }
}

/// Builds the reply text for a command, triggering side effects such as a refresh.
pub async fn reply_for(command_text: &str, notifier: &TelegramNotifier) -> String {
    // Group chats append the bot name: /summary@my_bot
    let command = command_text.split('@').next().unwrap_or(command_text);
    match command {
        "/ping" => "✅ I am online!".to_string(),
        "/status" => {
            let analysed = notifier.latest.lock().await.len();
            format!(
                "📊 Watching {} instruments, {} analysed so far. Next check within {}s.",
                notifier.config.instruments.len(),
                analysed,
                notifier.config.check_interval_seconds
            )
        }
        "/help" => HELP.to_string(),
        "/refresh" => {
            info!("/refresh command received, triggering refresh...");
            notifier.refresh_notify.notify_one();
            "🔄 Refresh triggered.".to_string()
        }
        "/uptime" => {
            let uptime = notifier.start_time.elapsed();
            format!(
                "⏱ Uptime: {:02}:{:02}:{:02}",
                uptime.as_secs() / 3600,
                (uptime.as_secs() % 3600) / 60,
                uptime.as_secs() % 60
            )
        }
        "/summary" => {
            let latest = notifier.latest.lock().await;
            if latest.is_empty() {
                return "📭 No analysis available yet.".to_string();
            }
            latest
                .iter()
                .map(|(symbol, summary)| summary_message(symbol, summary))
                .collect::<Vec<_>>()
                .join("\n")
        }
        "/signals" => {
            let latest = notifier.latest.lock().await;
            let mut msg = String::new();
            for (symbol, summary) in latest.iter() {
                for signal in &summary.signals {
                    msg.push_str(&signal_message(symbol, signal));
                    msg.push_str("\n\n");
                }
            }
            if msg.is_empty() {
                "📭 No momentum signals in the latest sessions.".to_string()
            } else {
                msg.trim_end().to_string()
            }
        }
        "/stats" => {
            let latest = notifier.latest.lock().await;
            if latest.is_empty() {
                return "📭 No session statistics available.".to_string();
            }
            let mut msg = String::from("📊 Session statistics:\n");
            for (symbol, summary) in latest.iter() {
                msg.push_str(&format!("🔹 {} — {}\n", symbol, stats_line(&summary.stats)));
            }
            msg
        }
        "/config" => {
            let mut msg = String::from("⚙️ Configured instruments:\n");
            for instrument in &notifier.config.instruments {
                msg.push_str(&format!(
                    "🔸 {} [{} / {}] alerts ≥ {}\n",
                    instrument.symbol,
                    instrument.range,
                    instrument.interval,
                    instrument.min_alert_confidence.as_str()
                ));
            }
            msg
        }
        _ => "🤖 Unknown command. Type /help for a list of commands.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analyzer, AnalyzerImpl};
    use crate::config::parse_config;
    use crate::model::IntradayPoint;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::{Mutex, Notify};

    fn notifier() -> TelegramNotifier {
        let config = parse_config(
            r#"{
                "telegram_bot_token": "token",
                "telegram_chat_id": 7,
                "check_interval_seconds": 120,
                "instruments": [{ "symbol": "AAPL" }, { "symbol": "MSFT", "interval": "15m" }]
            }"#,
        )
        .unwrap();
        TelegramNotifier::new(
            Arc::new(config),
            Arc::new(Mutex::new(BTreeMap::new())),
            Arc::new(Notify::new()),
        )
        .unwrap()
    }

    async fn store_scenario(notifier: &TelegramNotifier) {
        let points: Vec<IntradayPoint> = [100.0, 100.2, 100.4, 100.7, 100.5, 101.9]
            .iter()
            .enumerate()
            .map(|(i, &c)| IntradayPoint {
                timestamp: 1_709_287_200 + i as i64 * 60,
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 10.0,
            })
            .collect();
        let summary = AnalyzerImpl::new().analyze(&points);
        notifier.latest.lock().await.insert("AAPL".into(), Arc::new(summary));
    }

    #[tokio::test]
    async fn empty_state_replies() {
        let n = notifier();
        assert_eq!(reply_for("/summary", &n).await, "📭 No analysis available yet.");
        assert!(reply_for("/signals", &n).await.starts_with("📭"));
        assert!(reply_for("/stats", &n).await.starts_with("📭"));
        assert!(reply_for("/status", &n).await.contains("Watching 2 instruments, 0 analysed"));
    }

    #[tokio::test]
    async fn replies_with_latest_analysis() {
        let n = notifier();
        store_scenario(&n).await;

        assert!(reply_for("/summary", &n).await.starts_with("📊 AAPL"));
        assert!(reply_for("/signals", &n).await.contains("Momentum Upswing"));
        assert!(reply_for("/stats", &n).await.contains("🔹 AAPL — Change +1.90%"));
    }

    #[tokio::test]
    async fn config_lists_instruments() {
        let reply = reply_for("/config@sniper_bot", &notifier()).await;
        assert!(reply.contains("🔸 AAPL [1d / 5m] alerts ≥ medium"));
        assert!(reply.contains("🔸 MSFT [1d / 15m]"));
    }

    #[tokio::test]
    async fn refresh_wakes_the_main_loop() {
        let n = notifier();
        assert_eq!(reply_for("/refresh", &n).await, "🔄 Refresh triggered.");
        // notify_one stores a permit, so this completes immediately.
        n.refresh_notify.notified().await;
    }

    #[tokio::test]
    async fn unknown_command_points_to_help() {
        assert!(reply_for("/moon", &notifier()).await.contains("/help"));
        assert!(reply_for("/help", &notifier()).await.contains("/signals"));
    }
}
