// notifier/telegram/sender.rs

use crate::model::{NotifyError, SignalMarker};
use crate::notifier::render::signal_message;
use crate::notifier::telegram::TelegramNotifier;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Sends a plain text message via Telegram.
pub async fn send_text(notifier: &TelegramNotifier, text: &str) -> Result<(), NotifyError> {
    let url = format!("https://api.telegram.org/bot{}/sendMessage", notifier.bot_token);
    let response = match timeout(
        Duration::from_secs(10),
        notifier
            .client
            .post(&url)
            .form(&[("chat_id", notifier.chat_id.to_string()), ("text", text.to_string())])
            .send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("❌ Telegram send() failed: {:?}", e);
            return Err(NotifyError::ApiError(format!("Send failed: {}", e)));
        }
        Err(_) => {
            warn!("⏳ Telegram send() timed out");
            return Err(NotifyError::Unreachable);
        }
    };
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ Telegram API responded [{}]: {}", status, body);
        return Err(NotifyError::ApiError(format!("status {}", status)));
    }
    info!("✅ Telegram message sent [{}]", status);
    Ok(())
}

/// Sends an alert for one signal marker.
pub async fn send_signal(
    notifier: &TelegramNotifier,
    symbol: &str,
    signal: &SignalMarker,
) -> Result<(), NotifyError> {
    let message = signal_message(symbol, signal);
    info!("📤 Sending signal alert:\n{}", message);
    send_text(notifier, &message).await
}
