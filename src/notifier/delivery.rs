// notifier/delivery.rs

use crate::model::{Confidence, NotifyError, SignalMarker};
use crate::notifier::telegram::TelegramNotifier;
use crate::storage::{SqliteStorage, alert_key};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Destination for signal alerts.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn send_signal(&self, symbol: &str, signal: &SignalMarker) -> Result<(), NotifyError>;
}

#[async_trait]
impl SignalSink for TelegramNotifier {
    async fn send_signal(&self, symbol: &str, signal: &SignalMarker) -> Result<(), NotifyError> {
        self.notify_signal(symbol, signal).await
    }
}

/// Sends every marker at or above `min_confidence` that the ledger has not recorded yet.
/// Only successful sends are recorded, so a failed alert is retried on the next call.
/// Returns the number of alerts delivered.
pub async fn deliver_new_signals<S: SignalSink + ?Sized>(
    symbol: &str,
    signals: &[SignalMarker],
    min_confidence: Confidence,
    storage: &Mutex<SqliteStorage>,
    sink: &S,
) -> usize {
    let mut delivered = 0;
    for signal in signals.iter().filter(|s| s.confidence >= min_confidence) {
        let key = alert_key(symbol, signal);
        match storage.lock().await.is_notified(&key) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                warn!("Alert ledger check failed: {}", e);
                continue;
            }
        }

        if let Err(e) = sink.send_signal(symbol, signal).await {
            warn!("Telegram send error: {}", e);
        } else if let Err(e) = storage.lock().await.mark_notified(&key, symbol) {
            warn!("Mark notified failed: {}", e);
        } else {
            info!("Signal {} delivered and recorded.", key);
            delivered += 1;
        }
    }
    delivered
}
