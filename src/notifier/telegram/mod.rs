pub mod sender;
pub mod listener;
pub mod command_handler;

use crate::config::AppConfig;
use crate::model::{AnalysisSummary, NotifyError, SignalMarker};
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use std::time::Instant;
use tokio::sync::{Mutex, Notify};

/// Most recent summary per instrument symbol, shared with the command handler.
pub type LatestAnalyses = Arc<Mutex<BTreeMap<String, Arc<AnalysisSummary>>>>;

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: i64,
    pub client: Client,
    pub offset: Arc<AtomicI64>,
    pub latest: LatestAnalyses,
    pub config: Arc<AppConfig>,
    pub start_time: Instant,
    pub refresh_notify: Arc<Notify>,
}

impl TelegramNotifier {
    pub fn new(
        config: Arc<AppConfig>,
        latest: LatestAnalyses,
        refresh_notify: Arc<Notify>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError::ApiError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id,
            client,
            offset: Arc::new(AtomicI64::new(0)),
            latest,
            config,
            start_time: Instant::now(),
            refresh_notify,
        })
    }

    pub async fn notify_text(&self, text: &str) -> Result<(), NotifyError> {
        sender::send_text(self, text).await
    }

    pub async fn notify_signal(&self, symbol: &str, signal: &SignalMarker) -> Result<(), NotifyError> {
        sender::send_signal(self, symbol, signal).await
    }

    pub async fn listen_for_commands(&self) {
        listener::listen_for_commands(self).await;
    }

    pub fn spawn_listener(notifier: Arc<Self>) {
        tokio::spawn(async move {
            notifier.listen_for_commands().await;
        });
    }
}
