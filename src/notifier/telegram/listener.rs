// notifier/telegram/listener.rs

use crate::notifier::telegram::TelegramNotifier;
use crate::notifier::telegram::command_handler::handle_command;
use serde::Deserialize;
use std::sync::atomic::Ordering;
use tokio::time::{Duration, sleep};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    result: Vec<TelegramUpdate>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    chat: TelegramChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

/// Polls for Telegram updates and processes commands from the configured chat.
pub async fn listen_for_commands(notifier: &TelegramNotifier) {
    let url = format!("https://api.telegram.org/bot{}/getUpdates", notifier.bot_token);
    loop {
        let current_offset = notifier.offset.load(Ordering::SeqCst);
        let response = notifier
            .client
            .get(&url)
            .query(&[("offset", current_offset.to_string())])
            .send()
            .await;
        match response {
            Ok(resp) => match resp.json::<TelegramApiResponse>().await {
                Ok(api_response) => {
                    for update in api_response.result {
                        if let Some(message) = &update.message {
                            if message.chat.id != notifier.chat_id {
                                debug!("Ignoring message from chat {}", message.chat.id);
                            } else if let Some(text) = message.text.as_deref() {
                                handle_command(text.trim(), notifier).await;
                            }
                        }
                        notifier.offset.store(update.update_id + 1, Ordering::SeqCst);
                    }
                }
                Err(e) => warn!("Telegram getUpdates decode error: {:?}", e),
            },
            Err(e) => warn!("Telegram getUpdates failed: {:?}", e),
        }
        sleep(Duration::from_secs(1)).await;
    }
}
