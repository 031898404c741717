//! Notification delivery
//!
//! Sends plain-text messages to the single configured Telegram chat.

use async_trait::async_trait;
use teloxide::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::Config;

/// Errors returned while delivering a notification
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to deliver message: {0}")]
    DeliveryFailed(String),
}

/// Trait for sending notifications
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Send `message` to the configured destination
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Notifier that posts to a Telegram chat
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_id: i64) -> Self {
        Self {
            bot,
            chat_id: ChatId(chat_id),
        }
    }

    /// Build the bot from configuration, honouring a Bot API URL override
    pub fn from_config(config: &Config) -> Self {
        let mut bot = Bot::new(&config.telegram_token);
        if let Some(url) = &config.telegram_api_url {
            bot = bot.set_api_url(url.clone());
        }

        Self::new(bot, config.telegram_chat_id)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.bot
            .send_message(self.chat_id, message)
            .await
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))?;

        info!("Bot sent message to chat {}: {}", self.chat_id.0, message);

        Ok(())
    }
}
