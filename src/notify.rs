use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, Recipient},
};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::http::redact;
use crate::messages::NOTIFY_PREFIX;

/// Delivers finished reports to a Telegram chat.
///
/// Delivery is best effort: callers are expected to ignore the returned error,
/// and nothing about it is shown to the user.
#[derive(Clone)]
pub struct Notifier {
    token: String,
    chat_id: String,
    api_url: String,
    timeout: Duration,
}

impl Notifier {
    pub fn new(config: &Config) -> Self {
        Self {
            token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
            api_url: config.endpoints.telegram.clone(),
            timeout: config.timeout,
        }
    }

    #[instrument(level = "debug", skip(self, details))]
    pub async fn send(&self, details: &str) -> Result<()> {
        let api_url = reqwest::Url::parse(&self.api_url)
            .with_context(|| format!("invalid Bot API url {}", self.api_url))?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("failed to build HTTP client")?;
        let bot = Bot::with_client(self.token.clone(), client).set_api_url(api_url);

        let sent = bot
            .send_message(recipient(&self.chat_id), message_text(details))
            .await
            // Request errors embed the method URL, which contains the bot token.
            .map_err(|err| anyhow!("sendMessage failed: {}", redact(&err.to_string(), &self.token)))?;
        debug!(message_id = sent.id.0, "report delivered");
        Ok(())
    }
}

/// Numeric ids address chats directly; anything else is treated as a
/// channel username such as `@my_channel`.
pub fn recipient(chat_id: &str) -> Recipient {
    match chat_id.trim().parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.trim().to_string()),
    }
}

pub fn message_text(details: &str) -> String {
    format!("{NOTIFY_PREFIX}\n{details}")
}
