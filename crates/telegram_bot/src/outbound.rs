//! teloxide-backed implementation of the core's outbound seam.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use ordering::{Cafe, DeliveryError, KeyboardHint, Outbound};

use crate::ui;

/// Sends core replies through the Telegram API: HTML parse mode plus the
/// reply keyboard matching the hint.
#[derive(Clone)]
pub(crate) struct TelegramOutbound {
    bot: teloxide::Bot,
    cafe: Cafe,
}

impl TelegramOutbound {
    pub(crate) fn new(bot: teloxide::Bot, cafe: Cafe) -> Self {
        Self { bot, cafe }
    }
}

#[async_trait]
impl Outbound for TelegramOutbound {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: KeyboardHint,
    ) -> Result<(), DeliveryError> {
        let request = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html);

        let outcome = match ui::reply_keyboard(keyboard, &self.cafe.menu) {
            Some(markup) => request.reply_markup(markup).await,
            None => request.await,
        };

        outcome
            .map(|_| ())
            .map_err(|err| DeliveryError::new(err.to_string()))
    }
}
