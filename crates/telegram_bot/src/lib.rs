//! Telegram front end for the café assistant.
//!
//! A thin adapter: teloxide receives updates, every private text message is
//! handed to the ordering core, and replies travel back through the core's
//! outbound seam with the reply keyboard the core picked.

use std::sync::Arc;

use teloxide::prelude::*;

use ordering::{Cafe, MemoryCooldownStore, MemorySessionStore, OrderDesk};

mod handlers;
mod outbound;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    desk: Arc<OrderDesk>,
}

pub struct Bot {
    token: String,
    cafe: Cafe,
}

impl Bot {
    pub fn new(token: &str, cafe: Cafe) -> Result<Self, String> {
        if token.trim().is_empty() {
            return Err("telegram token must not be empty".to_string());
        }
        if cafe.menu.is_empty() {
            return Err("the menu must contain at least one drink".to_string());
        }

        Ok(Self {
            token: token.to_string(),
            cafe,
        })
    }

    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        let sender = outbound::TelegramOutbound::new(bot.clone(), self.cafe.clone());

        let desk = match OrderDesk::builder()
            .cafe(self.cafe.clone())
            .sessions(Arc::new(MemorySessionStore::default()))
            .cooldowns(Arc::new(MemoryCooldownStore::default()))
            .outbound(Arc::new(sender))
            .build()
        {
            Ok(desk) => desk,
            Err(err) => {
                tracing::error!("failed to assemble the order desk: {err}");
                return;
            }
        };

        let parameters = ConfigParameters {
            desk: Arc::new(desk),
        };

        let handler =
            dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    cafe: Cafe,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn cafe(mut self, cafe: Cafe) -> BotBuilder {
        self.cafe = cafe;
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        Bot::new(&self.token, self.cafe)
    }
}
