//! Order-taking core of the café assistant.
//!
//! The core is transport-agnostic: inbound messages arrive as [`Incoming`]
//! values, replies leave through the [`Outbound`] trait, and conversation
//! and cooldown state live behind the store traits. The transition rules,
//! the working-hours gate, and the rate limiter are all in-process and
//! deterministic for a given clock reading.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

pub use cafe::Cafe;
pub use cooldown::{COOLDOWN, RateLimiter};
pub use hours::{WorkingHours, now_local};
pub use menu::{Menu, MenuEntry};
pub use notify::Notifier;
pub use order::Order;
pub use outbound::{DeliveryError, KeyboardHint, Outbound};
pub use state::{
    ConversationState, CooldownStore, MemoryCooldownStore, MemorySessionStore, SessionStore,
    StoreError,
};

mod cafe;
mod cooldown;
mod hours;
mod menu;
mod notify;
mod order;
mod outbound;
mod parsing;
mod state;
pub mod text;

use parsing::Event;
use state::UserLocks;

/// Upper bound on a single store call before it counts as unavailable.
const STORE_TIMEOUT: Duration = Duration::from_secs(3);

/// One inbound chat message, as the transport hands it over.
#[derive(Clone, Debug)]
pub struct Incoming {
    pub user_id: i64,
    pub display_name: Option<String>,
    pub text: String,
}

/// The café counter: takes one message at a time and advances the sender's
/// order dialogue.
///
/// Messages from one user are serialized on a per-user lock around the
/// read-transition-write sequence; different users run in parallel.
pub struct OrderDesk {
    cafe: Cafe,
    sessions: Arc<dyn SessionStore>,
    limiter: RateLimiter,
    notifier: Notifier,
    outbound: Arc<dyn Outbound>,
    locks: UserLocks,
}

impl OrderDesk {
    pub fn builder() -> OrderDeskBuilder {
        OrderDeskBuilder::default()
    }

    /// Handle one message at the current café time.
    pub async fn handle(&self, incoming: Incoming) -> Result<(), DeliveryError> {
        self.handle_at(incoming, now_local()).await
    }

    /// Handle one message as of `now` on the café clock.
    ///
    /// Store failures never escape: the user gets a retry-later reply and
    /// the dialogue stays where it was. Only delivery failures of the reply
    /// itself are returned.
    pub async fn handle_at(
        &self,
        incoming: Incoming,
        now: DateTime<FixedOffset>,
    ) -> Result<(), DeliveryError> {
        let user_id = incoming.user_id;
        let _serialized = self.locks.acquire(user_id).await;

        let event = parsing::parse_event(&incoming.text, &self.cafe.menu);
        let name = incoming
            .display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(text::FALLBACK_NAME);

        let state = match self.read_state(user_id).await {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!("session read failed for {user_id}: {err}");
                return self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await;
            }
        };

        match (state, event) {
            (_, Event::Start) => self.greet(user_id, name, now).await,
            (_, Event::Hours) => {
                self.reply(user_id, &text::hours_info(&self.cafe, now), KeyboardHint::Keep)
                    .await
            }
            (_, Event::Phone) => {
                self.reply(user_id, &text::phone_info(&self.cafe), KeyboardHint::Keep)
                    .await
            }
            (ConversationState::Idle, Event::Drink(drink)) => {
                self.start_order(user_id, &drink, now).await
            }
            (ConversationState::SelectingQuantity { drink }, Event::Quantity(quantity)) => {
                self.pick_quantity(user_id, &drink, quantity).await
            }
            (ConversationState::SelectingQuantity { .. }, Event::Cancel | Event::Menu) => {
                self.back_to_menu(user_id).await
            }
            (ConversationState::SelectingQuantity { .. }, _) => {
                self.reply(user_id, &text::quantity_reprompt(), KeyboardHint::Quantity)
                    .await
            }
            (ConversationState::AwaitingConfirmation { drink, quantity }, Event::Confirm) => {
                self.confirm(user_id, name, &drink, quantity, now).await
            }
            (ConversationState::AwaitingConfirmation { .. }, Event::Cancel | Event::Menu) => {
                self.back_to_menu(user_id).await
            }
            // Covers duplicate confirms in Idle as well: with no recorded
            // selection they are just unrecognized text.
            (_, _) => self.reply(user_id, &text::fallback(), KeyboardHint::Keep).await,
        }
    }

    /// `/start`: greet and drop any stale partial selection.
    async fn greet(
        &self,
        user_id: i64,
        name: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<(), DeliveryError> {
        if let Err(err) = self.write_state(user_id, ConversationState::Idle).await {
            tracing::warn!("session reset failed for {user_id}: {err}");
            return self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await;
        }
        self.reply(user_id, &text::welcome(&self.cafe, name, now), KeyboardHint::Menu)
            .await
    }

    async fn start_order(
        &self,
        user_id: i64,
        drink: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<(), DeliveryError> {
        if !self.cafe.hours.is_open_at(now) {
            return self
                .reply(user_id, &text::closed(&self.cafe, now), KeyboardHint::Info)
                .await;
        }

        match self.check_limited(user_id).await {
            Ok(true) => self.reply(user_id, &text::wait(), KeyboardHint::Keep).await,
            Ok(false) => {
                let Some(price) = self.cafe.menu.price_of(drink) else {
                    return self.reply(user_id, &text::fallback(), KeyboardHint::Menu).await;
                };
                let next = ConversationState::SelectingQuantity {
                    drink: drink.to_string(),
                };
                if let Err(err) = self.write_state(user_id, next).await {
                    tracing::warn!("session write failed for {user_id}: {err}");
                    return self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await;
                }
                self.reply(
                    user_id,
                    &text::quantity_prompt(drink, price),
                    KeyboardHint::Quantity,
                )
                .await
            }
            Err(err) => {
                tracing::warn!("cooldown check failed for {user_id}: {err}");
                self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await
            }
        }
    }

    async fn pick_quantity(
        &self,
        user_id: i64,
        drink: &str,
        quantity: u32,
    ) -> Result<(), DeliveryError> {
        let Some(price) = self.cafe.menu.price_of(drink) else {
            // The recorded drink is gone from the menu; start over.
            return self.back_to_menu(user_id).await;
        };
        let next = ConversationState::AwaitingConfirmation {
            drink: drink.to_string(),
            quantity,
        };
        if let Err(err) = self.write_state(user_id, next).await {
            tracing::warn!("session write failed for {user_id}: {err}");
            return self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await;
        }
        let total = price * i64::from(quantity);
        self.reply(
            user_id,
            &text::summary(drink, quantity, total),
            KeyboardHint::Confirm,
        )
        .await
    }

    /// The confirmation transition. Store mutations come before any
    /// notification, so a store failure aborts with nothing sent and the
    /// dialogue still awaiting confirmation.
    async fn confirm(
        &self,
        user_id: i64,
        name: &str,
        drink: &str,
        quantity: u32,
        now: DateTime<FixedOffset>,
    ) -> Result<(), DeliveryError> {
        if !self.cafe.hours.is_open_at(now) {
            // Closed mid-conversation: drop the order, charge no cooldown.
            if let Err(err) = self.write_state(user_id, ConversationState::Idle).await {
                tracing::warn!("session write failed for {user_id}: {err}");
                return self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await;
            }
            return self
                .reply(user_id, &text::closed(&self.cafe, now), KeyboardHint::Info)
                .await;
        }

        let Some(unit_price) = self.cafe.menu.price_of(drink) else {
            return self.back_to_menu(user_id).await;
        };

        if let Err(err) = self.commit_cooldown(user_id).await {
            tracing::warn!("cooldown commit failed for {user_id}: {err}");
            return self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await;
        }
        if let Err(err) = self.write_state(user_id, ConversationState::Idle).await {
            tracing::warn!("session write failed for {user_id}: {err}");
            return self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await;
        }

        let order = Order::new(user_id, name, drink, quantity, unit_price, now);
        tracing::info!(
            "order confirmed: user {} took {} x{} for {}₽",
            order.user_id,
            order.drink,
            order.quantity,
            order.total
        );
        self.notifier.notify_admin(&order).await;
        self.notifier.send_receipt(&self.cafe, &order).await
    }

    async fn back_to_menu(&self, user_id: i64) -> Result<(), DeliveryError> {
        if let Err(err) = self.write_state(user_id, ConversationState::Idle).await {
            tracing::warn!("session write failed for {user_id}: {err}");
            return self.reply(user_id, &text::retry_later(), KeyboardHint::Keep).await;
        }
        self.reply(user_id, &text::menu_prompt(), KeyboardHint::Menu).await
    }

    async fn reply(
        &self,
        user_id: i64,
        message: &str,
        keyboard: KeyboardHint,
    ) -> Result<(), DeliveryError> {
        self.outbound.send(user_id, message, keyboard).await
    }

    async fn read_state(&self, user_id: i64) -> Result<ConversationState, StoreError> {
        match tokio::time::timeout(STORE_TIMEOUT, self.sessions.state(user_id)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(STORE_TIMEOUT)),
        }
    }

    async fn write_state(
        &self,
        user_id: i64,
        state: ConversationState,
    ) -> Result<(), StoreError> {
        match tokio::time::timeout(STORE_TIMEOUT, self.sessions.set_state(user_id, state)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(STORE_TIMEOUT)),
        }
    }

    async fn check_limited(&self, user_id: i64) -> Result<bool, StoreError> {
        match tokio::time::timeout(STORE_TIMEOUT, self.limiter.is_limited(user_id)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(STORE_TIMEOUT)),
        }
    }

    async fn commit_cooldown(&self, user_id: i64) -> Result<(), StoreError> {
        match tokio::time::timeout(STORE_TIMEOUT, self.limiter.commit(user_id)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(STORE_TIMEOUT)),
        }
    }
}

/// Builder for [`OrderDesk`]. Only the outbound sender is mandatory; the
/// café profile and stores default to the built-in profile and the
/// in-memory backends.
#[derive(Default)]
pub struct OrderDeskBuilder {
    cafe: Option<Cafe>,
    sessions: Option<Arc<dyn SessionStore>>,
    cooldowns: Option<Arc<dyn CooldownStore>>,
    outbound: Option<Arc<dyn Outbound>>,
}

impl OrderDeskBuilder {
    #[must_use]
    pub fn cafe(mut self, cafe: Cafe) -> Self {
        self.cafe = Some(cafe);
        self
    }

    #[must_use]
    pub fn sessions(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    #[must_use]
    pub fn cooldowns(mut self, cooldowns: Arc<dyn CooldownStore>) -> Self {
        self.cooldowns = Some(cooldowns);
        self
    }

    #[must_use]
    pub fn outbound(mut self, outbound: Arc<dyn Outbound>) -> Self {
        self.outbound = Some(outbound);
        self
    }

    pub fn build(self) -> Result<OrderDesk, String> {
        let Some(outbound) = self.outbound else {
            return Err("an outbound sender is required".to_string());
        };
        let cafe = self.cafe.unwrap_or_default();
        if cafe.menu.is_empty() {
            return Err("the menu must contain at least one drink".to_string());
        }
        let sessions = self
            .sessions
            .unwrap_or_else(|| Arc::new(MemorySessionStore::default()));
        let cooldowns = self
            .cooldowns
            .unwrap_or_else(|| Arc::new(MemoryCooldownStore::default()));

        Ok(OrderDesk {
            notifier: Notifier::new(Arc::clone(&outbound), cafe.admin_chat_id),
            limiter: RateLimiter::new(cooldowns),
            cafe,
            sessions,
            outbound,
            locks: UserLocks::default(),
        })
    }
}
