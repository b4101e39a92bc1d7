//! Outbound seam between the core and the chat transport.

use async_trait::async_trait;
use thiserror::Error;

/// Which reply keyboard the transport should attach to a message.
///
/// The core only picks the set of labels; how they are laid out and sent is
/// the transport's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardHint {
    /// Drink buttons plus the phone / working-hours row.
    Menu,
    /// Quantity keycaps 1–5 and cancel.
    Quantity,
    /// Confirm / back-to-menu pair.
    Confirm,
    /// Just the phone / working-hours row, for a closed café.
    Info,
    /// Leave whatever keyboard is on screen untouched.
    Keep,
}

/// A message the transport failed to deliver.
#[derive(Debug, Error)]
#[error("message delivery failed: {reason}")]
pub struct DeliveryError {
    pub reason: String,
}

impl DeliveryError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Message sender implemented by the chat transport.
#[async_trait]
pub trait Outbound: Send + Sync {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: KeyboardHint,
    ) -> Result<(), DeliveryError>;
}
