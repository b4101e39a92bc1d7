//! Delivery of confirmed orders to the admin channel and the customer.

use std::sync::Arc;

use crate::outbound::{DeliveryError, KeyboardHint, Outbound};
use crate::{Cafe, Order, text};

pub struct Notifier {
    outbound: Arc<dyn Outbound>,
    admin_chat_id: i64,
}

impl Notifier {
    #[must_use]
    pub fn new(outbound: Arc<dyn Outbound>, admin_chat_id: i64) -> Self {
        Self {
            outbound,
            admin_chat_id,
        }
    }

    /// Fire-and-forget: a failed admin delivery is logged and the order
    /// stays accepted.
    pub async fn notify_admin(&self, order: &Order) {
        let message = text::admin_notification(order);
        if let Err(err) = self
            .outbound
            .send(self.admin_chat_id, &message, KeyboardHint::Keep)
            .await
        {
            tracing::error!(
                "admin notification for order from user {} failed: {err}",
                order.user_id
            );
        }
    }

    /// Receipt for the customer; failures bubble up to the transport.
    pub async fn send_receipt(&self, cafe: &Cafe, order: &Order) -> Result<(), DeliveryError> {
        self.outbound
            .send(order.user_id, &text::receipt(cafe, order), KeyboardHint::Menu)
            .await
    }
}
