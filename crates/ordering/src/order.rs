//! Confirmed order snapshot.

use chrono::{DateTime, FixedOffset};

/// An order as it leaves the confirmation transition. Built once, handed to
/// the notifier, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub user_id: i64,
    pub user_name: String,
    pub drink: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub total: i64,
    pub placed_at: DateTime<FixedOffset>,
}

impl Order {
    #[must_use]
    pub fn new(
        user_id: i64,
        user_name: &str,
        drink: &str,
        quantity: u32,
        unit_price: i64,
        placed_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            user_id,
            user_name: user_name.to_string(),
            drink: drink.to_string(),
            quantity,
            unit_price,
            total: unit_price * i64::from(quantity),
            placed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn total_is_quantity_times_unit_price() {
        let msk = FixedOffset::east_opt(3 * 3600).unwrap();
        let placed_at = msk.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let order = Order::new(7, "Анна", "☕ Капучино", 3, 250, placed_at);
        assert_eq!(order.total, 750);
    }
}
