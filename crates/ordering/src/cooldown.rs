//! Per-user cooldown between confirmed orders.

use std::sync::Arc;
use std::time::Duration;

use crate::state::{CooldownStore, StoreError};

/// How long a user waits after confirming an order before the next one.
pub const COOLDOWN: Duration = Duration::from_secs(60);

fn cooldown_key(user_id: i64) -> String {
    format!("rate_limit:{user_id}")
}

/// Decides whether a user may start an order and records the cooldown once
/// one is confirmed.
///
/// Store failures pass through to the caller untouched; the limiter never
/// collapses an error into "not limited".
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CooldownStore>,
    ttl: Duration,
}

impl RateLimiter {
    #[must_use]
    pub fn new(store: Arc<dyn CooldownStore>) -> Self {
        Self {
            store,
            ttl: COOLDOWN,
        }
    }

    pub async fn is_limited(&self, user_id: i64) -> Result<bool, StoreError> {
        self.store.exists(&cooldown_key(user_id)).await
    }

    /// Idempotent: committing again refreshes the expiry.
    pub async fn commit(&self, user_id: i64) -> Result<(), StoreError> {
        self.store.set_with_ttl(&cooldown_key(user_id), self.ttl).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryCooldownStore;

    #[test]
    fn key_is_scoped_per_user() {
        assert_eq!(cooldown_key(42), "rate_limit:42");
        assert_ne!(cooldown_key(1), cooldown_key(2));
    }

    #[tokio::test]
    async fn commit_makes_the_user_limited() {
        let limiter = RateLimiter::new(Arc::new(MemoryCooldownStore::default()));

        assert!(!limiter.is_limited(42).await.unwrap());
        limiter.commit(42).await.unwrap();
        assert!(limiter.is_limited(42).await.unwrap());
        assert!(!limiter.is_limited(43).await.unwrap());
    }

    #[tokio::test]
    async fn recommit_does_not_error() {
        let limiter = RateLimiter::new(Arc::new(MemoryCooldownStore::default()));
        limiter.commit(42).await.unwrap();
        limiter.commit(42).await.unwrap();
        assert!(limiter.is_limited(42).await.unwrap());
    }
}
