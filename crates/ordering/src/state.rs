//! Conversation state, the store seams, and the in-memory backends.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;

/// Step of a user's order dialogue.
///
/// Kept per user in the session store; a user the store has never seen is
/// [`Idle`]. There is no expiry: only `/start`, cancellation, or a finished
/// order move a user back to [`Idle`].
///
/// [`Idle`]: ConversationState::Idle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    SelectingQuantity {
        drink: String,
    },
    AwaitingConfirmation {
        drink: String,
        quantity: u32,
    },
}

/// Failure modes of the external stores.
///
/// Callers treat both variants as "store unavailable". Neither may ever be
/// read as "not rate-limited" or as an empty session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store request timed out after {0:?}")]
    Timeout(Duration),
}

/// Per-user conversation state persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current state for `user_id`; unknown users are [`ConversationState::Idle`].
    async fn state(&self, user_id: i64) -> Result<ConversationState, StoreError>;

    async fn set_state(&self, user_id: i64, state: ConversationState) -> Result<(), StoreError>;
}

/// Presence-with-expiry keys backing the order cooldown.
#[async_trait]
pub trait CooldownStore: Send + Sync {
    /// True while `key` exists and has not expired.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Upsert `key` with a fresh time-to-live.
    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;
}

/// Process-local session store.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<HashMap<i64, ConversationState>>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn state(&self, user_id: i64) -> Result<ConversationState, StoreError> {
        let guard = self.inner.lock().await;
        Ok(guard.get(&user_id).cloned().unwrap_or_default())
    }

    async fn set_state(&self, user_id: i64, state: ConversationState) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        guard.insert(user_id, state);
        Ok(())
    }
}

/// Process-local cooldown store with deadline-based expiry. Expired keys are
/// dropped lazily on the next lookup.
#[derive(Clone, Default)]
pub struct MemoryCooldownStore {
    inner: Arc<Mutex<HashMap<String, Instant>>>,
}

#[async_trait]
impl CooldownStore for MemoryCooldownStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut guard = self.inner.lock().await;
        match guard.get(key) {
            Some(deadline) if *deadline > Instant::now() => Ok(true),
            Some(_) => {
                guard.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        guard.insert(key.to_string(), Instant::now() + ttl);
        Ok(())
    }
}

/// Mutual exclusion for one user's read-transition-write sequence.
/// Different users lock independently.
#[derive(Clone, Default)]
pub(crate) struct UserLocks {
    inner: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl UserLocks {
    /// Entries are never evicted; the user population of a single café
    /// stays small.
    pub(crate) async fn acquire(&self, user_id: i64) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().await;
            Arc::clone(map.entry(user_id).or_default())
        };
        slot.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_is_idle() {
        let store = MemorySessionStore::default();
        assert_eq!(store.state(7).await.unwrap(), ConversationState::Idle);
    }

    #[tokio::test]
    async fn state_survives_a_round_trip() {
        let store = MemorySessionStore::default();
        let state = ConversationState::SelectingQuantity {
            drink: "🍵 Чай".to_string(),
        };
        store.set_state(7, state.clone()).await.unwrap();
        assert_eq!(store.state(7).await.unwrap(), state);
        assert_eq!(store.state(8).await.unwrap(), ConversationState::Idle);
    }

    #[tokio::test]
    async fn cooldown_key_expires() {
        let store = MemoryCooldownStore::default();
        store
            .set_with_ttl("rate_limit:7", Duration::from_millis(20))
            .await
            .unwrap();
        assert!(store.exists("rate_limit:7").await.unwrap());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(!store.exists("rate_limit:7").await.unwrap());
    }

    #[tokio::test]
    async fn refreshing_a_key_extends_the_deadline() {
        let store = MemoryCooldownStore::default();
        store
            .set_with_ttl("rate_limit:7", Duration::from_millis(20))
            .await
            .unwrap();
        store
            .set_with_ttl("rate_limit:7", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(store.exists("rate_limit:7").await.unwrap());
    }
}
