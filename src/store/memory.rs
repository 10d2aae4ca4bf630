//! In-memory session store — for tests and single-process ephemeral runs.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::SessionStoreError;
use crate::onboarding::state::SessionState;

use super::traits::SessionStore;

struct Entry {
    state: SessionState,
    expires_at: DateTime<Utc>,
}

/// Process-local [`SessionStore`] with the same sliding-TTL semantics as the
/// durable backend. State does not survive a restart.
pub struct MemorySessionStore {
    ttl: chrono::Duration,
    sessions: Mutex<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            // Absurdly large TTLs clamp to a century rather than overflow
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::days(36_500)),
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self) -> Result<(String, SessionState), SessionStoreError> {
        let session_id = Uuid::new_v4().to_string();
        let state = SessionState::new();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            session_id.clone(),
            Entry {
                state: state.clone(),
                expires_at: Utc::now() + self.ttl,
            },
        );
        Ok((session_id, state))
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionState>, SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(session_id) {
            Some(entry) if entry.expires_at > Utc::now() => Ok(Some(entry.state.clone())),
            Some(_) => {
                // Expired — indistinguishable from never-existed
                sessions.remove(session_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        session_id: &str,
        mut state: SessionState,
    ) -> Result<(), SessionStoreError> {
        state.last_interaction = Utc::now();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            session_id.to_string(),
            Entry {
                state,
                expires_at: Utc::now() + self.ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, session_id: &str) {
        self.sessions.lock().await.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let (id, state) = store.create().await.unwrap();
        assert_eq!(state.question_index, 0);

        let fetched = store.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched.question_index, 0);
        assert!(fetched.reprompted_index.is_none());
    }

    #[tokio::test]
    async fn unknown_id_reads_as_none() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        assert!(store.get("missing-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let store = MemorySessionStore::new(Duration::ZERO);
        let (id, _) = store.create().await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_advances_state_and_stamps_interaction() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let (id, mut state) = store.create().await.unwrap();
        let created_stamp = state.last_interaction;

        state.question_index = 3;
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.update(&id, state).await.unwrap();

        let fetched = store.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched.question_index, 3);
        assert!(fetched.last_interaction > created_stamp);
    }

    #[tokio::test]
    async fn update_slides_the_expiry_window() {
        let store = MemorySessionStore::new(Duration::from_millis(100));
        let (id, state) = store.create().await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;
        store.update(&id, state).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        // 120ms after create but only 60ms after the last write
        assert!(store.get(&id).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_silent_on_missing_keys() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let (id, _) = store.create().await.unwrap();
        store.delete(&id).await;
        assert!(store.get(&id).await.unwrap().is_none());
        // Deleting again must not fail
        store.delete(&id).await;
    }
}
