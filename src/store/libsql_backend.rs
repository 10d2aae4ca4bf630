//! libSQL-backed session store.
//!
//! One `sessions` table: id, JSON state blob, expiry stamp. Expiry is
//! enforced on read — an expired row reads as absent and is removed — and
//! every write pushes the expiry stamp forward by the configured TTL.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SessionStoreError;
use crate::onboarding::state::SessionState;

use super::traits::SessionStore;

/// libSQL session store. The connection is `Send + Sync` and reused for all
/// operations, safe for concurrent async use.
pub struct LibSqlSessionStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
    ttl: chrono::Duration,
}

impl LibSqlSessionStore {
    /// Open (or create) a local database file and set up the schema.
    pub async fn new_local(path: &Path, ttl: Duration) -> Result<Self, SessionStoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SessionStoreError::Open(format!("Failed to create store directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| SessionStoreError::Open(format!("Failed to open libSQL store: {e}")))?;

        let store = Self::from_db(db, ttl)?;
        store.init_schema().await?;
        info!(path = %path.display(), "Session store opened");
        Ok(store)
    }

    /// Create an in-memory store (for tests and ephemeral runs).
    pub async fn new_memory(ttl: Duration) -> Result<Self, SessionStoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                SessionStoreError::Open(format!("Failed to create in-memory store: {e}"))
            })?;

        let store = Self::from_db(db, ttl)?;
        store.init_schema().await?;
        Ok(store)
    }

    fn from_db(db: LibSqlDatabase, ttl: Duration) -> Result<Self, SessionStoreError> {
        let conn = db
            .connect()
            .map_err(|e| SessionStoreError::Open(format!("Failed to create connection: {e}")))?;
        Ok(Self {
            db: Arc::new(db),
            conn,
            // Absurdly large TTLs clamp to a century rather than overflow
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::days(36_500)),
        })
    }

    async fn init_schema(&self) -> Result<(), SessionStoreError> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS sessions (
                    id TEXT PRIMARY KEY,
                    state TEXT NOT NULL,
                    expires_at TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions(expires_at);
                "#,
            )
            .await
            .map_err(|e| SessionStoreError::Open(format!("init_schema: {e}")))?;
        Ok(())
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Write (insert or overwrite) a session row with a fresh expiry stamp.
    async fn put(&self, session_id: &str, state: &SessionState) -> Result<(), SessionStoreError> {
        let state_json = serde_json::to_string(state)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        let expires_at = (Utc::now() + self.ttl).to_rfc3339();

        self.conn()
            .execute(
                "INSERT INTO sessions (id, state, expires_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET state = ?2, expires_at = ?3",
                params![session_id, state_json, expires_at],
            )
            .await
            .map_err(|e| SessionStoreError::Write(format!("put session: {e}")))?;
        Ok(())
    }
}

fn parse_expiry(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        // An unparseable stamp reads as already expired
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[async_trait]
impl SessionStore for LibSqlSessionStore {
    async fn create(&self) -> Result<(String, SessionState), SessionStoreError> {
        let session_id = Uuid::new_v4().to_string();
        let state = SessionState::new();
        self.put(&session_id, &state).await?;
        debug!(session_id = %session_id, "Session created");
        Ok((session_id, state))
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionState>, SessionStoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT state, expires_at FROM sessions WHERE id = ?1",
                params![session_id],
            )
            .await
            .map_err(|e| SessionStoreError::Read(format!("get session: {e}")))?;

        let row = match rows.next().await {
            Ok(Some(row)) => row,
            Ok(None) => return Ok(None),
            Err(e) => return Err(SessionStoreError::Read(format!("get session: {e}"))),
        };

        let state_json: String = row
            .get(0)
            .map_err(|e| SessionStoreError::Read(format!("get session row: {e}")))?;
        let expires_str: String = row
            .get(1)
            .map_err(|e| SessionStoreError::Read(format!("get session row: {e}")))?;

        if parse_expiry(&expires_str) <= Utc::now() {
            // Expired rows are swept on read and report as absent
            self.delete(session_id).await;
            return Ok(None);
        }

        let state: SessionState = serde_json::from_str(&state_json)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        Ok(Some(state))
    }

    async fn update(
        &self,
        session_id: &str,
        mut state: SessionState,
    ) -> Result<(), SessionStoreError> {
        state.last_interaction = Utc::now();
        self.put(session_id, &state).await
    }

    async fn delete(&self, session_id: &str) {
        if let Err(e) = self
            .conn()
            .execute("DELETE FROM sessions WHERE id = ?1", params![session_id])
            .await
        {
            warn!(session_id = %session_id, error = %e, "Failed to delete session");
        }
    }
}
