//! Backend-agnostic session store trait.

use async_trait::async_trait;

use crate::error::SessionStoreError;
use crate::onboarding::state::SessionState;

/// Key-value session storage with a sliding TTL.
///
/// `get` returns `None` both for a key that never existed and for one whose
/// TTL elapsed — callers cannot tell the two apart, TTL being the only
/// expiry signal. Every `update` re-stamps the interaction time and resets
/// the expiration window, so an active conversation never expires mid-flow.
///
/// Concurrency: two turns racing on the same session id perform unguarded
/// read-modify-write — last writer wins, and each write extends the TTL.
/// Accepted limitation; callers must not assume stronger guarantees.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Generate a fresh session id, write the initial state, return both.
    async fn create(&self) -> Result<(String, SessionState), SessionStoreError>;

    /// Read a session's state; `None` when missing or expired.
    async fn get(&self, session_id: &str) -> Result<Option<SessionState>, SessionStoreError>;

    /// Overwrite a session's state, stamping the interaction time and
    /// resetting the expiration window.
    async fn update(&self, session_id: &str, state: SessionState)
    -> Result<(), SessionStoreError>;

    /// Best-effort removal. Absence of the key is not an error; failures are
    /// logged, never returned.
    async fn delete(&self, session_id: &str);
}
