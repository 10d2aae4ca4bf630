//! Per-session conversation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::OnboardingProfile;

/// Mutable conversation state, keyed by a server-generated session id.
///
/// Created empty on the first turn, mutated on every accepted or rejected
/// turn, and deleted once the completed profile is saved. A session that
/// receives no traffic for the TTL window becomes unrecoverable; the next
/// turn against it is treated as expired, not as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Index of the next question to ask. Reaching the catalog length means
    /// the conversation is complete.
    pub question_index: usize,
    /// The partial profile built so far.
    pub profile: OnboardingProfile,
    /// Index of the question currently in its one-shot reprompt state.
    /// At most one question is in reprompt at a time, and it is always the
    /// current `question_index`.
    pub reprompted_index: Option<usize>,
    /// Drives the store's sliding expiration; stamped on every write.
    pub last_interaction: DateTime<Utc>,
}

impl SessionState {
    /// Fresh state for a newly created session.
    pub fn new() -> Self {
        Self {
            question_index: 0,
            profile: OnboardingProfile::default(),
            reprompted_index: None,
            last_interaction: Utc::now(),
        }
    }

    /// Whether the current question is in its reprompt state.
    pub fn is_reprompting(&self) -> bool {
        self.reprompted_index == Some(self.question_index)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_question_zero() {
        let state = SessionState::new();
        assert_eq!(state.question_index, 0);
        assert!(state.reprompted_index.is_none());
        assert!(!state.is_reprompting());
        assert!(state.profile.email.is_none());
    }

    #[test]
    fn reprompt_tracks_current_question_only() {
        let mut state = SessionState::new();
        state.question_index = 3;
        state.reprompted_index = Some(3);
        assert!(state.is_reprompting());

        state.question_index = 4;
        assert!(!state.is_reprompting());
    }

    #[test]
    fn state_serde_roundtrip() {
        let mut state = SessionState::new();
        state.question_index = 5;
        state.profile.email = Some("dev@example.com".into());
        state.reprompted_index = Some(5);

        let json = serde_json::to_string(&state).unwrap();
        let parsed: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.question_index, 5);
        assert_eq!(parsed.reprompted_index, Some(5));
        assert_eq!(parsed.profile.email.as_deref(), Some("dev@example.com"));
    }
}
