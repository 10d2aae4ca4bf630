//! OnboardingManager — the conversation controller.
//!
//! Owns question sequencing, validation outcome handling (accept /
//! reprompt / halt), parsing dispatch, completion detection, path
//! determination, and session teardown. All state lives in the session
//! store between turns, so the manager itself is stateless and safe to
//! share across concurrent requests.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::PathLinks;
use crate::error::{Error, Result, SessionStoreError};
use crate::persist::{ProfileSaver, SaveOutcome};
use crate::store::SessionStore;

use super::catalog::{QuestionCatalog, QuestionDefinition};
use super::model::PersistedRecord;
use super::parse::apply_response;
use super::paths::{self, PathRecommendation};
use super::response::RawResponse;
use super::state::SessionState;
use super::validate::{ValidationHint, Validator};

/// One inbound conversation turn.
#[derive(Debug, Clone, Default)]
pub struct TurnInput {
    /// `None` starts a new conversation.
    pub session_id: Option<String>,
    /// The raw answer to the current question, in whatever shape the
    /// question's input mode admits.
    pub response: Option<serde_json::Value>,
    /// Extra free-text collected by conditional-text questions.
    pub conditional_text: Option<String>,
}

/// What a turn produced: the next question, a reprompt, a completion
/// result, or a halt.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: String,
    /// Set only on expiry-triggered restart; the caller must swap to it.
    pub new_session_id: Option<String>,
    pub current_question_index: usize,
    pub question: Option<QuestionDefinition>,
    /// First-failure reprompt text; shown instead of the question text.
    pub reprompt: Option<String>,
    pub is_final_question: bool,
    pub final_result: Option<PathRecommendation>,
    pub error: Option<String>,
    /// When true the client must stop sending turns and tell the user to
    /// refresh.
    pub halt_flow: bool,
}

impl TurnOutcome {
    fn halted(session_id: String, index: usize, message: &str) -> Self {
        Self {
            session_id,
            new_session_id: None,
            current_question_index: index,
            question: None,
            reprompt: None,
            is_final_question: false,
            final_result: None,
            error: Some(message.to_string()),
            halt_flow: true,
        }
    }
}

/// Back-navigation failures, mapped to client errors by the routes layer.
#[derive(Debug, thiserror::Error)]
pub enum BackNavError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Target question index is out of range")]
    InvalidIndex,

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Retry-save failures, mapped to client errors by the routes layer.
#[derive(Debug, thiserror::Error)]
pub enum RetrySaveError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Session profile has no email; nothing can be saved")]
    MissingEmail,

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// The conversation controller. One instance serves all sessions.
pub struct OnboardingManager {
    catalog: QuestionCatalog,
    validator: Validator,
    sessions: Arc<dyn SessionStore>,
    saver: ProfileSaver,
    links: PathLinks,
}

impl OnboardingManager {
    pub fn new(
        catalog: QuestionCatalog,
        sessions: Arc<dyn SessionStore>,
        saver: ProfileSaver,
        links: PathLinks,
    ) -> Self {
        Self {
            catalog,
            validator: Validator::new(),
            sessions,
            saver,
            links,
        }
    }

    /// Process one conversation turn.
    ///
    /// Without a session id this creates a session and asks question 0. A
    /// stale id restarts transparently with a `new_session_id` the caller
    /// must adopt. Otherwise the answer is validated, parsed, and the index
    /// advanced; reaching the end of the catalog completes the flow.
    pub async fn turn(&self, input: TurnInput) -> Result<TurnOutcome> {
        let Some(requested_id) = input.session_id.clone() else {
            let (session_id, state) = self.sessions.create().await?;
            return self.ask_current(session_id, &state, None, None);
        };

        let Some(mut state) = self.sessions.get(&requested_id).await? else {
            // Expired and never-existed are indistinguishable; restart either way
            let (new_id, new_state) = self.sessions.create().await?;
            info!(expired = %requested_id, replacement = %new_id, "Session expired; restarting");
            let mut outcome = self.ask_current(
                new_id.clone(),
                &new_state,
                None,
                Some("Your session expired, so the conversation has restarted.".to_string()),
            )?;
            outcome.new_session_id = Some(new_id);
            return Ok(outcome);
        };

        let index = state.question_index;
        let Some(question) = self.catalog.get(index).cloned() else {
            error!(session_id = %requested_id, index, "No question at the session's index");
            self.sessions.delete(&requested_id).await;
            return Err(Error::Consistency(format!("no question at index {index}")));
        };

        let raw = RawResponse::decode(input.response.as_ref(), &question);
        let is_valid = self.validator.validate(
            raw.as_ref().and_then(RawResponse::text_value),
            question.validation_hint,
        );

        let accepted = if is_valid {
            state.reprompted_index = None;
            raw.as_ref()
        } else if !state.is_reprompting() && question.reprompt_message.is_some() {
            // First failure: ask the same question again with the reprompt
            // text. No advancement, no parsing.
            state.reprompted_index = Some(index);
            let reprompt = question.reprompt_message.clone();
            self.sessions.update(&requested_id, state.clone()).await?;
            return self.ask_current(requested_id, &state, reprompt, None);
        } else if question.validation_hint == Some(ValidationHint::Email) {
            // Repeated failure on the one hard-required field. The session
            // record is left exactly as it was, so a refresh starts fresh
            // instead of resuming a halted conversation.
            warn!(session_id = %requested_id, "Email validation failed twice; halting flow");
            return Ok(TurnOutcome::halted(
                requested_id,
                index,
                "We couldn't verify your email address. Please refresh the page to start over.",
            ));
        } else {
            // Optional fields never block the flow: a repeated failure
            // degrades to an empty answer.
            state.reprompted_index = None;
            None
        };

        apply_response(
            &question,
            accepted,
            input.conditional_text.as_deref(),
            &mut state.profile,
        );
        state.question_index += 1;

        if state.question_index >= self.catalog.total_count() {
            return self.complete(requested_id, state).await;
        }

        self.sessions.update(&requested_id, state.clone()).await?;
        self.ask_current(requested_id, &state, None, None)
    }

    /// Create a fresh session and return the first question.
    pub async fn restart(&self) -> Result<TurnOutcome> {
        let (session_id, state) = self.sessions.create().await?;
        self.ask_current(session_id, &state, None, None)
    }

    /// Rewind the conversation to an earlier question.
    ///
    /// Only the index and the reprompt marker are rewritten: answers already
    /// accumulated for questions past the target stay in the profile until
    /// those questions are re-answered. Re-parsing on re-entry overwrites
    /// them field group by field group.
    pub async fn back(
        &self,
        session_id: &str,
        target_index: usize,
    ) -> std::result::Result<(), BackNavError> {
        if target_index >= self.catalog.total_count() {
            return Err(BackNavError::InvalidIndex);
        }
        let mut state = self
            .sessions
            .get(session_id)
            .await?
            .ok_or(BackNavError::SessionNotFound)?;

        state.question_index = target_index;
        state.reprompted_index = None;
        self.sessions.update(session_id, state).await?;
        Ok(())
    }

    /// Re-attempt persistence of a completed profile whose save failed.
    ///
    /// Completion keeps the session alive on save failure precisely so this
    /// path has data to work with; a successful retry deletes it.
    pub async fn retry_save(
        &self,
        session_id: &str,
    ) -> std::result::Result<SaveOutcome, RetrySaveError> {
        let state = self
            .sessions
            .get(session_id)
            .await?
            .ok_or(RetrySaveError::SessionNotFound)?;

        let Some(record) = PersistedRecord::from_profile(&state.profile) else {
            return Err(RetrySaveError::MissingEmail);
        };

        let outcome = self.saver.save(&record).await;
        if outcome.success {
            self.sessions.delete(session_id).await;
        }
        Ok(outcome)
    }

    /// The conversation is over: stamp, gate, recommend, persist, tear down.
    async fn complete(&self, session_id: String, mut state: SessionState) -> Result<TurnOutcome> {
        state.profile.created_at = Some(Utc::now());

        if state.profile.email.is_none() {
            // Unreachable while the email halt logic holds; treat as a bug
            error!(session_id = %session_id, "Conversation completed without an email");
            self.sessions.delete(&session_id).await;
            return Err(Error::Consistency(
                "completed profile is missing an email".to_string(),
            ));
        }

        let recommendation = paths::recommend(&state.profile, &self.links);
        state.profile.recommended_path = Some(recommendation.recommended_path.clone());
        state.profile.recommended_path_url = Some(recommendation.recommended_path_url.clone());

        let Some(record) = PersistedRecord::from_profile(&state.profile) else {
            self.sessions.delete(&session_id).await;
            return Err(Error::Consistency(
                "completed profile is not persistable".to_string(),
            ));
        };

        let save = self.saver.save(&record).await;
        if save.success {
            self.sessions.delete(&session_id).await;
        } else {
            // Keep the completed state so retry-save can re-submit it
            self.sessions.update(&session_id, state.clone()).await?;
        }

        info!(
            session_id = %session_id,
            path = %recommendation.recommended_path,
            saved = save.success,
            "Onboarding completed"
        );

        Ok(TurnOutcome {
            session_id,
            new_session_id: None,
            current_question_index: state.question_index,
            question: None,
            reprompt: None,
            is_final_question: true,
            final_result: Some(recommendation),
            error: save.error.map(|e| {
                format!("Your recommendation is ready, but saving your profile failed: {e}")
            }),
            halt_flow: false,
        })
    }

    /// Build the ask-this-question outcome for the session's current index.
    fn ask_current(
        &self,
        session_id: String,
        state: &SessionState,
        reprompt: Option<String>,
        error: Option<String>,
    ) -> Result<TurnOutcome> {
        let index = state.question_index;
        let Some(question) = self.catalog.get(index) else {
            error!(index, "No question definition at a supposedly valid index");
            return Err(Error::Consistency(format!("no question at index {index}")));
        };
        Ok(TurnOutcome {
            session_id,
            new_session_id: None,
            current_question_index: index,
            question: Some(question.clone()),
            reprompt,
            is_final_question: false,
            final_result: None,
            error,
            halt_flow: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::error::PersistError;
    use crate::onboarding::catalog::QuestionKind;
    use crate::onboarding::validate::ValidationHint;
    use crate::persist::ProfileStore;
    use crate::store::MemorySessionStore;

    /// Profile store that records saves and fails the first `failures` calls.
    struct RecordingStore {
        attempts: AtomicU32,
        failures: u32,
        saved: tokio::sync::Mutex<Vec<PersistedRecord>>,
    }

    impl RecordingStore {
        fn new(failures: u32) -> Self {
            Self {
                attempts: AtomicU32::new(0),
                failures,
                saved: tokio::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProfileStore for RecordingStore {
        async fn insert(&self, record: &PersistedRecord) -> std::result::Result<(), PersistError> {
            let n = self.attempts.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(PersistError::Server {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            self.saved.lock().await.push(record.clone());
            Ok(())
        }
    }

    struct Harness {
        manager: OnboardingManager,
        sessions: Arc<MemorySessionStore>,
        profiles: Arc<RecordingStore>,
    }

    fn harness_with(catalog: QuestionCatalog, save_failures: u32) -> Harness {
        let sessions = Arc::new(MemorySessionStore::new(Duration::from_secs(60)));
        let profiles = Arc::new(RecordingStore::new(save_failures));
        let saver = ProfileSaver::new(
            Arc::clone(&profiles) as Arc<dyn ProfileStore>,
            1,
            Duration::from_millis(1),
        );
        let manager = OnboardingManager::new(
            catalog,
            Arc::clone(&sessions) as Arc<dyn SessionStore>,
            saver,
            PathLinks::new("https://example.org"),
        );
        Harness {
            manager,
            sessions,
            profiles,
        }
    }

    fn harness() -> Harness {
        harness_with(QuestionCatalog::default_questions(), 0)
    }

    fn turn_with(session_id: &str, response: serde_json::Value) -> TurnInput {
        TurnInput {
            session_id: Some(session_id.to_string()),
            response: Some(response),
            conditional_text: None,
        }
    }

    /// Answers that walk the default catalog start to finish.
    fn default_answers() -> Vec<serde_json::Value> {
        vec![
            json!("Alice"),
            json!("alice@example.com"),
            json!("alice_dev"),
            json!("alice-gh"),
            json!("@alice"),
            json!(["Rust", "TypeScript"]),
            json!({"buttonValue": "Yes", "selectedValues": ["Cosmos"]}),
            json!(["LLMs / GenAI"]),
            json!({"buttonValue": "Very familiar"}),
            json!({"buttonValue": "Advanced"}),
            json!(["Web3"]),
            json!({"buttonValue": "Build apps/dApps"}),
            json!("https://alice.dev"),
            json!("Love mechanism design"),
        ]
    }

    #[tokio::test]
    async fn first_turn_creates_a_session_and_asks_question_zero() {
        let h = harness();
        let outcome = h.manager.turn(TurnInput::default()).await.unwrap();
        assert_eq!(outcome.current_question_index, 0);
        assert!(!outcome.is_final_question);
        assert!(outcome.question.is_some());
        assert!(outcome.error.is_none());
        assert!(h.sessions.get(&outcome.session_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn valid_answers_advance_by_exactly_one() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        let mut expected = 0;
        for answer in default_answers().into_iter().take(5) {
            let outcome = h.manager.turn(turn_with(&id, answer)).await.unwrap();
            expected += 1;
            assert_eq!(outcome.current_question_index, expected);
        }
    }

    #[tokio::test]
    async fn full_conversation_completes_and_saves() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        let answers = default_answers();
        let total = answers.len();
        for (i, answer) in answers.into_iter().enumerate() {
            let outcome = h.manager.turn(turn_with(&id, answer)).await.unwrap();
            if i + 1 < total {
                assert!(!outcome.is_final_question, "turn {i} should not complete");
            } else {
                assert!(outcome.is_final_question);
                let result = outcome.final_result.unwrap();
                assert_eq!(result.recommended_path, "Contractor");
                assert!(outcome.error.is_none());
            }
        }

        let saved = h.profiles.saved.lock().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].email, "alice@example.com");
        assert_eq!(saved[0].x_handle.as_deref(), Some("@alice"));
        assert_eq!(saved[0].recommended_path.as_deref(), Some("Contractor"));
        assert!(saved[0].created_at.is_some());
        drop(saved);

        // Session is torn down after a successful save
        assert!(h.sessions.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_session_restarts_with_a_new_id() {
        let h = harness();
        let outcome = h
            .manager
            .turn(turn_with("missing-id", json!("whatever")))
            .await
            .unwrap();

        assert_eq!(outcome.current_question_index, 0);
        let new_id = outcome.new_session_id.unwrap();
        assert_ne!(new_id, "missing-id");
        assert_eq!(outcome.session_id, new_id);
        assert!(outcome.error.unwrap().contains("expired"));
    }

    #[tokio::test]
    async fn invalid_email_reprompts_once_then_halts() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        h.manager.turn(turn_with(&id, json!("Alice"))).await.unwrap();

        // First invalid email: same index, reprompt text
        let first = h
            .manager
            .turn(turn_with(&id, json!("not-an-email")))
            .await
            .unwrap();
        assert_eq!(first.current_question_index, 1);
        assert!(first.reprompt.is_some());
        assert!(!first.halt_flow);

        let pre_halt = h.sessions.get(&id).await.unwrap().unwrap();
        assert_eq!(pre_halt.reprompted_index, Some(1));

        // Second invalid email: halt, and no session mutation
        let second = h
            .manager
            .turn(turn_with(&id, json!("still-bad")))
            .await
            .unwrap();
        assert!(second.halt_flow);
        assert_eq!(second.current_question_index, 1);
        assert!(second.question.is_none());

        let post_halt = h.sessions.get(&id).await.unwrap().unwrap();
        assert_eq!(post_halt.question_index, pre_halt.question_index);
        assert_eq!(post_halt.reprompted_index, pre_halt.reprompted_index);
        assert!(post_halt.profile.email.is_none());
    }

    #[tokio::test]
    async fn reprompt_clears_after_a_valid_answer() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        h.manager.turn(turn_with(&id, json!("Alice"))).await.unwrap();
        h.manager
            .turn(turn_with(&id, json!("not-an-email")))
            .await
            .unwrap();

        let ok = h
            .manager
            .turn(turn_with(&id, json!("alice@example.com")))
            .await
            .unwrap();
        assert_eq!(ok.current_question_index, 2);
        assert!(ok.reprompt.is_none());

        let state = h.sessions.get(&id).await.unwrap().unwrap();
        assert!(state.reprompted_index.is_none());
        assert_eq!(state.profile.email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn optional_field_degrades_to_null_on_second_failure() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        h.manager.turn(turn_with(&id, json!("Alice"))).await.unwrap();
        h.manager
            .turn(turn_with(&id, json!("alice@example.com")))
            .await
            .unwrap();

        // Telegram handle: "abc" is too short, twice
        let first = h.manager.turn(turn_with(&id, json!("abc"))).await.unwrap();
        assert_eq!(first.current_question_index, 2);
        assert!(first.reprompt.is_some());

        let second = h.manager.turn(turn_with(&id, json!("abc"))).await.unwrap();
        assert_eq!(second.current_question_index, 3);
        assert!(!second.halt_flow);

        let state = h.sessions.get(&id).await.unwrap().unwrap();
        assert!(state.profile.telegram.is_none());
        assert!(state.reprompted_index.is_none());
    }

    fn short_catalog(n: usize) -> QuestionCatalog {
        let mut questions = vec![
            QuestionDefinition::text_question(QuestionKind::Email, "Email?").validated(
                ValidationHint::Email,
                "Try again with a real email.",
            ),
        ];
        for i in 1..n {
            questions.push(QuestionDefinition::text_question(
                QuestionKind::AdditionalSkills,
                &format!("Question {i}?"),
            ));
        }
        QuestionCatalog::new(questions)
    }

    #[tokio::test]
    async fn completion_fires_exactly_at_catalog_length() {
        for total in [1usize, 5, 14] {
            let h = harness_with(short_catalog(total), 0);
            let start = h.manager.turn(TurnInput::default()).await.unwrap();
            let id = start.session_id;

            let mut completed = 0;
            for i in 0..total {
                let answer = if i == 0 {
                    json!("dev@example.com")
                } else {
                    json!(format!("answer {i}"))
                };
                let outcome = h.manager.turn(turn_with(&id, answer)).await.unwrap();
                if outcome.is_final_question {
                    completed += 1;
                    assert_eq!(i, total - 1, "completed early at turn {i} of {total}");
                    assert_eq!(outcome.current_question_index, total);
                }
            }
            assert_eq!(completed, 1, "exactly one completion for total={total}");
        }
    }

    #[tokio::test]
    async fn completing_without_an_email_question_is_a_consistency_error() {
        let catalog = QuestionCatalog::new(vec![QuestionDefinition::text_question(
            QuestionKind::Name,
            "Name?",
        )]);
        let h = harness_with(catalog, 0);
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        let result = h.manager.turn(turn_with(&id, json!("Alice"))).await;
        assert!(matches!(result, Err(Error::Consistency(_))));
        assert!(h.sessions.get(&id).await.unwrap().is_none());
        assert!(h.profiles.saved.lock().await.is_empty());
    }

    #[tokio::test]
    async fn save_failure_keeps_session_for_retry_save() {
        let h = harness_with(short_catalog(1), 1);
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        let outcome = h
            .manager
            .turn(turn_with(&id, json!("dev@example.com")))
            .await
            .unwrap();
        assert!(outcome.is_final_question);
        assert!(outcome.final_result.is_some());
        assert!(outcome.error.unwrap().contains("saving your profile failed"));

        // Completed state survived, path fields included
        let state = h.sessions.get(&id).await.unwrap().unwrap();
        assert!(state.profile.recommended_path.is_some());
        assert!(state.profile.created_at.is_some());

        // The retry succeeds and tears the session down
        let retry = h.manager.retry_save(&id).await.unwrap();
        assert!(retry.success);
        assert!(h.sessions.get(&id).await.unwrap().is_none());
        assert_eq!(h.profiles.saved.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn retry_save_on_unknown_session_is_not_found() {
        let h = harness();
        let result = h.manager.retry_save("missing-id").await;
        assert!(matches!(result, Err(RetrySaveError::SessionNotFound)));
    }

    #[tokio::test]
    async fn retry_save_without_email_is_rejected() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        let result = h.manager.retry_save(&id).await;
        assert!(matches!(result, Err(RetrySaveError::MissingEmail)));
    }

    #[tokio::test]
    async fn back_navigation_rewinds_and_leaves_stale_answers() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        h.manager.turn(turn_with(&id, json!("Alice"))).await.unwrap();
        h.manager
            .turn(turn_with(&id, json!("alice@example.com")))
            .await
            .unwrap();

        h.manager.back(&id, 0).await.unwrap();

        let state = h.sessions.get(&id).await.unwrap().unwrap();
        assert_eq!(state.question_index, 0);
        // The email answered ahead of the new index is retained as-is
        assert_eq!(state.profile.email.as_deref(), Some("alice@example.com"));

        // The next turn answers question 0 again
        let outcome = h.manager.turn(turn_with(&id, json!("Alicia"))).await.unwrap();
        assert_eq!(outcome.current_question_index, 1);
        let state = h.sessions.get(&id).await.unwrap().unwrap();
        assert_eq!(state.profile.name.as_deref(), Some("Alicia"));
    }

    #[tokio::test]
    async fn back_navigation_clears_a_pending_reprompt() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        h.manager.turn(turn_with(&id, json!("Alice"))).await.unwrap();
        h.manager
            .turn(turn_with(&id, json!("not-an-email")))
            .await
            .unwrap();
        assert_eq!(
            h.sessions.get(&id).await.unwrap().unwrap().reprompted_index,
            Some(1)
        );

        h.manager.back(&id, 1).await.unwrap();
        assert!(
            h.sessions
                .get(&id)
                .await
                .unwrap()
                .unwrap()
                .reprompted_index
                .is_none()
        );
    }

    #[tokio::test]
    async fn back_navigation_rejects_bad_targets() {
        let h = harness();
        let start = h.manager.turn(TurnInput::default()).await.unwrap();
        let id = start.session_id;

        assert!(matches!(
            h.manager.back(&id, 14).await,
            Err(BackNavError::InvalidIndex)
        ));
        assert!(matches!(
            h.manager.back("missing-id", 0).await,
            Err(BackNavError::SessionNotFound)
        ));
    }

    #[tokio::test]
    async fn restart_creates_a_fresh_session() {
        let h = harness();
        let outcome = h.manager.restart().await.unwrap();
        assert_eq!(outcome.current_question_index, 0);
        assert!(outcome.question.is_some());
        assert!(h.sessions.get(&outcome.session_id).await.unwrap().is_some());
    }
}
