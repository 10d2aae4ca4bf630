//! Profile persistence — durable storage for completed profiles.
//!
//! The wizard only needs a `save -> success | error` contract. The HTTP
//! backend posts the flattened record to a PostgREST-style endpoint; the
//! saver wraps any backend with bounded retries, exponential backoff with
//! jitter, and never propagates an error to the conversation flow.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use crate::config::ProfileApiConfig;
use crate::error::PersistError;
use crate::onboarding::model::PersistedRecord;
use crate::onboarding::validate::is_valid_email;

/// One insert attempt against the durable profile store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert(&self, record: &PersistedRecord) -> Result<(), PersistError>;
}

/// HTTP profile store — one JSON POST per insert, hard per-request timeout.
pub struct HttpProfileStore {
    client: reqwest::Client,
    config: ProfileApiConfig,
    request_timeout: Duration,
}

impl HttpProfileStore {
    pub fn new(config: ProfileApiConfig, request_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            request_timeout,
        }
    }

    fn classify_send_error(&self, e: reqwest::Error) -> PersistError {
        if e.is_timeout() {
            PersistError::Timeout(self.request_timeout)
        } else if e.is_connect() {
            // DNS resolution and connection refusals land here
            PersistError::Connect(e.to_string())
        } else {
            PersistError::InvalidResponse(e.to_string())
        }
    }
}

fn classify_status(status: u16, body: &str) -> PersistError {
    if status == 409 || body.contains("duplicate key") || body.contains("23505") {
        return PersistError::AlreadyExists;
    }
    if status == 404 || body.contains("42P01") || body.contains("does not exist") {
        return PersistError::Schema(format!("{status}: {body}"));
    }
    PersistError::Server {
        status,
        message: body.chars().take(200).collect(),
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn insert(&self, record: &PersistedRecord) -> Result<(), PersistError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .timeout(self.request_timeout)
            .bearer_auth(self.config.api_key.expose_secret())
            .header("apikey", self.config.api_key.expose_secret())
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            debug!(email = %record.email, "Profile record inserted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status.as_u16(), &body))
    }
}

/// Result of a save, as the conversation flow sees it.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl SaveOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Bounded-retry wrapper around a [`ProfileStore`]. Never returns an error:
/// after the attempt budget is spent the failure is reported in the outcome.
pub struct ProfileSaver {
    store: Arc<dyn ProfileStore>,
    max_attempts: u32,
    base_delay: Duration,
}

impl ProfileSaver {
    pub fn new(store: Arc<dyn ProfileStore>, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Save a record, retrying transient/network-class failures with
    /// exponential backoff and jitter. A record without a syntactically
    /// valid email is rejected before any network call.
    pub async fn save(&self, record: &PersistedRecord) -> SaveOutcome {
        if !is_valid_email(&record.email) {
            warn!("Refusing to save a profile without a valid email");
            return SaveOutcome::failed(PersistError::MissingEmail.to_string());
        }

        for attempt in 1..=self.max_attempts {
            match self.store.insert(record).await {
                Ok(()) => {
                    info!(email = %record.email, attempt, "Profile saved");
                    return SaveOutcome::ok();
                }
                Err(e) => {
                    warn!(
                        email = %record.email,
                        attempt,
                        max_attempts = self.max_attempts,
                        retryable = e.is_retryable(),
                        error = %e,
                        "Profile save attempt failed"
                    );
                    if !e.is_retryable() || attempt == self.max_attempts {
                        return SaveOutcome::failed(e.to_string());
                    }
                    tokio::time::sleep(backoff_delay(self.base_delay, attempt)).await;
                }
            }
        }

        // The loop always returns; this satisfies the compiler only.
        SaveOutcome::failed("save attempts exhausted")
    }
}

/// `base × 2^(attempt-1)`, scaled by a uniform jitter factor in [0.9, 1.1].
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exponential = base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
    let jitter: f64 = rand::thread_rng().gen_range(0.9..=1.1);
    exponential.mul_f64(jitter)
}
