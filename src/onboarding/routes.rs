//! REST endpoints for the onboarding conversation.
//!
//! Thin translation layer: decode camelCase request bodies, call the
//! manager, map outcomes and errors to wire DTOs and status codes. Store
//! and consistency failures are logged in full server-side and surfaced to
//! clients as a generic message only.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::error;

use super::catalog::{InputMode, QuestionOption};
use super::manager::{
    BackNavError, OnboardingManager, RetrySaveError, TurnInput, TurnOutcome,
};
use super::paths::PathRecommendation;
use crate::error::Error;

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub manager: Arc<OnboardingManager>,
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/onboarding/turn", post(turn))
        .route("/api/onboarding/back", post(back))
        .route("/api/onboarding/restart", post(restart))
        .route("/api/onboarding/retry-save", post(retry_save))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "wayfinder"
    }))
}

// ── Wire DTOs ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TurnRequest {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    response: Option<serde_json::Value>,
    #[serde(default)]
    conditional_text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TurnResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_session_id: Option<String>,
    current_question_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_mode: Option<InputMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<QuestionOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_multi_select: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conditional_trigger_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conditional_text_input_label: Option<String>,
    is_final_question: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_result: Option<PathRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    halt_flow: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<TurnOutcome> for TurnResponse {
    fn from(outcome: TurnOutcome) -> Self {
        let question = outcome.question;
        // A reprompt replaces the question text; the rest of the question
        // metadata still ships so the client can re-render the input.
        let next_question = outcome
            .reprompt
            .or_else(|| question.as_ref().map(|q| q.text.clone()));
        Self {
            success: None,
            session_id: outcome.session_id,
            new_session_id: outcome.new_session_id,
            current_question_index: outcome.current_question_index,
            next_question,
            input_mode: question.as_ref().map(|q| q.input_mode),
            options: question
                .as_ref()
                .filter(|q| !q.options.is_empty())
                .map(|q| q.options.clone()),
            is_multi_select: question.as_ref().map(|q| q.is_multi_select),
            conditional_trigger_value: question
                .as_ref()
                .and_then(|q| q.conditional_trigger_value.clone()),
            conditional_text_input_label: question
                .as_ref()
                .and_then(|q| q.conditional_text_input_label.clone()),
            is_final_question: outcome.is_final_question,
            final_result: outcome.final_result,
            error: outcome.error,
            halt_flow: outcome.halt_flow,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackRequest {
    session_id: String,
    target_question_index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetrySaveRequest {
    #[serde(default)]
    session_id: Option<String>,
}

// ── Handlers ────────────────────────────────────────────────────────────

/// POST /api/onboarding/turn
async fn turn(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<TurnRequest>,
) -> impl IntoResponse {
    let input = TurnInput {
        session_id: body.session_id,
        response: body.response,
        conditional_text: body.conditional_text,
    };
    match state.manager.turn(input).await {
        Ok(outcome) => (StatusCode::OK, Json(TurnResponse::from(outcome))).into_response(),
        Err(e) => internal_error("turn", e),
    }
}

/// POST /api/onboarding/back
async fn back(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<BackRequest>,
) -> impl IntoResponse {
    match state
        .manager
        .back(&body.session_id, body.target_question_index)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"success": true})),
        )
            .into_response(),
        Err(BackNavError::SessionNotFound) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        )
            .into_response(),
        Err(BackNavError::InvalidIndex) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Invalid question index"})),
        )
            .into_response(),
        Err(BackNavError::Store(e)) => internal_error("back", Error::SessionStore(e)),
    }
}

/// POST /api/onboarding/restart
async fn restart(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    match state.manager.restart().await {
        Ok(outcome) => {
            let mut response = TurnResponse::from(outcome);
            response.success = Some(true);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => internal_error("restart", e),
    }
}

/// POST /api/onboarding/retry-save
async fn retry_save(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<RetrySaveRequest>,
) -> impl IntoResponse {
    let Some(session_id) = body.session_id.filter(|s| !s.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"success": false, "error": "sessionId is required"})),
        )
            .into_response();
    };

    match state.manager.retry_save(&session_id).await {
        Ok(outcome) if outcome.success => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "Profile saved"
            })),
        )
            .into_response(),
        Ok(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": false,
                "error": outcome.error,
                "message": "Profile save failed again; try once more later"
            })),
        )
            .into_response(),
        Err(RetrySaveError::SessionNotFound) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"success": false, "error": "Session not found"})),
        )
            .into_response(),
        Err(RetrySaveError::MissingEmail) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "error": "Session profile has no email to save"
            })),
        )
            .into_response(),
        Err(RetrySaveError::Store(e)) => internal_error("retry-save", Error::SessionStore(e)),
    }
}

fn internal_error(operation: &str, e: Error) -> axum::response::Response {
    error!(operation, error = %e, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Internal server error"})),
    )
        .into_response()
}
