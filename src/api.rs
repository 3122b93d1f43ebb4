//! HTTP endpoints backing the single-page view.
//!
//! Precondition failures (spin already running, request in flight) come back
//! as 409 so the view can simply keep its controls disabled; generation
//! failures are 502 with the user-facing message as the body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::state::{AppState, GenerateListError, StateSnapshot};
use crate::types::{GeneratedQuestion, PromptConfig};

/// GET /api/state
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateSnapshot> {
    Json(state.snapshot().await)
}

#[derive(Debug, Deserialize)]
pub struct PlayerRequest {
    pub name: String,
}

/// POST /api/players
pub async fn add_player(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlayerRequest>,
) -> Json<Vec<String>> {
    Json(state.add_player(&req.name).await)
}

/// DELETE /api/players/{name}
pub async fn remove_player(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<Vec<String>> {
    Json(state.remove_player(&name).await)
}

/// POST /api/questions
pub async fn generate_questions(
    State(state): State<Arc<AppState>>,
    Json(cfg): Json<PromptConfig>,
) -> Response {
    match state.generate_list(cfg).await {
        Ok(batch) => Json(batch).into_response(),
        Err(e @ GenerateListError::Busy) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(GenerateListError::Failed(message)) => {
            (StatusCode::BAD_GATEWAY, message).into_response()
        }
    }
}

/// POST /api/spin
pub async fn start_spin(
    State(state): State<Arc<AppState>>,
    Json(cfg): Json<PromptConfig>,
) -> Response {
    match state.start_spin(cfg).await {
        Ok(started) => Json(started).into_response(),
        Err(e) => (StatusCode::CONFLICT, e.to_string()).into_response(),
    }
}

/// POST /api/saved/toggle
pub async fn toggle_saved(
    State(state): State<Arc<AppState>>,
    Json(question): Json<GeneratedQuestion>,
) -> Json<Vec<GeneratedQuestion>> {
    Json(state.toggle_save(question).await)
}

/// DELETE /api/saved/{id}
pub async fn remove_saved(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<Vec<GeneratedQuestion>> {
    Json(state.remove_saved(&id).await)
}
