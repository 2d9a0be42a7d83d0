//! Minimal axum wiring: enough to exercise the broadcast fabric and submit
//! actions over a socket. Routing policy, pagination and REST conventions
//! are a product-surface concern outside this repo's scope (§1) — this
//! module exists to drive the engine end to end, not to define one.
//!
//! Grounded on the teacher's `servers::WebUiServer` for the
//! `Router`/`TcpListener`/`axum::serve` bootstrap shape and `auth::routes`
//! for the `State(Arc<..>)` + `Json` + status-code-mapped error idiom.

mod ws;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::engine::Action;
use crate::error::GameError;
use crate::identity::JwtVerifier;
use crate::runtime::GameRuntime;

pub struct AppState {
    pub runtime: GameRuntime,
    pub identity: JwtVerifier,
    pub action_deadline: Duration,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/games/{game_id}/actions", post(submit_action))
        .route("/ws/{game_id}", get(ws::upgrade))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorResponse {
    error_kind: &'static str,
    message: String,
}

fn error_response(err: GameError) -> impl IntoResponse {
    let (status, kind) = match &err {
        GameError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
        GameError::NotYourTurn => (StatusCode::FORBIDDEN, "NotYourTurn"),
        GameError::NotAParticipant => (StatusCode::FORBIDDEN, "NotAParticipant"),
        GameError::IllegalState(_) => (StatusCode::CONFLICT, "IllegalState"),
        GameError::PreconditionFailed(_) => (StatusCode::UNPROCESSABLE_ENTITY, "PreconditionFailed"),
        GameError::Malformed(_) => (StatusCode::BAD_REQUEST, "Malformed"),
        GameError::TimedOut => (StatusCode::REQUEST_TIMEOUT, "TimedOut"),
        GameError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
        GameError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal"),
    };
    (status, Json(ErrorResponse { error_kind: kind, message: err.to_string() }))
}

#[derive(serde::Deserialize)]
struct SubmitActionRequest {
    #[serde(flatten)]
    action: Action,
}

#[derive(Serialize)]
struct SubmitActionResponse {
    success: bool,
    action_result: crate::engine::ActionOutcome,
    new_state: serde_json::Value,
}

fn bearer_user_id(state: &AppState, headers: &axum::http::HeaderMap) -> Result<i64, GameError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| GameError::Malformed("missing Authorization header".into()))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| GameError::Malformed("Authorization header is not a bearer token".into()))?;
    state.identity.verify(token).map_err(GameError::from)
}

async fn submit_action(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    headers: axum::http::HeaderMap,
    Json(req): Json<SubmitActionRequest>,
) -> impl IntoResponse {
    let actor_id = match bearer_user_id(&state, &headers) {
        Ok(id) => id,
        Err(e) => return error_response(e).into_response(),
    };

    match state.runtime.submit_action(&game_id, actor_id, req.action, Some(state.action_deadline)).await {
        Ok((game, outcome)) => Json(SubmitActionResponse {
            success: true,
            action_result: outcome,
            new_state: serde_json::to_value(game.external_view()).unwrap_or(serde_json::Value::Null),
        })
        .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
