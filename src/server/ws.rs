//! The observer channel: one axum websocket per session, per §4.5/§6.
//!
//! Authentication happens before `WebSocketUpgrade::on_upgrade` so a failed
//! check never completes the HTTP upgrade; `on_upgrade` itself can only
//! close with an application code, which is how §6's 4001/4003 are sent.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::broadcast::{Event, Session};
use crate::engine::Action;
use crate::error::GameError;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct ConnectParams {
    token: String,
}

const CLOSE_AUTH_FAILED: u16 = 4001;
const CLOSE_NOT_A_PARTICIPANT: u16 = 4003;

pub async fn upgrade(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let user_id = match state.identity.verify(&params.token) {
        Ok(id) => id,
        Err(_) => {
            return ws.on_upgrade(|socket| close_with(socket, CLOSE_AUTH_FAILED, "authentication failed"));
        }
    };

    let participant = match state.runtime.load_game(&game_id).await {
        Ok(game) => game.is_participant(user_id),
        Err(_) => false,
    };
    if !participant {
        return ws.on_upgrade(move |socket| close_with(socket, CLOSE_NOT_A_PARTICIPANT, "not a participant"));
    }

    ws.on_upgrade(move |socket| handle_session(socket, state, game_id, user_id))
}

async fn close_with(mut socket: WebSocket, code: u16, reason: &'static str) {
    let _ = socket
        .send(Message::Close(Some(axum::extract::ws::CloseFrame {
            code,
            reason: reason.into(),
        })))
        .await;
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
enum ClientMessage {
    Ping,
    Action(Action),
}

async fn handle_session(socket: WebSocket, state: Arc<AppState>, game_id: String, user_id: i64) {
    let (mut sink, mut stream) = socket.split();
    let session_id = uuid::Uuid::new_v4().to_string();
    let (session, mut events) = Session::new(session_id.clone(), game_id.clone(), user_id);

    state.runtime.fabric().register(session).await;

    let send_loop = async {
        while let Some(event) = events.recv().await {
            let Ok(text) = serde_json::to_string(&event) else { continue };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    };

    let recv_loop = async {
        while let Some(Ok(msg)) = stream.next().await {
            let Message::Text(text) = msg else { continue };
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Ping) => {
                    state.runtime.fabric().send(&game_id, user_id, Event::Pong).await;
                }
                Ok(ClientMessage::Action(action)) => {
                    let outcome = state
                        .runtime
                        .submit_action(&game_id, user_id, action, Some(state.action_deadline))
                        .await;
                    if let Err(err) = outcome {
                        report_error(&state, &game_id, user_id, err).await;
                    }
                }
                Err(_) => {
                    report_error(&state, &game_id, user_id, GameError::Malformed("unparseable message".into())).await;
                }
            }
        }
    };

    tokio::select! {
        _ = send_loop => {}
        _ = recv_loop => {}
    }

    state.runtime.fabric().deregister(&game_id, &session_id).await;
}

async fn report_error(state: &Arc<AppState>, game_id: &str, user_id: i64, err: GameError) {
    state.runtime.fabric().send(game_id, user_id, Event::Error { message: err.to_string() }).await;
}
