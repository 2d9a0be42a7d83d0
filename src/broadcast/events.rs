//! The 14 event kinds observers may receive, plus the 2 control messages
//! they may send (`ping`, `action`) — see §4.5 and §6.

use serde::Serialize;

use crate::engine::{Action, ActionOutcome, ActionTemplate};
use crate::game::Game;

/// One event delivered to an observer session. `{type, data}` on the wire:
/// the `#[serde(tag = "type", content = "data")]` envelope matches §6
/// verbatim.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Event {
    GameStateUpdate { game_state: serde_json::Value },
    ValidActionsUpdate { actions: Vec<ActionTemplate> },
    YourTurn { current_round: u32 },
    TurnChanged { previous_user_id: i64, current_user_id: i64 },
    PlayerAction { actor_id: i64, action: Action },
    ActionResult { outcome: ActionOutcome },
    PlayerJoined { user_id: i64 },
    PlayerLeft { user_id: i64 },
    PlayerReconnected { user_id: i64 },
    GameStarted { game_state: serde_json::Value },
    GameEnded { winner_id: Option<i64>, score_breakdown: serde_json::Value },
    RoundChanged { previous_round: u32, current_round: u32 },
    Error { message: String },
    Ping,
    Pong,
}

impl Event {
    pub fn game_state_update(game: &Game) -> Self {
        Event::GameStateUpdate {
            game_state: serde_json::to_value(game.external_view()).unwrap_or(serde_json::Value::Null),
        }
    }

    pub fn game_started(game: &Game) -> Self {
        Event::GameStarted {
            game_state: serde_json::to_value(game.external_view()).unwrap_or(serde_json::Value::Null),
        }
    }

    pub fn game_ended(game: &Game) -> Self {
        Event::GameEnded {
            winner_id: crate::engine::winner_id(game),
            score_breakdown: serde_json::to_value(&game.score_breakdown).unwrap_or(serde_json::Value::Null),
        }
    }
}
