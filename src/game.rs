//! The aggregate root: a single game's full, typed state.
//!
//! Replaces the dynamic JSON-blob board/players/tiles the original service
//! carried on the row with explicit value objects; (de)serialization happens
//! at the persistence boundary, not throughout the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::ai::AiDifficulty;
use crate::board::Board;
use crate::resources::Resources;
use crate::workers::WorkerPool;

pub const TOTAL_ROUNDS: u32 = 4;
pub const BLUEPRINTS_PER_PLAYER: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub actor: Actor,
    pub username: String,
    pub color: String,
    pub turn_order: u32,
    pub is_host: bool,
    pub resources: Resources,
    pub workers: WorkerPool,
    pub dealt_blueprints: Vec<String>,
    pub selected_blueprints: Vec<String>,
    pub score: i64,
    pub placed_tile_count: u32,
}

impl PlayerState {
    pub fn new(actor: Actor, username: String, color: String, turn_order: u32, is_host: bool) -> Self {
        PlayerState {
            actor,
            username,
            color,
            turn_order,
            is_host,
            resources: Resources::initial(),
            workers: WorkerPool::initial(),
            dealt_blueprints: Vec::new(),
            selected_blueprints: Vec::new(),
            score: 0,
            placed_tile_count: 0,
        }
    }

    pub fn canonical_id(&self) -> i64 {
        self.actor.canonical_id()
    }

    pub fn ai_difficulty(&self) -> Option<AiDifficulty> {
        self.actor.difficulty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SelectBlueprint,
    PlaceTile,
    PlaceWorker,
    EndTurn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: String,
    pub game_id: String,
    pub actor_id: i64,
    pub action_kind: ActionKind,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub canonical_id: i64,
    pub base_score: i64,
    pub blueprint_bonus: u32,
    pub worker_score: u32,
    pub resource_penalty: u32,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub room_id: Option<String>,
    pub status: GameStatus,
    pub current_round: u32,
    pub total_rounds: u32,
    pub current_turn_id: i64,
    pub turn_order: Vec<i64>,
    pub board: Board,
    pub players: Vec<PlayerState>,
    pub available_tiles: Vec<String>,
    pub discarded_tiles: Vec<String>,
    pub last_action: Option<ActionRecord>,
    pub score_breakdown: Option<Vec<ScoreBreakdown>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn player(&self, canonical_id: i64) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.canonical_id() == canonical_id)
    }

    pub fn player_mut(&mut self, canonical_id: i64) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.canonical_id() == canonical_id)
    }

    pub fn current_player(&self) -> Option<&PlayerState> {
        self.player(self.current_turn_id)
    }

    pub fn is_participant(&self, canonical_id: i64) -> bool {
        self.turn_order.contains(&canonical_id)
    }

    /// The first 3 entries of `available_tiles`: the only tiles legal to buy.
    pub fn visible_tiles(&self) -> &[String] {
        let n = self.available_tiles.len().min(3);
        &self.available_tiles[..n]
    }

    /// The externally-serialized snapshot: `discarded_tiles` and the hidden
    /// remainder of `available_tiles` are never exposed past this boundary.
    pub fn external_view(&self) -> GameView<'_> {
        GameView {
            id: &self.id,
            status: self.status,
            current_round: self.current_round,
            total_rounds: self.total_rounds,
            current_turn_user_id: self.current_turn_id,
            turn_order: &self.turn_order,
            board: &self.board,
            players: &self.players,
            available_tiles: self.visible_tiles(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The exact field set §6 promises external callers: no `discarded_tiles`,
/// no hidden supply beyond the top 3 `available_tiles`.
#[derive(Debug, Serialize)]
pub struct GameView<'a> {
    pub id: &'a str,
    pub status: GameStatus,
    pub current_round: u32,
    pub total_rounds: u32,
    pub current_turn_user_id: i64,
    pub turn_order: &'a [i64],
    pub board: &'a crate::board::Board,
    pub players: &'a [PlayerState],
    pub available_tiles: &'a [String],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
