//! The tagged action envelope submitted to the engine, and the read-only
//! templates `valid_actions_for` hands back to callers and the AI.

use serde::{Deserialize, Serialize};

use crate::workers::WorkerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action_kind", content = "payload", rename_all = "snake_case")]
pub enum Action {
    SelectBlueprint { blueprint_id: String },
    PlaceTile { tile_id: String, position: Position },
    PlaceWorker {
        worker_kind: WorkerKind,
        target_position: Position,
        slot_index: u32,
    },
    EndTurn,
}

/// A legal move as of the moment it was computed; informational only, not
/// itself a commitment — the same race a human player faces against other
/// observers applies to the AI reading these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionTemplate {
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub placement_score: Option<i64>,
    pub production: Option<crate::resources::Resources>,
    pub turn_changed: bool,
    pub round_changed: bool,
    pub finished: bool,
}
