//! Handlers for the three gameplay actions that are not `end_turn`.

use crate::board::PlacedTile;
use crate::engine::actions::Position;
use crate::error::{GameError, Result};
use crate::game::Game;
use crate::tiles;
use crate::workers::{self, WorkerKind};

/// `select_blueprint`: not turn-gated, legal for any participant who still
/// holds the dealt card.
pub fn select_blueprint(game: &mut Game, actor_id: i64, blueprint_id: &str) -> Result<()> {
    let player = game
        .player_mut(actor_id)
        .ok_or(GameError::NotAParticipant)?;

    let idx = player
        .dealt_blueprints
        .iter()
        .position(|id| id == blueprint_id)
        .ok_or_else(|| {
            GameError::PreconditionFailed(format!("blueprint {blueprint_id} was not dealt to this player"))
        })?;

    let id = player.dealt_blueprints.remove(idx);
    player.selected_blueprints.push(id);
    Ok(())
}

/// `place_tile`: returns the placement score actually earned.
pub fn place_tile(game: &mut Game, actor_id: i64, tile_id: &str, pos: Position) -> Result<i64> {
    if game.current_turn_id != actor_id {
        return Err(GameError::NotYourTurn);
    }
    if !game.visible_tiles().iter().any(|id| id == tile_id) {
        return Err(GameError::PreconditionFailed(format!(
            "tile {tile_id} is not among the top-3 available tiles"
        )));
    }

    let def = tiles::get(tile_id)?;

    if !crate::board::Board::in_bounds(pos.row as i64, pos.col as i64) {
        return Err(GameError::PreconditionFailed("position out of bounds".into()));
    }

    {
        let cell = game.board.cell(pos.row, pos.col);
        if cell.terrain == crate::board::Terrain::Mountain {
            return Err(GameError::PreconditionFailed("mountain cells cannot hold a tile".into()));
        }
        if cell.tile.is_some() {
            return Err(GameError::PreconditionFailed("target cell is already occupied".into()));
        }
    }

    let player = game.player_mut(actor_id).ok_or(GameError::NotAParticipant)?;
    if !player.resources.can_afford(&def.cost) {
        return Err(GameError::PreconditionFailed("insufficient resources".into()));
    }
    player.resources = player.resources.pay_cost(&def.cost)?;

    let score = tiles::calculate_placement_score(&game.board, pos.row, pos.col, tile_id)?;

    let cell = game.board.cell_mut(pos.row, pos.col);
    cell.tile = Some(PlacedTile {
        tile_id: tile_id.to_string(),
        owner_id: actor_id,
        placed_workers: Vec::new(),
        fengshui_active: score.fengshui_active,
    });

    let player = game.player_mut(actor_id).ok_or(GameError::NotAParticipant)?;
    player.placed_tile_count += 1;
    player.score += score.total();

    if let Some(idx) = game.available_tiles.iter().position(|id| id == tile_id) {
        game.available_tiles.remove(idx);
    }

    Ok(score.total())
}

/// `place_worker`.
pub fn place_worker(
    game: &mut Game,
    actor_id: i64,
    kind: WorkerKind,
    pos: Position,
    slot_index: u32,
) -> Result<()> {
    if game.current_turn_id != actor_id {
        return Err(GameError::NotYourTurn);
    }
    if !crate::board::Board::in_bounds(pos.row as i64, pos.col as i64) {
        return Err(GameError::PreconditionFailed("position out of bounds".into()));
    }

    let apprentice_slots = {
        let cell = game.board.cell(pos.row, pos.col);
        if cell.terrain == crate::board::Terrain::Mountain {
            return Err(GameError::PreconditionFailed("mountain cells hold no tile".into()));
        }
        let Some(placed) = cell.tile.as_ref() else {
            return Err(GameError::PreconditionFailed("target cell has no tile".into()));
        };
        tiles::get(&placed.tile_id)?.worker_slots
    };

    {
        let cell = game.board.cell(pos.row, pos.col);
        let placed = cell.tile.as_ref().expect("checked above");
        let existing: Vec<(WorkerKind, u32)> = placed
            .placed_workers
            .iter()
            .map(|w| (w.worker_kind, w.slot_index))
            .collect();
        if !workers::can_place_on_tile(&existing, kind, slot_index, apprentice_slots) {
            return Err(GameError::PreconditionFailed("slot is occupied or out of range".into()));
        }
    }

    let player = game.player_mut(actor_id).ok_or(GameError::NotAParticipant)?;
    if !player.workers.can_place(kind) {
        return Err(GameError::PreconditionFailed(format!("no {kind:?} worker available")));
    }
    player.workers = player.workers.place(kind)?;

    let cell = game.board.cell_mut(pos.row, pos.col);
    let placed = cell.tile.as_mut().expect("checked above");
    placed.placed_workers.push(crate::board::PlacedWorker {
        player_user_id: actor_id,
        worker_kind: kind,
        slot_index,
    });

    Ok(())
}
