//! `end_turn`: production, turn advancement, round wrap and finalization.

use crate::blueprints;
use crate::error::{GameError, Result};
use crate::game::{Game, GameStatus, ScoreBreakdown};

/// Resources gained by `actor_id` this turn from their placed workers.
fn production_for(game: &Game, actor_id: i64) -> crate::resources::Resources {
    let mut resources = game
        .player(actor_id)
        .map(|p| p.resources)
        .unwrap_or_else(crate::resources::Resources::initial);

    for cell in &game.board.cells {
        let Some(tile) = cell.tile.as_ref() else { continue };
        let Ok(def) = crate::tiles::get(&tile.tile_id) else { continue };
        let Some(resource) = def.category.produces() else { continue };
        for worker in tile.placed_workers.iter().filter(|w| w.player_user_id == actor_id) {
            resources = resources.add(resource, worker.worker_kind.production_units());
        }
    }
    resources
}

/// `end_turn`: run production for the departing turn holder, then advance
/// the turn pointer (and round, and possibly finalize).
pub fn end_turn(game: &mut Game, actor_id: i64) -> Result<()> {
    if game.current_turn_id != actor_id {
        return Err(GameError::NotYourTurn);
    }

    let produced = production_for(game, actor_id);
    if let Some(player) = game.player_mut(actor_id) {
        player.resources = produced;
    }

    advance_turn(game);

    if game.current_round > game.total_rounds || game.available_tiles.is_empty() {
        finalize(game);
    }

    Ok(())
}

fn advance_turn(game: &mut Game) {
    let i = game
        .turn_order
        .iter()
        .position(|&id| id == game.current_turn_id)
        .unwrap_or(0);
    let next = (i + 1) % game.turn_order.len();
    game.current_turn_id = game.turn_order[next];
    if next == 0 {
        game.current_round += 1;
    }
}

/// Fixes every player's final score and moves the game to `finished`.
/// Workers are deliberately left on the board — only a rules variant that
/// recalls between rounds would call `WorkerPool::recall_all` here.
fn finalize(game: &mut Game) {
    let board = game.board.clone();
    let mut breakdown = Vec::with_capacity(game.players.len());

    for player in &game.players {
        let canonical_id = player.canonical_id();
        let base_score = player.score;

        let blueprint_bonus: u32 = player
            .selected_blueprints
            .iter()
            .filter_map(|id| blueprints::get(id))
            .map(|card| blueprints::evaluate(card, &board, canonical_id, &player.workers, &player.resources))
            .sum();

        let worker_score = board
            .cells
            .iter()
            .flat_map(|c| c.tile.iter())
            .flat_map(|t| t.placed_workers.iter())
            .filter(|w| w.player_user_id == canonical_id)
            .count() as u32;

        let resource_penalty = player.resources.penalty_score();

        let total = base_score + blueprint_bonus as i64 + worker_score as i64 - resource_penalty as i64;

        breakdown.push(ScoreBreakdown {
            canonical_id,
            base_score,
            blueprint_bonus,
            worker_score,
            resource_penalty,
            total,
        });
    }

    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(b.base_score.cmp(&a.base_score))
            .then_with(|| {
                let order_of = |id: i64| {
                    game.players
                        .iter()
                        .find(|p| p.canonical_id() == id)
                        .map(|p| p.turn_order)
                        .unwrap_or(u32::MAX)
                };
                order_of(a.canonical_id).cmp(&order_of(b.canonical_id))
            })
    });

    game.status = GameStatus::Finished;
    game.score_breakdown = Some(breakdown);
}

/// The canonical id of the highest-ranked player once the game is finished.
pub fn winner_id(game: &Game) -> Option<i64> {
    game.score_breakdown.as_ref()?.first().map(|b| b.canonical_id)
}
