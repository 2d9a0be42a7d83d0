//! `decide`: given a read-only view of a game and the acting AI player, pick
//! exactly one legal action. Never returns an action the engine would reject
//! — the caller is free to `submit` it without a second validation pass.

use std::collections::BTreeMap;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::ai::AiDifficulty;
use crate::blueprints::{self, BlueprintCondition};
use crate::board::{Terrain, BOARD_SIZE};
use crate::engine::{valid_actions_for, Action, Position};
use crate::game::Game;
use crate::resources::{Cost, ResourceKind, Resources};
use crate::tiles::{self, TileCategory};
use crate::workers::{self, WorkerKind};

/// Entry point: dispatches to the difficulty-specific strategy, falling back
/// to `end_turn` whenever a strategy has nothing to offer.
pub fn decide(game: &Game, actor_id: i64, difficulty: AiDifficulty, rng: &mut impl Rng) -> Action {
    match difficulty {
        AiDifficulty::Easy => decide_easy(game, actor_id, rng),
        AiDifficulty::Medium => decide_medium(game, actor_id, rng),
        AiDifficulty::Hard => decide_hard(game, actor_id),
    }
}

fn decide_easy(game: &Game, actor_id: i64, rng: &mut impl Rng) -> Action {
    let templates = valid_actions_for(game, actor_id);
    match templates.choose(rng) {
        Some(t) => t.action.clone(),
        None => Action::EndTurn,
    }
}

fn valid_tile_positions(game: &Game) -> Vec<Position> {
    let mut out = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let cell = game.board.cell(row, col);
            if cell.terrain != Terrain::Mountain && cell.tile.is_none() {
                out.push(Position { row, col });
            }
        }
    }
    out
}

/// Every legal `(position, slot_index)` pair for placing a worker of `kind`.
fn worker_slot_pairs(game: &Game, kind: WorkerKind) -> Vec<(Position, u32)> {
    let mut out = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let cell = game.board.cell(row, col);
            let Some(placed) = cell.tile.as_ref() else { continue };
            let Ok(def) = tiles::get(&placed.tile_id) else { continue };
            let existing: Vec<(WorkerKind, u32)> = placed
                .placed_workers
                .iter()
                .map(|w| (w.worker_kind, w.slot_index))
                .collect();
            let capacity = workers::slot_capacity(kind, def.worker_slots);
            for slot_index in 0..capacity {
                if workers::can_place_on_tile(&existing, kind, slot_index, def.worker_slots) {
                    out.push((Position { row, col }, slot_index));
                }
            }
        }
    }
    out
}

fn cost_total(cost: &Cost) -> u32 {
    cost.values().sum()
}

fn decide_medium(game: &Game, actor_id: i64, rng: &mut impl Rng) -> Action {
    let Some(player) = game.player(actor_id) else { return Action::EndTurn };

    if player.selected_blueprints.is_empty() {
        if let Some(best) = player
            .dealt_blueprints
            .iter()
            .filter_map(|id| blueprints::get(id).map(|c| (id, c.bonus_points)))
            .max_by_key(|(_, points)| *points)
        {
            return Action::SelectBlueprint { blueprint_id: best.0.clone() };
        }
    }

    let affordable: Vec<&str> = game
        .visible_tiles()
        .iter()
        .filter(|id| tiles::get(id).is_ok_and(|def| player.resources.can_afford(&def.cost)))
        .map(|s| s.as_str())
        .collect();
    let positions = valid_tile_positions(game);

    if !affordable.is_empty() && !positions.is_empty() {
        let mut best: Option<(&str, Position, i64)> = None;
        for tile_id in &affordable {
            for pos in &positions {
                let Ok(score) = tiles::calculate_placement_score(&game.board, pos.row, pos.col, tile_id) else {
                    continue;
                };
                let total = score.total();
                if total > best.map(|b| b.2).unwrap_or(i64::MIN) {
                    best = Some((tile_id, *pos, total));
                }
            }
        }
        if let Some((tile_id, pos, _)) = best {
            return Action::PlaceTile { tile_id: tile_id.to_string(), position: pos };
        }
    }

    if let Some(action) = decide_worker_random(game, player.workers.officials.available > 0, rng) {
        return action;
    }

    Action::EndTurn
}

fn decide_worker_random(
    game: &Game,
    prefer_official: bool,
    rng: &mut impl Rng,
) -> Option<Action> {
    let primary = if prefer_official { WorkerKind::Official } else { WorkerKind::Apprentice };
    let secondary = if prefer_official { WorkerKind::Apprentice } else { WorkerKind::Official };

    let mut pairs = worker_slot_pairs(game, primary);
    let mut kind = primary;
    if pairs.is_empty() {
        pairs = worker_slot_pairs(game, secondary);
        kind = secondary;
    }
    let (pos, slot_index) = pairs.choose(rng).copied()?;
    Some(Action::PlaceWorker { worker_kind: kind, target_position: pos, slot_index })
}

fn achievability(condition: &BlueprintCondition, category_counts: &BTreeMap<TileCategory, u32>, tile_count: u32) -> f64 {
    match condition {
        BlueprintCondition::CategoryCount { category, min_count } => {
            let current = category_counts.get(category).copied().unwrap_or(0);
            (current as f64 / (*min_count).max(1) as f64).min(1.0)
        }
        BlueprintCondition::DiverseCategories { min_types } => {
            (category_counts.len() as f64 / (*min_types).max(1) as f64).min(1.0)
        }
        BlueprintCondition::TileCount { min_count } => {
            (tile_count as f64 / (*min_count).max(1) as f64).min(1.0)
        }
        _ => 0.5,
    }
}

fn decide_hard(game: &Game, actor_id: i64) -> Action {
    let Some(player) = game.player(actor_id) else { return Action::EndTurn };

    if player.selected_blueprints.is_empty() && !player.dealt_blueprints.is_empty() {
        let mut category_counts: BTreeMap<TileCategory, u32> = BTreeMap::new();
        let mut tile_count = 0u32;
        for cell in &game.board.cells {
            let Some(placed) = cell.tile.as_ref() else { continue };
            if placed.owner_id != actor_id {
                continue;
            }
            tile_count += 1;
            if let Ok(def) = tiles::get(&placed.tile_id) {
                *category_counts.entry(def.category).or_insert(0) += 1;
            }
        }

        let mut best: Option<(&str, f64)> = None;
        for id in &player.dealt_blueprints {
            let Some(card) = blueprints::get(id) else { continue };
            let score = achievability(&card.condition, &category_counts, tile_count) * card.bonus_points as f64;
            if score > best.map(|b| b.1).unwrap_or(-1.0) {
                best = Some((id, score));
            }
        }
        if let Some((id, _)) = best {
            return Action::SelectBlueprint { blueprint_id: id.to_string() };
        }
    }

    let affordable: Vec<&str> = game
        .visible_tiles()
        .iter()
        .filter(|id| tiles::get(id).is_ok_and(|def| player.resources.can_afford(&def.cost)))
        .map(|s| s.as_str())
        .collect();
    let positions = valid_tile_positions(game);

    if !affordable.is_empty() && !positions.is_empty() {
        let mut best: Option<(&str, Position, f64)> = None;
        for tile_id in &affordable {
            let Ok(def) = tiles::get(tile_id) else { continue };
            for pos in &positions {
                let Ok(score) = tiles::calculate_placement_score(&game.board, pos.row, pos.col, tile_id) else {
                    continue;
                };
                let total = score.total();
                let total_cost = cost_total(&def.cost).max(1);
                let efficiency = total as f64 / total_cost as f64;
                let remaining: i64 = ResourceKind::ALL
                    .iter()
                    .map(|&kind| {
                        let have = player.resources.get(kind) as i64;
                        let pay = *def.cost.get(&kind).unwrap_or(&0) as i64;
                        have - pay
                    })
                    .sum();
                let weighted = total as f64 * 2.0 + efficiency + 0.1 * remaining as f64;
                if weighted > best.map(|b| b.2).unwrap_or(f64::NEG_INFINITY) {
                    best = Some((tile_id, *pos, weighted));
                }
            }
        }
        if let Some((tile_id, pos, _)) = best {
            return Action::PlaceTile { tile_id: tile_id.to_string(), position: pos };
        }
    }

    if let Some(action) = decide_worker_strategic(game, player, actor_id) {
        return action;
    }

    Action::EndTurn
}

fn resource_priority(resources: &Resources, visible_tiles: &[String]) -> BTreeMap<ResourceKind, i64> {
    let mut priority = BTreeMap::new();
    priority.insert(ResourceKind::Wood, 5i64.saturating_sub(resources.get(ResourceKind::Wood) as i64).max(0));
    priority.insert(ResourceKind::Stone, 5i64.saturating_sub(resources.get(ResourceKind::Stone) as i64).max(0));
    priority.insert(ResourceKind::Tile, 4i64.saturating_sub(resources.get(ResourceKind::Tile) as i64).max(0));
    priority.insert(ResourceKind::Ink, 3i64.saturating_sub(resources.get(ResourceKind::Ink) as i64).max(0));

    for tile_id in visible_tiles {
        let Ok(def) = tiles::get(tile_id) else { continue };
        for &kind in &ResourceKind::ALL {
            let cost = *def.cost.get(&kind).unwrap_or(&0);
            if cost > resources.get(kind) {
                *priority.entry(kind).or_insert(0) += 2;
            }
        }
    }
    priority
}

fn decide_worker_strategic(
    game: &Game,
    player: &crate::game::PlayerState,
    actor_id: i64,
) -> Option<Action> {
    let primary = if player.workers.officials.available > 0 {
        WorkerKind::Official
    } else if player.workers.apprentices.available > 0 {
        WorkerKind::Apprentice
    } else {
        return None;
    };

    let mut pairs = worker_slot_pairs(game, primary);
    let mut kind = primary;
    if pairs.is_empty() {
        let secondary = if primary == WorkerKind::Official { WorkerKind::Apprentice } else { WorkerKind::Official };
        if player.workers.can_place(secondary) {
            pairs = worker_slot_pairs(game, secondary);
            kind = secondary;
        }
    }
    if pairs.is_empty() {
        return None;
    }

    let priority = resource_priority(&player.resources, game.visible_tiles());

    let mut best: Option<((Position, u32), i64)> = None;
    for &(pos, slot_index) in &pairs {
        let cell = game.board.cell(pos.row, pos.col);
        let Some(placed) = cell.tile.as_ref() else { continue };
        let Ok(def) = tiles::get(&placed.tile_id) else { continue };
        let Some(produced) = def.category.produces() else { continue };
        let mut score = priority.get(&produced).copied().unwrap_or(0);
        if placed.owner_id == actor_id {
            score += 10;
        }
        if score > best.map(|b| b.1).unwrap_or(-1) {
            best = Some(((pos, slot_index), score));
        }
    }

    let ((pos, slot_index), _) = best.or_else(|| pairs.first().map(|&p| (p, 0)))?;
    Some(Action::PlaceWorker { worker_kind: kind, target_position: pos, slot_index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{self, submit, Participant, RoomSpec};
    use crate::actor::Actor;

    fn two_player_room() -> RoomSpec {
        RoomSpec {
            game_id: "g".to_string(),
            room_id: None,
            participants: vec![
                Participant { actor: Actor::Human { user_id: 1 }, username: "a".into(), color: "red".into(), is_host: true },
                Participant { actor: Actor::Ai { ai_id: -1, difficulty: AiDifficulty::Easy }, username: "ai".into(), color: "blue".into(), is_host: false },
            ],
        }
    }

    #[test]
    fn easy_ai_never_produces_an_action_the_engine_rejects() {
        let mut rng = rand::rng();
        let game = engine::create(two_player_room(), &mut rng).unwrap();
        let (after_human, _) = submit(&game, 1, Action::EndTurn).unwrap();

        for _ in 0..20 {
            let action = decide(&after_human, -1, AiDifficulty::Easy, &mut rng);
            let result = submit(&after_human, -1, action);
            assert!(result.is_ok());
        }
    }

    #[test]
    fn medium_ai_still_builds_a_tile_that_scores_exactly_zero() {
        let mut rng = rand::rng();
        let mut game = engine::create(two_player_room(), &mut rng).unwrap();
        // residential_5 scores 0 everywhere on an empty board (no base points,
        // no fengshui, and its only adjacency bonus is to a category not yet
        // placed) — the AI should still build it rather than pass.
        if let Some(p) = game.player_mut(-1) {
            p.selected_blueprints.push(p.dealt_blueprints.pop().unwrap());
            p.dealt_blueprints.clear();
        }
        game.available_tiles = vec!["residential_5".to_string()];
        game.current_turn_id = -1;

        let action = decide(&game, -1, AiDifficulty::Medium, &mut rng);
        assert!(matches!(action, Action::PlaceTile { ref tile_id, .. } if tile_id == "residential_5"));
    }

    #[test]
    fn medium_ai_selects_a_blueprint_before_building() {
        let mut rng = rand::rng();
        let game = engine::create(two_player_room(), &mut rng).unwrap();
        let (after_human, _) = submit(&game, 1, Action::EndTurn).unwrap();
        let action = decide(&after_human, -1, AiDifficulty::Medium, &mut rng);
        assert!(matches!(action, Action::SelectBlueprint { .. }));
    }

    #[test]
    fn hard_ai_eventually_ends_the_turn_when_nothing_else_is_legal() {
        let mut rng = rand::rng();
        let mut game = engine::create(two_player_room(), &mut rng).unwrap();
        // exhaust the AI's resources and blueprint hand so only end_turn remains legal.
        if let Some(p) = game.player_mut(-1) {
            p.selected_blueprints.push(p.dealt_blueprints.pop().unwrap_or_default());
            p.dealt_blueprints.clear();
            p.resources = Resources::initial().consume(ResourceKind::Wood, 2).unwrap().consume(ResourceKind::Stone, 2).unwrap();
            p.workers.apprentices.available = 0;
            p.workers.officials.available = 0;
        }
        game.current_turn_id = -1;
        let action = decide(&game, -1, AiDifficulty::Hard, &mut rand::rng());
        assert!(matches!(action, Action::EndTurn));
    }
}
