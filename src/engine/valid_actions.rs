//! `ValidActionsFor`: a read-only enumeration of legal moves.
//!
//! Treated as turn-gated: only the current turn holder gets a non-empty
//! answer. `select_blueprint` itself is not turn-gated for submission, but
//! this query exists to drive the "what can I do right now" UI for the
//! active player, not a general hand inspector for everyone at the table.

use crate::board::{Terrain, BOARD_SIZE};
use crate::engine::actions::{Action, ActionTemplate, Position};
use crate::game::Game;
use crate::tiles;
use crate::workers::{self, WorkerKind};

pub fn valid_actions_for(game: &Game, actor_id: i64) -> Vec<ActionTemplate> {
    let mut out = Vec::new();

    if let Some(player) = game.player(actor_id) {
        for id in &player.dealt_blueprints {
            out.push(ActionTemplate {
                action: Action::SelectBlueprint { blueprint_id: id.clone() },
            });
        }
    }

    if game.current_turn_id != actor_id {
        return out;
    }
    let Some(player) = game.player(actor_id) else { return out };

    out.push(ActionTemplate { action: Action::EndTurn });

    for tile_id in game.visible_tiles() {
        let Ok(def) = tiles::get(tile_id) else { continue };
        if !player.resources.can_afford(&def.cost) {
            continue;
        }
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = game.board.cell(row, col);
                if cell.terrain == Terrain::Mountain || cell.tile.is_some() {
                    continue;
                }
                out.push(ActionTemplate {
                    action: Action::PlaceTile {
                        tile_id: tile_id.clone(),
                        position: Position { row, col },
                    },
                });
            }
        }
    }

    for kind in [WorkerKind::Apprentice, WorkerKind::Official] {
        if !player.workers.can_place(kind) {
            continue;
        }
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
                        out.push(ActionTemplate {
                            action: Action::PlaceWorker {
                                worker_kind: kind,
                                target_position: Position { row, col },
                                slot_index,
                            },
                        });
                    }
                }
            }
        }
    }

    out
}
