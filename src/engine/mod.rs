//! The game engine: the sole mutator of [`Game`] state.
//!
//! `create` and `submit` are pure functions of their inputs (plus an
//! injected RNG for shuffling) — the same shape as the teacher's
//! `apply_session_action(state, action) -> state`, generalized from a single
//! mutable struct to the full Hanyang aggregate.

pub mod actions;
mod handlers;
mod turn;
mod valid_actions;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::actor::Actor;
use crate::blueprints;
use crate::board::Board;
use crate::error::{GameError, Result};
use crate::game::{ActionKind, ActionRecord, Game, GameStatus, PlayerState, BLUEPRINTS_PER_PLAYER, TOTAL_ROUNDS};
use crate::tiles::catalog as tile_catalog;

pub use actions::{Action, ActionOutcome, ActionTemplate, Position};
pub use turn::winner_id;
pub use valid_actions::valid_actions_for;

pub struct Participant {
    pub actor: Actor,
    pub username: String,
    pub color: String,
    pub is_host: bool,
}

pub struct RoomSpec {
    pub game_id: String,
    pub room_id: Option<String>,
    pub participants: Vec<Participant>,
}

/// Builds the initial state for a freshly assembled room: board, shuffled
/// tile pool, dealt blueprints, starting resources and workers for every
/// player, turn order fixed to the order participants were given in.
pub fn create(room: RoomSpec, rng: &mut impl Rng) -> Result<Game> {
    if !(2..=4).contains(&room.participants.len()) {
        return Err(GameError::PreconditionFailed(
            "a game requires between two and four participants".into(),
        ));
    }

    let mut tile_ids: Vec<String> = tile_catalog::ALL.iter().map(|t| t.tile_id.to_string()).collect();
    tile_ids.shuffle(rng);

    let hands = blueprints::deal_blueprints(room.participants.len(), BLUEPRINTS_PER_PLAYER, rng);

    let players: Vec<PlayerState> = room
        .participants
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut state = PlayerState::new(p.actor, p.username.clone(), p.color.clone(), i as u32, p.is_host);
            state.dealt_blueprints = hands
                .get(i)
                .into_iter()
                .flatten()
                .map(|id| id.to_string())
                .collect();
            state
        })
        .collect();

    let turn_order: Vec<i64> = room.participants.iter().map(|p| p.actor.canonical_id()).collect();
    let now = Utc::now();

    Ok(Game {
        id: room.game_id,
        room_id: room.room_id,
        status: GameStatus::InProgress,
        current_round: 1,
        total_rounds: TOTAL_ROUNDS,
        current_turn_id: turn_order[0],
        turn_order,
        board: Board::new(),
        players,
        available_tiles: tile_ids,
        discarded_tiles: Vec::new(),
        last_action: None,
        score_breakdown: None,
        created_at: now,
        updated_at: now,
    })
}

/// Validates, applies, records and advances one action. Returns the new
/// game state and a summary of what changed; never mutates `game` in place.
pub fn submit(game: &Game, actor_id: i64, action: Action) -> Result<(Game, ActionOutcome)> {
    if game.status != GameStatus::InProgress {
        return Err(GameError::IllegalState("game is not in progress".into()));
    }
    if !game.is_participant(actor_id) {
        return Err(GameError::NotAParticipant);
    }

    let mut next = game.clone();
    let mut outcome = ActionOutcome {
        placement_score: None,
        production: None,
        turn_changed: false,
        round_changed: false,
        finished: false,
    };

    let kind = match &action {
        Action::SelectBlueprint { blueprint_id } => {
            handlers::select_blueprint(&mut next, actor_id, blueprint_id)?;
            ActionKind::SelectBlueprint
        }
        Action::PlaceTile { tile_id, position } => {
            let score = handlers::place_tile(&mut next, actor_id, tile_id, *position)?;
            outcome.placement_score = Some(score);
            ActionKind::PlaceTile
        }
        Action::PlaceWorker { worker_kind, target_position, slot_index } => {
            handlers::place_worker(&mut next, actor_id, *worker_kind, *target_position, *slot_index)?;
            ActionKind::PlaceWorker
        }
        Action::EndTurn => {
            let round_before = next.current_round;
            let status_before = next.status;
            turn::end_turn(&mut next, actor_id)?;
            outcome.production = next.player(actor_id).map(|p| p.resources);
            outcome.turn_changed = next.current_turn_id != game.current_turn_id;
            outcome.round_changed = next.current_round != round_before;
            outcome.finished = status_before != GameStatus::Finished && next.status == GameStatus::Finished;
            ActionKind::EndTurn
        }
    };

    next.updated_at = Utc::now();
    next.last_action = Some(ActionRecord {
        id: uuid::Uuid::new_v4().to_string(),
        game_id: next.id.clone(),
        actor_id,
        action_kind: kind,
        payload: serde_json::to_value(&action).unwrap_or(serde_json::Value::Null),
        timestamp: next.updated_at,
    });

    Ok((next, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiDifficulty;

    fn two_player_room() -> RoomSpec {
        RoomSpec {
            game_id: "game-1".to_string(),
            room_id: None,
            participants: vec![
                Participant {
                    actor: Actor::Human { user_id: 1 },
                    username: "alice".to_string(),
                    color: "red".to_string(),
                    is_host: true,
                },
                Participant {
                    actor: Actor::Human { user_id: 2 },
                    username: "bob".to_string(),
                    color: "blue".to_string(),
                    is_host: false,
                },
            ],
        }
    }

    #[test]
    fn create_deals_three_distinct_blueprints_per_player() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        assert_eq!(game.players.len(), 2);
        for player in &game.players {
            assert_eq!(player.dealt_blueprints.len(), 3);
        }
        assert_eq!(game.available_tiles.len(), 36);
        assert_eq!(game.current_turn_id, 1);
    }

    #[test]
    fn create_rejects_more_than_four_participants() {
        let mut room = two_player_room();
        for i in 3..=5 {
            room.participants.push(Participant {
                actor: Actor::Human { user_id: i },
                username: format!("p{i}"),
                color: format!("color{i}"),
                is_host: false,
            });
        }
        let mut rng = rand::rng();
        let err = create(room, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::PreconditionFailed(_)));
    }

    #[test]
    fn placing_an_affordable_tile_pays_cost_and_scores() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        // residential_5 costs wood=1 only and sits well within starting resources.
        let (next, outcome) = submit(
            &game,
            1,
            Action::PlaceTile { tile_id: "residential_5".to_string(), position: Position { row: 2, col: 1 } },
        )
        .unwrap();
        assert!(outcome.placement_score.is_some());
        let player = next.player(1).unwrap();
        assert_eq!(player.resources.get(crate::resources::ResourceKind::Wood), 1);
        assert_eq!(player.placed_tile_count, 1);
        assert_eq!(next.current_turn_id, 1, "place_tile does not consume the turn");
    }

    #[test]
    fn placing_on_a_mountain_corner_fails() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let err = submit(
            &game,
            1,
            Action::PlaceTile { tile_id: "residential_5".to_string(), position: Position { row: 0, col: 0 } },
        )
        .unwrap_err();
        assert!(matches!(err, GameError::PreconditionFailed(_)));
    }

    #[test]
    fn placing_a_tile_out_of_bounds_is_rejected_not_a_panic() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let err = submit(
            &game,
            1,
            Action::PlaceTile { tile_id: "residential_5".to_string(), position: Position { row: 5, col: 1 } },
        )
        .unwrap_err();
        assert!(matches!(err, GameError::PreconditionFailed(_)));
    }

    #[test]
    fn placing_a_worker_out_of_bounds_is_rejected_not_a_panic() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let err = submit(
            &game,
            1,
            Action::PlaceWorker {
                worker_kind: crate::workers::WorkerKind::Apprentice,
                target_position: Position { row: 1, col: 9 },
                slot_index: 0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, GameError::PreconditionFailed(_)));
    }

    #[test]
    fn only_the_current_turn_holder_can_place_a_tile() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let err = submit(
            &game,
            2,
            Action::PlaceTile { tile_id: "residential_5".to_string(), position: Position { row: 2, col: 1 } },
        )
        .unwrap_err();
        assert!(matches!(err, GameError::NotYourTurn));
    }

    #[test]
    fn end_turn_hands_off_to_the_next_player_in_order() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let (next, outcome) = submit(&game, 1, Action::EndTurn).unwrap();
        assert_eq!(next.current_turn_id, 2);
        assert!(outcome.turn_changed);
        assert!(!outcome.round_changed);
        assert_eq!(next.current_round, 1);
    }

    #[test]
    fn round_wraps_and_advances_after_the_last_player_ends_turn() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let (after_a, _) = submit(&game, 1, Action::EndTurn).unwrap();
        let (after_b, outcome) = submit(&after_a, 2, Action::EndTurn).unwrap();
        assert_eq!(after_b.current_turn_id, 1);
        assert_eq!(after_b.current_round, 2);
        assert!(outcome.round_changed);
    }

    #[test]
    fn finishing_round_four_finalizes_the_game() {
        let mut rng = rand::rng();
        let mut game = create(two_player_room(), &mut rng).unwrap();
        game.current_round = 4;
        let (after_a, _) = submit(&game, 1, Action::EndTurn).unwrap();
        let (after_b, outcome) = submit(&after_a, 2, Action::EndTurn).unwrap();
        assert!(outcome.finished);
        assert_eq!(after_b.status, GameStatus::Finished);
        assert!(after_b.score_breakdown.is_some());
    }

    #[test]
    fn selecting_a_blueprint_not_in_hand_is_rejected() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let err = submit(
            &game,
            1,
            Action::SelectBlueprint { blueprint_id: "does_not_exist".to_string() },
        )
        .unwrap_err();
        assert!(matches!(err, GameError::PreconditionFailed(_)));
    }

    #[test]
    fn selecting_a_blueprint_is_not_turn_gated() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let bob_card = game.player(2).unwrap().dealt_blueprints[0].clone();
        // it is alice's (user 1) turn, but bob (user 2) may still select.
        let (next, _) = submit(&game, 2, Action::SelectBlueprint { blueprint_id: bob_card.clone() }).unwrap();
        assert_eq!(next.player(2).unwrap().selected_blueprints, vec![bob_card]);
    }

    #[test]
    fn non_participant_actions_are_rejected() {
        let mut rng = rand::rng();
        let game = create(two_player_room(), &mut rng).unwrap();
        let err = submit(&game, 999, Action::EndTurn).unwrap_err();
        assert!(matches!(err, GameError::NotAParticipant));
    }

    #[test]
    fn ai_difficulty_is_carried_through_actor() {
        let room = RoomSpec {
            game_id: "game-2".to_string(),
            room_id: None,
            participants: vec![
                Participant {
                    actor: Actor::Human { user_id: 1 },
                    username: "alice".to_string(),
                    color: "red".to_string(),
                    is_host: true,
                },
                Participant {
                    actor: Actor::Ai { ai_id: -1, difficulty: AiDifficulty::Hard },
                    username: "ai-1".to_string(),
                    color: "blue".to_string(),
                    is_host: false,
                },
            ],
        };
        let mut rng = rand::rng();
        let game = create(room, &mut rng).unwrap();
        assert_eq!(game.players[1].ai_difficulty(), Some(AiDifficulty::Hard));
    }
}
