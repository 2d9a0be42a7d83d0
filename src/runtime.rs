//! Ties the engine, persistence adapter and broadcast fabric into the
//! single pipeline described in §2's data-flow diagram:
//!
//! ```text
//! load -> validate -> mutate -> persist -> broadcast -> ack -> (AI turn)
//! ```
//!
//! and enforces §5's concurrency model: one game is one logical serial
//! actor, guarded by a per-room lock acquired around that whole sequence.
//! Grounded on the teacher's `SessionManager` for the lock-registry shape
//! and on `game_service.py`'s `place_tile`/`end_turn`/auto-play handlers for
//! the ordering of persist-then-broadcast and the AI hand-off.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use tokio::sync::RwLock;

use crate::ai;
use crate::broadcast::{BroadcastFabric, Event, Session};
use crate::engine::{self, Action, ActionOutcome, Participant, RoomSpec};
use crate::error::{GameError, Result};
use crate::game::{Game, GameStatus};
use crate::persistence::GameStore;

/// Upper bound on consecutive AI actions run inside one `submit_action`
/// call, per §5's "AI auto-play carries an upper bound max_turns".
pub const DEFAULT_MAX_AI_TURNS: u32 = 25;

pub struct GameRuntime {
    store: Arc<dyn GameStore>,
    fabric: BroadcastFabric,
    locks: RwLock<HashMap<String, Arc<AsyncMutex<()>>>>,
    max_ai_turns: u32,
}

impl GameRuntime {
    pub fn new(store: Arc<dyn GameStore>, fabric: BroadcastFabric) -> Self {
        Self { store, fabric, locks: RwLock::new(HashMap::new()), max_ai_turns: DEFAULT_MAX_AI_TURNS }
    }

    pub fn with_max_ai_turns(mut self, max_ai_turns: u32) -> Self {
        self.max_ai_turns = max_ai_turns;
        self
    }

    pub fn fabric(&self) -> &BroadcastFabric {
        &self.fabric
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    /// Loads a game off the async executor thread. `rusqlite` is
    /// synchronous, so every `GameStore` call is routed through
    /// `spawn_blocking` rather than run directly inside an `async fn`.
    pub async fn load_game(&self, game_id: &str) -> Result<Game> {
        let store = self.store.clone();
        let game_id = game_id.to_string();
        run_blocking(move || store.load_game(&game_id)).await
    }

    async fn save_game(&self, game: &Game) -> Result<()> {
        let store = self.store.clone();
        let game = game.clone();
        run_blocking(move || store.save_game(&game)).await
    }

    async fn lock_for(&self, game_id: &str) -> Arc<AsyncMutex<()>> {
        if let Some(lock) = self.locks.read().await.get(game_id) {
            return lock.clone();
        }
        let mut locks = self.locks.write().await;
        locks.entry(game_id.to_string()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }

    /// `Create`: builds the initial game, persists it, and broadcasts
    /// `game_started` plus `your_turn` to whoever goes first.
    pub async fn create_game(&self, room: RoomSpec) -> Result<Game> {
        let game_id = room.game_id.clone();
        let lock = self.lock_for(&game_id).await;
        let _guard = lock.lock().await;

        let mut rng = rand::rng();
        let game = engine::create(room, &mut rng)?;
        self.save_game(&game).await?;

        self.fabric.broadcast(&game_id, Event::game_started(&game), None).await;
        self.fabric
            .send(&game_id, game.current_turn_id, Event::YourTurn { current_round: game.current_round })
            .await;
        Ok(game)
    }

    /// `Submit`: validates, applies, persists and broadcasts one human
    /// action, then runs AI auto-play for as long as the turn pointer keeps
    /// landing on an AI participant.
    pub async fn submit_action(
        &self,
        game_id: &str,
        actor_id: i64,
        action: Action,
        deadline: Option<Duration>,
    ) -> Result<(Game, ActionOutcome)> {
        let lock = self.lock_for(game_id).await;
        let _guard = match deadline {
            Some(budget) => tokio::time::timeout(budget, lock.lock()).await.map_err(|_| GameError::TimedOut)?,
            None => lock.lock().await,
        };

        let game = self.load_game(game_id).await?;
        let (next, outcome) = engine::submit(&game, actor_id, action.clone())?;
        self.persist_and_broadcast(&game, &next, actor_id, &action, &outcome).await?;

        let mut current = next;
        let mut turns_run = 0;
        while current.status == GameStatus::InProgress && turns_run < self.max_ai_turns {
            let Some(player) = current.current_player() else { break };
            let Some(difficulty) = player.ai_difficulty() else { break };

            let ai_actor_id = current.current_turn_id;
            let mut rng = rand::rng();
            let ai_action = ai::decide(&current, ai_actor_id, difficulty, &mut rng);
            let (after_ai, ai_outcome) = engine::submit(&current, ai_actor_id, ai_action.clone())?;
            self.persist_and_broadcast(&current, &after_ai, ai_actor_id, &ai_action, &ai_outcome).await?;

            current = after_ai;
            turns_run += 1;
        }

        Ok((current, outcome))
    }

    pub fn valid_actions_for(&self, game: &Game, actor_id: i64) -> Vec<engine::ActionTemplate> {
        engine::valid_actions_for(game, actor_id)
    }

    async fn persist_and_broadcast(
        &self,
        before: &Game,
        after: &Game,
        actor_id: i64,
        action: &Action,
        outcome: &ActionOutcome,
    ) -> Result<()> {
        self.save_game(after).await?;

        self.fabric
            .broadcast(&after.id, Event::PlayerAction { actor_id, action: action.clone() }, Some(actor_id))
            .await;
        self.fabric.send(&after.id, actor_id, Event::ActionResult { outcome: outcome.clone() }).await;
        self.fabric.broadcast(&after.id, Event::game_state_update(after), None).await;

        if outcome.round_changed {
            self.fabric
                .broadcast(
                    &after.id,
                    Event::RoundChanged { previous_round: before.current_round, current_round: after.current_round },
                    None,
                )
                .await;
        }

        if outcome.turn_changed && !outcome.finished {
            self.fabric
                .broadcast(
                    &after.id,
                    Event::TurnChanged { previous_user_id: before.current_turn_id, current_user_id: after.current_turn_id },
                    None,
                )
                .await;
            self.fabric
                .send(&after.id, after.current_turn_id, Event::YourTurn { current_round: after.current_round })
                .await;
            let actions = engine::valid_actions_for(after, after.current_turn_id);
            self.fabric.send(&after.id, after.current_turn_id, Event::ValidActionsUpdate { actions }).await;
        }

        if outcome.finished {
            self.fabric.broadcast(&after.id, Event::game_ended(after), None).await;
        }

        Ok(())
    }
}

/// Convenience constructor used by the server: builds a `RoomSpec` from a
/// lobby's assembled participant list. Lobby/matchmaking itself is an
/// external collaborator; this only shapes its output into the engine's
/// input.
pub fn room_spec(game_id: String, room_id: Option<String>, participants: Vec<Participant>) -> RoomSpec {
    RoomSpec { game_id, room_id, participants }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .unwrap_or_else(|e| Err(GameError::Internal(format!("blocking task panicked: {e}"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;
    use crate::ai::AiDifficulty;
    use crate::persistence::SqliteGameStore;

    fn runtime() -> GameRuntime {
        let store: Arc<dyn GameStore> = Arc::new(SqliteGameStore::in_memory().unwrap());
        GameRuntime::new(store, BroadcastFabric::new())
    }

    fn two_player_room(game_id: &str) -> RoomSpec {
        RoomSpec {
            game_id: game_id.to_string(),
            room_id: None,
            participants: vec![
                Participant { actor: Actor::Human { user_id: 1 }, username: "a".into(), color: "red".into(), is_host: true },
                Participant { actor: Actor::Human { user_id: 2 }, username: "b".into(), color: "blue".into(), is_host: false },
            ],
        }
    }

    #[tokio::test]
    async fn create_persists_and_broadcasts_game_started() {
        let rt = runtime();
        let (s1, mut r1) = Session::new("s1".into(), "g1".into(), 1);
        rt.fabric().register(s1).await;
        let _ = r1.try_recv(); // player_joined

        let game = rt.create_game(two_player_room("g1")).await.unwrap();
        assert!(matches!(r1.try_recv(), Ok(Event::GameStarted { .. })));
        assert!(matches!(r1.try_recv(), Ok(Event::YourTurn { .. })));

        let reloaded = rt.store().load_game(&game.id).unwrap();
        assert_eq!(reloaded.players.len(), 2);
    }

    #[tokio::test]
    async fn submit_action_rejects_a_timed_out_deadline() {
        let rt = runtime();
        rt.create_game(two_player_room("g2")).await.unwrap();

        let lock = rt.lock_for("g2").await;
        let _held = lock.lock().await;
        let result = rt.submit_action("g2", 1, Action::EndTurn, Some(Duration::from_millis(10))).await;
        assert!(matches!(result, Err(GameError::TimedOut)));
    }

    #[tokio::test]
    async fn ai_auto_play_runs_after_a_human_turn_and_returns_to_the_human() {
        let rt = runtime();
        let room = RoomSpec {
            game_id: "g3".to_string(),
            room_id: None,
            participants: vec![
                Participant { actor: Actor::Human { user_id: 1 }, username: "a".into(), color: "red".into(), is_host: true },
                Participant { actor: Actor::Ai { ai_id: -1, difficulty: AiDifficulty::Easy }, username: "ai".into(), color: "blue".into(), is_host: false },
            ],
        };
        rt.create_game(room).await.unwrap();

        let (after, _) = rt.submit_action("g3", 1, Action::EndTurn, None).await.unwrap();
        assert!(after.current_turn_id == 1 || after.status == GameStatus::Finished);
    }
}
