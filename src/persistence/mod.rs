//! The engine's persistence contract.
//!
//! The aggregate is kept as typed value objects throughout the engine (see
//! [`crate::game::Game`]); this module is the only place that touches a
//! serialized representation, at the boundary where the aggregate crosses
//! into storage. `SaveGame` and `AppendAction` are not two independent
//! trait calls a caller can interleave: [`GameStore::save_game`] persists
//! the game row and its causing [`ActionRecord`] (carried on
//! `game.last_action`) inside one transaction, so a failure never leaves a
//! mutated game without its action log entry or vice versa.

mod sqlite;

pub use sqlite::SqliteGameStore;

use crate::error::{GameError, Result};
use crate::game::{ActionRecord, Game};

/// Narrow store interface the engine depends on. AI participants carry
/// negative canonical ids that never reference a users table, so no
/// implementation may declare a foreign key on `actor_id` or
/// `current_turn_id`.
pub trait GameStore: Send + Sync {
    /// Load a game by id, or `NotFound`.
    fn load_game(&self, id: &str) -> Result<Game>;

    /// Load the game currently associated with a room, or `NotFound`.
    fn load_game_by_room(&self, room_id: &str) -> Result<Game>;

    /// Persist the full aggregate. Atomic: the game row and the
    /// `ActionRecord` on `game.last_action` (if any) are written together,
    /// or neither is.
    fn save_game(&self, game: &Game) -> Result<()>;

    /// Append an action to the durable log independent of a full save, used
    /// by rehydration tooling and audits. Ordinary gameplay never needs this
    /// directly — `save_game` already appends `game.last_action`.
    fn append_action(&self, game_id: &str, record: &ActionRecord) -> Result<()>;
}

pub(crate) fn not_found(what: &str) -> GameError {
    GameError::NotFound(what.to_string())
}
