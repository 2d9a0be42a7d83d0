//! `rusqlite`-backed [`GameStore`].
//!
//! Board, players, tile pools and turn order are stored as JSON columns on
//! the game row, per §6 of the persisted-state contract; the columns that
//! drive queries (`status`, `current_round`, `current_turn_id`) are kept as
//! plain SQL columns alongside them. No column references a `users` table:
//! AI canonical ids are negative integers local to this row.

use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use super::{not_found, GameStore};
use crate::error::Result;
use crate::game::{ActionRecord, Game};

/// `Arc<Mutex<Connection>>`, matching the teacher's `AuthDatabase` shape:
/// cheap to clone, one physical connection shared behind a lock.
pub struct SqliteGameStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteGameStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn: Arc::new(Mutex::new(conn)) };
        store.init_tables()?;
        Ok(store)
    }

    /// In-memory store for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Arc::new(Mutex::new(conn)) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                room_id TEXT,
                status TEXT NOT NULL,
                current_round INTEGER NOT NULL,
                total_rounds INTEGER NOT NULL,
                current_turn_id INTEGER NOT NULL,
                turn_order TEXT NOT NULL,
                board TEXT NOT NULL,
                players TEXT NOT NULL,
                available_tiles TEXT NOT NULL,
                discarded_tiles TEXT NOT NULL,
                last_action TEXT,
                score_breakdown TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS actions (
                id TEXT PRIMARY KEY,
                game_id TEXT NOT NULL,
                actor_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                payload TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_games_room ON games(room_id);
            CREATE INDEX IF NOT EXISTS idx_actions_game ON actions(game_id);
            "#,
        )?;
        Ok(())
    }

    fn row_to_game(row: &rusqlite::Row) -> rusqlite::Result<Game> {
        let turn_order_json: String = row.get(6)?;
        let board_json: String = row.get(7)?;
        let players_json: String = row.get(8)?;
        let available_json: String = row.get(9)?;
        let discarded_json: String = row.get(10)?;
        let last_action_json: Option<String> = row.get(11)?;
        let breakdown_json: Option<String> = row.get(12)?;

        let status_str: String = row.get(2)?;
        let status = serde_json::from_value(serde_json::Value::String(status_str))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e)))?;

        let decode = |col: usize, json: &str| -> rusqlite::Result<_> {
            serde_json::from_str(json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(e))
            })
        };

        Ok(Game {
            id: row.get(0)?,
            room_id: row.get(1)?,
            status,
            current_round: row.get(3)?,
            total_rounds: row.get(4)?,
            current_turn_id: row.get(5)?,
            turn_order: decode(6, &turn_order_json)?,
            board: decode(7, &board_json)?,
            players: decode(8, &players_json)?,
            available_tiles: decode(9, &available_json)?,
            discarded_tiles: decode(10, &discarded_json)?,
            last_action: last_action_json.as_deref().map(|j| decode(11, j)).transpose()?,
            score_breakdown: breakdown_json.as_deref().map(|j| decode(12, j)).transpose()?,
            created_at: row.get(13)?,
            updated_at: row.get(14)?,
        })
    }
}

impl GameStore for SqliteGameStore {
    fn load_game(&self, id: &str) -> Result<Game> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, room_id, status, current_round, total_rounds, current_turn_id,
                    turn_order, board, players, available_tiles, discarded_tiles,
                    last_action, score_breakdown, created_at, updated_at
             FROM games WHERE id = ?1",
            params![id],
            Self::row_to_game,
        )
        .optional()?
        .ok_or_else(|| not_found(&format!("game {id}")))
    }

    fn load_game_by_room(&self, room_id: &str) -> Result<Game> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, room_id, status, current_round, total_rounds, current_turn_id,
                    turn_order, board, players, available_tiles, discarded_tiles,
                    last_action, score_breakdown, created_at, updated_at
             FROM games WHERE room_id = ?1",
            params![room_id],
            Self::row_to_game,
        )
        .optional()?
        .ok_or_else(|| not_found(&format!("game for room {room_id}")))
    }

    fn save_game(&self, game: &Game) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let status = serde_json::to_string(&game.status)?;
        // serde gives us a quoted JSON string; store the bare value.
        let status = status.trim_matches('"').to_string();

        tx.execute(
            "INSERT INTO games (id, room_id, status, current_round, total_rounds, current_turn_id,
                                 turn_order, board, players, available_tiles, discarded_tiles,
                                 last_action, score_breakdown, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             ON CONFLICT(id) DO UPDATE SET
                room_id = excluded.room_id,
                status = excluded.status,
                current_round = excluded.current_round,
                total_rounds = excluded.total_rounds,
                current_turn_id = excluded.current_turn_id,
                turn_order = excluded.turn_order,
                board = excluded.board,
                players = excluded.players,
                available_tiles = excluded.available_tiles,
                discarded_tiles = excluded.discarded_tiles,
                last_action = excluded.last_action,
                score_breakdown = excluded.score_breakdown,
                updated_at = excluded.updated_at",
            params![
                game.id,
                game.room_id,
                status,
                game.current_round,
                game.total_rounds,
                game.current_turn_id,
                serde_json::to_string(&game.turn_order)?,
                serde_json::to_string(&game.board)?,
                serde_json::to_string(&game.players)?,
                serde_json::to_string(&game.available_tiles)?,
                serde_json::to_string(&game.discarded_tiles)?,
                game.last_action.as_ref().map(serde_json::to_string).transpose()?,
                game.score_breakdown.as_ref().map(serde_json::to_string).transpose()?,
                game.created_at,
                game.updated_at,
            ],
        )?;

        if let Some(record) = &game.last_action {
            insert_action(&tx, game.id.as_str(), record)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn append_action(&self, game_id: &str, record: &ActionRecord) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        insert_action(&conn, game_id, record)
    }
}

fn insert_action(conn: &Connection, game_id: &str, record: &ActionRecord) -> Result<()> {
    let kind = serde_json::to_string(&record.action_kind)?;
    let kind = kind.trim_matches('"').to_string();
    conn.execute(
        "INSERT OR REPLACE INTO actions (id, game_id, actor_id, kind, payload, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.id,
            game_id,
            record.actor_id,
            kind,
            serde_json::to_string(&record.payload)?,
            record.timestamp,
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;
    use crate::engine::{self, Participant, RoomSpec};

    fn sample_game() -> Game {
        let room = RoomSpec {
            game_id: "game-store-1".to_string(),
            room_id: Some("room-1".to_string()),
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
        };
        let mut rng = rand::rng();
        engine::create(room, &mut rng).unwrap()
    }

    #[test]
    fn round_trips_a_freshly_created_game() {
        let store = SqliteGameStore::in_memory().unwrap();
        let game = sample_game();
        store.save_game(&game).unwrap();

        let loaded = store.load_game(&game.id).unwrap();
        assert_eq!(loaded.id, game.id);
        assert_eq!(loaded.players.len(), 2);
        assert_eq!(loaded.available_tiles.len(), 36);
        assert_eq!(loaded.current_turn_id, game.current_turn_id);
    }

    #[test]
    fn loads_by_room_id() {
        let store = SqliteGameStore::in_memory().unwrap();
        let game = sample_game();
        store.save_game(&game).unwrap();

        let loaded = store.load_game_by_room("room-1").unwrap();
        assert_eq!(loaded.id, game.id);
    }

    #[test]
    fn missing_game_is_not_found() {
        let store = SqliteGameStore::in_memory().unwrap();
        assert!(store.load_game("does-not-exist").is_err());
    }

    #[test]
    fn save_is_atomic_with_its_causing_action() {
        let store = SqliteGameStore::in_memory().unwrap();
        let game = sample_game();
        store.save_game(&game).unwrap();

        let (next, _) = engine::submit(&game, 1, engine::Action::EndTurn).unwrap();
        store.save_game(&next).unwrap();

        let conn = store.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM actions WHERE game_id = ?1", params![next.id], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
