//! Per-room broadcast fabric: delivers authoritative events to every live
//! observer of a game.
//!
//! Shaped after the teacher's `SessionManager` — an `Arc<RwLock<State>>`
//! wrapping a plain data structure, mutated only through free functions —
//! generalized from an in-memory session store to a fan-out broadcaster.
//! The event catalog and delivery-failure cleanup semantics are ported from
//! `GameConnectionManager`/`GameBroadcastService` in the original
//! websocket layer.

mod events;

pub use events::Event;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

/// One observer connection, bound to a single `(game_id, participant)`.
/// A user may hold more than one session in the same room (e.g. two
/// browser tabs); [`BroadcastFabric::send`] reaches all of them.
pub struct Session {
    pub session_id: String,
    pub game_id: String,
    pub user_id: i64,
    sender: mpsc::UnboundedSender<Event>,
}

impl Session {
    pub fn new(session_id: String, game_id: String, user_id: i64) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { session_id, game_id, user_id, sender }, receiver)
    }

    /// Deliver one event to this session. Per-session delivery is
    /// serialized by the channel itself: the receiver drains events in
    /// send order, one at a time.
    fn deliver(&self, event: &Event) -> bool {
        self.sender.send(event.clone()).is_ok()
    }
}

#[derive(Default)]
struct Room {
    sessions: Vec<Session>,
}

/// `game_id -> Room`. Membership changes (`register`/`deregister`) are
/// internally synchronized; `broadcast`/`send` iterate a consistent
/// snapshot taken under the same lock.
#[derive(Clone, Default)]
pub struct BroadcastFabric {
    rooms: Arc<RwLock<HashMap<String, Room>>>,
}

impl BroadcastFabric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session, emitting `player_joined` to the rest of the room.
    pub async fn register(&self, session: Session) {
        let game_id = session.game_id.clone();
        let user_id = session.user_id;
        {
            let mut rooms = self.rooms.write().await;
            rooms.entry(game_id.clone()).or_default().sessions.push(session);
        }
        self.broadcast(&game_id, Event::PlayerJoined { user_id }, Some(user_id)).await;
    }

    /// Deregister a session by id, emitting `player_left` unless another
    /// session for the same user remains in the room.
    pub async fn deregister(&self, game_id: &str, session_id: &str) {
        let left_user = {
            let mut rooms = self.rooms.write().await;
            let Some(room) = rooms.get_mut(game_id) else { return };
            let idx = room.sessions.iter().position(|s| s.session_id == session_id);
            let Some(idx) = idx else { return };
            let removed = room.sessions.remove(idx);
            let still_present = room.sessions.iter().any(|s| s.user_id == removed.user_id);
            if room.sessions.is_empty() {
                rooms.remove(game_id);
            }
            (!still_present).then_some(removed.user_id)
        };
        if let Some(user_id) = left_user {
            self.broadcast(game_id, Event::PlayerLeft { user_id }, None).await;
        }
    }

    /// Deliver `event` to every registered session in the room except
    /// `exclude`'s sessions, if given. Best-effort, at-least-once per live
    /// session; a dead sender is dropped and its owner deregistered.
    pub async fn broadcast(&self, game_id: &str, event: Event, exclude: Option<i64>) {
        let dead = {
            let rooms = self.rooms.read().await;
            let Some(room) = rooms.get(game_id) else { return };
            room.sessions
                .iter()
                .filter(|s| exclude != Some(s.user_id))
                .filter(|s| !s.deliver(&event))
                .map(|s| s.session_id.clone())
                .collect::<Vec<_>>()
        };
        for session_id in dead {
            self.deregister(game_id, &session_id).await;
        }
    }

    /// Deliver `event` to every session belonging to `user_id` in the room.
    /// Returns `true` iff at least one delivery succeeded.
    pub async fn send(&self, game_id: &str, user_id: i64, event: Event) -> bool {
        let (delivered, dead) = {
            let rooms = self.rooms.read().await;
            let Some(room) = rooms.get(game_id) else { return false };
            let mut delivered = false;
            let mut dead = Vec::new();
            for session in room.sessions.iter().filter(|s| s.user_id == user_id) {
                if session.deliver(&event) {
                    delivered = true;
                } else {
                    dead.push(session.session_id.clone());
                }
            }
            (delivered, dead)
        };
        for session_id in dead {
            self.deregister(game_id, &session_id).await;
        }
        delivered
    }

    pub async fn connected_user_count(&self, game_id: &str) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(game_id).map(|r| r.sessions.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn broadcast_excludes_the_acting_session() {
        let fabric = BroadcastFabric::new();
        let (s1, mut r1) = Session::new("s1".into(), "g1".into(), 1);
        let (s2, mut r2) = Session::new("s2".into(), "g1".into(), 2);
        fabric.register(s1).await;
        fabric.register(s2).await;

        // drain the player_joined notifications from registration.
        let _ = r1.try_recv();
        let _ = r2.try_recv();

        fabric.broadcast("g1", Event::Ping, Some(1)).await;
        assert!(r1.try_recv().is_err());
        assert!(matches!(r2.try_recv(), Ok(Event::Ping)));
    }

    #[tokio::test]
    async fn send_reaches_every_session_of_one_user() {
        let fabric = BroadcastFabric::new();
        let (s1, mut r1) = Session::new("tab1".into(), "g1".into(), 1);
        let (s2, mut r2) = Session::new("tab2".into(), "g1".into(), 1);
        fabric.register(s1).await;
        fabric.register(s2).await;
        let _ = r1.try_recv();
        let _ = r2.try_recv();

        let delivered = fabric.send("g1", 1, Event::Pong).await;
        assert!(delivered);
        assert!(matches!(r1.try_recv(), Ok(Event::Pong)));
        assert!(matches!(r2.try_recv(), Ok(Event::Pong)));
    }

    #[tokio::test]
    async fn deregister_emits_player_left_only_once_the_last_session_drops() {
        let fabric = BroadcastFabric::new();
        let (s1, mut r1) = Session::new("tab1".into(), "g1".into(), 1);
        let (s2, _r2) = Session::new("tab2".into(), "g1".into(), 1);
        let (watcher, mut rw) = Session::new("watcher".into(), "g1".into(), 2);
        fabric.register(s1).await;
        fabric.register(s2).await;
        fabric.register(watcher).await;
        let _ = r1.try_recv();
        let _ = rw.try_recv();
        let _ = rw.try_recv();

        fabric.deregister("g1", "tab1").await;
        assert!(rw.try_recv().is_err(), "one of user 1's two sessions remains");

        fabric.deregister("g1", "tab2").await;
        assert!(matches!(rw.try_recv(), Ok(Event::PlayerLeft { user_id: 1 })));
    }

    #[tokio::test]
    async fn send_to_a_room_with_no_sessions_reports_no_delivery() {
        let fabric = BroadcastFabric::new();
        assert!(!fabric.send("ghost-room", 1, Event::Ping).await);
    }
}
