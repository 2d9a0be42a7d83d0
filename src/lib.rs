//! Hanyang game engine and server.
//!
//! The engine (`game`, `board`, `resources`, `workers`, `tiles`, `blueprints`,
//! `actor`, `ai`, `engine`) is a pure, typed state machine: `engine::create`
//! and `engine::submit` are the only ways a [`game::Game`] changes shape.
//! Everything else — `persistence`, `broadcast`, `runtime`, `identity`,
//! `server` — wires that engine up to a real process: SQLite storage, a
//! per-room pub/sub fabric, the concurrency-safe orchestrator that ties the
//! two together, bearer-token verification, and an axum HTTP/WebSocket
//! surface.

pub mod actor;
pub mod ai;
pub mod blueprints;
pub mod board;
pub mod broadcast;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod identity;
pub mod logging;
pub mod persistence;
pub mod resources;
pub mod runtime;
pub mod server;
pub mod tiles;
pub mod workers;

pub use error::{GameError, Result};
pub use game::Game;
pub use runtime::GameRuntime;
