//! Process configuration, parsed once at startup.
//!
//! Shaped after the teacher's `main.rs` `Config` (a `clap::Parser` struct of
//! CLI flags with sane defaults), trimmed to what this server's surface
//! actually needs: a bind address, a database path, a log directory, and
//! the two knobs §5 calls out by name (`action_deadline_ms`, `max_ai_turns`).

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "hanyang", about = "Authoritative game server for Hanyang")]
pub struct Config {
    /// Interface to bind the HTTP/WebSocket server to.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP/WebSocket server to.
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Path to the SQLite database file (or `:memory:` for an ephemeral store).
    #[arg(long, default_value = "hanyang.db")]
    pub database_path: String,

    /// Directory flexi_logger rotates its log files into.
    #[arg(long, default_value = "logs")]
    pub log_dir: String,

    /// Deadline (milliseconds) an action request carries before the
    /// per-room lock must be acquired; exceeding it yields `TimedOut`.
    #[arg(long, default_value_t = 2_000)]
    pub action_deadline_ms: u64,

    /// Upper bound on consecutive AI actions an auto-play cascade may run
    /// before yielding control back, even if the turn pointer is still on
    /// an AI participant.
    #[arg(long, default_value_t = crate::runtime::DEFAULT_MAX_AI_TURNS)]
    pub max_ai_turns: u32,
}

impl Config {
    pub fn action_deadline(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.action_deadline_ms)
    }
}
