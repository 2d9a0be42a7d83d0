//! Error taxonomy for the game engine.
//!
//! Every fallible engine operation returns [`GameError`]. The taxonomy is
//! transport-agnostic: callers at the edge (HTTP, websocket) map each variant
//! to whatever status code makes sense for that transport.

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("not your turn")]
    NotYourTurn,

    #[error("not a participant in this game")]
    NotAParticipant,

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("timed out waiting for the game lock")]
    TimedOut,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for GameError {
    fn from(err: rusqlite::Error) -> Self {
        GameError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Malformed(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for GameError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        GameError::Malformed(format!("invalid token: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
