//! The canonical identifier of a turn-taking participant.
//!
//! Replaces the "AI piggybacks on a negative user_id" convention with a
//! discriminated type: every place that used to hold a signed integer now
//! holds an `Actor`, and the persistence layer encodes the variant
//! explicitly instead of relying on the sign of an id.

use serde::{Deserialize, Serialize};

use crate::ai::AiDifficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    Human { user_id: i64 },
    Ai { ai_id: i64, difficulty: AiDifficulty },
}

impl Actor {
    /// The id stored wherever the aggregate needs a single canonical key:
    /// `current_turn_user_id`, `turn_order`, `PlacedTile.owner_id`,
    /// `PlacedWorker.player_user_id`.
    pub fn canonical_id(&self) -> i64 {
        match self {
            Actor::Human { user_id } => *user_id,
            Actor::Ai { ai_id, .. } => *ai_id,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Actor::Ai { .. })
    }

    pub fn difficulty(&self) -> Option<AiDifficulty> {
        match self {
            Actor::Ai { difficulty, .. } => Some(*difficulty),
            Actor::Human { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_canonical_id_is_its_user_id() {
        let a = Actor::Human { user_id: 42 };
        assert_eq!(a.canonical_id(), 42);
        assert!(!a.is_ai());
    }

    #[test]
    fn ai_canonical_id_is_its_ai_id() {
        let a = Actor::Ai {
            ai_id: -1,
            difficulty: AiDifficulty::Hard,
        };
        assert_eq!(a.canonical_id(), -1);
        assert!(a.is_ai());
        assert_eq!(a.difficulty(), Some(AiDifficulty::Hard));
    }
}
