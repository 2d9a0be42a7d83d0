//! AI opponents: three difficulty tiers, each a pure function from a
//! read-only view of the game to one legal action.

mod decision;

use serde::{Deserialize, Serialize};

pub use decision::decide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiDifficulty {
    Easy,
    Medium,
    Hard,
}
