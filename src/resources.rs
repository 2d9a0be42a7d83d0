//! Player resource counters: wood, stone, tile, ink.
//!
//! All operations are pure: they take a `Resources` by value and return a new
//! one. None of them mutate in place, mirroring the rest of the engine's
//! functional-core style.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Stone,
    Tile,
    Ink,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Tile,
        ResourceKind::Ink,
    ];

    pub fn max(self) -> u32 {
        match self {
            ResourceKind::Wood => 10,
            ResourceKind::Stone => 10,
            ResourceKind::Tile => 6,
            ResourceKind::Ink => 4,
        }
    }
}

pub type Cost = BTreeMap<ResourceKind, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub wood: u32,
    pub stone: u32,
    pub tile: u32,
    pub ink: u32,
}

impl Resources {
    pub fn initial() -> Self {
        Resources {
            wood: 2,
            stone: 2,
            tile: 0,
            ink: 0,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Tile => self.tile,
            ResourceKind::Ink => self.ink,
        }
    }

    fn set(&mut self, kind: ResourceKind, value: u32) {
        match kind {
            ResourceKind::Wood => self.wood = value,
            ResourceKind::Stone => self.stone = value,
            ResourceKind::Tile => self.tile = value,
            ResourceKind::Ink => self.ink = value,
        }
    }

    /// Add `amount` of `kind`, clamped at that kind's maximum.
    pub fn add(&self, kind: ResourceKind, amount: u32) -> Resources {
        let mut next = *self;
        let clamped = (self.get(kind) + amount).min(kind.max());
        next.set(kind, clamped);
        next
    }

    /// Consume `amount` of `kind`. Fails if insufficient.
    pub fn consume(&self, kind: ResourceKind, amount: u32) -> Result<Resources> {
        let current = self.get(kind);
        if current < amount {
            return Err(GameError::PreconditionFailed(format!(
                "not enough {kind:?}: have {current}, need {amount}"
            )));
        }
        let mut next = *self;
        next.set(kind, current - amount);
        Ok(next)
    }

    pub fn can_afford(&self, cost: &Cost) -> bool {
        cost.iter().all(|(kind, amount)| self.get(*kind) >= *amount)
    }

    pub fn pay_cost(&self, cost: &Cost) -> Result<Resources> {
        if !self.can_afford(cost) {
            return Err(GameError::PreconditionFailed(
                "cannot afford cost".to_string(),
            ));
        }
        let mut result = *self;
        for (kind, amount) in cost {
            result = result.consume(*kind, *amount)?;
        }
        Ok(result)
    }

    pub fn add_multiple(&self, additions: &BTreeMap<ResourceKind, u32>) -> Resources {
        let mut result = *self;
        for (kind, amount) in additions {
            result = result.add(*kind, *amount);
        }
        result
    }

    pub fn total(&self) -> u32 {
        self.wood + self.stone + self.tile + self.ink
    }

    /// Score contribution of leftover resources at game end: every 3 units is 1 point.
    pub fn penalty_score(&self) -> u32 {
        self.total() / 3
    }
}
