//! Worker pools: apprentices and officials, with the `total = available + placed`
//! invariant carried in every operation's return value.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerKind {
    Apprentice,
    Official,
}

impl WorkerKind {
    /// Resource units produced per turn by one placed worker of this kind.
    pub fn production_units(self) -> u32 {
        match self {
            WorkerKind::Apprentice => 1,
            WorkerKind::Official => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCategory {
    pub total: u32,
    pub available: u32,
    pub placed: u32,
}

impl WorkerCategory {
    fn new(total: u32) -> Self {
        WorkerCategory {
            total,
            available: total,
            placed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPool {
    pub apprentices: WorkerCategory,
    pub officials: WorkerCategory,
}

impl WorkerPool {
    pub fn initial() -> Self {
        WorkerPool {
            apprentices: WorkerCategory::new(3),
            officials: WorkerCategory::new(2),
        }
    }

    fn category(&self, kind: WorkerKind) -> WorkerCategory {
        match kind {
            WorkerKind::Apprentice => self.apprentices,
            WorkerKind::Official => self.officials,
        }
    }

    fn with_category(&self, kind: WorkerKind, category: WorkerCategory) -> WorkerPool {
        let mut next = *self;
        match kind {
            WorkerKind::Apprentice => next.apprentices = category,
            WorkerKind::Official => next.officials = category,
        }
        next
    }

    pub fn can_place(&self, kind: WorkerKind) -> bool {
        self.category(kind).available > 0
    }

    pub fn place(&self, kind: WorkerKind) -> Result<WorkerPool> {
        let mut category = self.category(kind);
        if category.available == 0 {
            return Err(GameError::PreconditionFailed(format!(
                "no {kind:?} worker available"
            )));
        }
        category.available -= 1;
        category.placed += 1;
        Ok(self.with_category(kind, category))
    }

    pub fn recall(&self, kind: WorkerKind) -> Result<WorkerPool> {
        let mut category = self.category(kind);
        if category.placed == 0 {
            return Err(GameError::PreconditionFailed(format!(
                "no {kind:?} worker placed to recall"
            )));
        }
        category.placed -= 1;
        category.available += 1;
        Ok(self.with_category(kind, category))
    }

    pub fn recall_all(&self) -> WorkerPool {
        WorkerPool {
            apprentices: WorkerCategory::new(self.apprentices.total),
            officials: WorkerCategory::new(self.officials.total),
        }
    }

    pub fn placed_count(&self) -> u32 {
        self.apprentices.placed + self.officials.placed
    }
}

/// Slot capacity for a kind of worker on a tile that has `slots` apprentice
/// slots (2, or 1 on a gate) and 1 official slot.
pub fn slot_capacity(kind: WorkerKind, apprentice_slots: u32) -> u32 {
    match kind {
        WorkerKind::Apprentice => apprentice_slots,
        WorkerKind::Official => 1,
    }
}

/// Whether `slot_index` is a free, in-range slot of `kind` among `existing`
/// placements already on the tile.
pub fn can_place_on_tile(
    existing: &[(WorkerKind, u32)],
    kind: WorkerKind,
    slot_index: u32,
    apprentice_slots: u32,
) -> bool {
    if slot_index >= slot_capacity(kind, apprentice_slots) {
        return false;
    }
    !existing
        .iter()
        .any(|(k, idx)| *k == kind && *idx == slot_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_pool_matches_spec_counts() {
        let pool = WorkerPool::initial();
        assert_eq!(pool.apprentices.total, 3);
        assert_eq!(pool.officials.total, 2);
        assert_eq!(pool.apprentices.available, 3);
    }

    #[test]
    fn place_then_recall_round_trips() {
        let pool = WorkerPool::initial();
        let placed = pool.place(WorkerKind::Official).unwrap();
        assert_eq!(placed.officials.available, 1);
        assert_eq!(placed.officials.placed, 1);
        let recalled = placed.recall(WorkerKind::Official).unwrap();
        assert_eq!(recalled, pool);
    }

    #[test]
    fn cannot_place_when_none_available() {
        let pool = WorkerPool::initial();
        let p1 = pool.place(WorkerKind::Official).unwrap();
        let p2 = p1.place(WorkerKind::Official).unwrap();
        assert!(p2.place(WorkerKind::Official).is_err());
    }

    #[test]
    fn gate_has_one_apprentice_slot() {
        assert_eq!(slot_capacity(WorkerKind::Apprentice, 1), 1);
        assert_eq!(slot_capacity(WorkerKind::Official, 1), 1);
    }

    #[test]
    fn slot_rejects_occupied_index() {
        let existing = vec![(WorkerKind::Apprentice, 0)];
        assert!(!can_place_on_tile(&existing, WorkerKind::Apprentice, 0, 2));
        assert!(can_place_on_tile(&existing, WorkerKind::Apprentice, 1, 2));
    }
}
