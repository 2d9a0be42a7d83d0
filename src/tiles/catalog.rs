//! The constant 36-entry tile catalog: 4 palace, 6 government, 6 religious,
//! 8 commercial, 8 residential, 4 gate.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{TileCategory, TileDefinition};
use crate::resources::{Cost, ResourceKind};

fn cost(wood: u32, stone: u32, tile: u32, ink: u32) -> Cost {
    let mut m = Cost::new();
    if wood > 0 {
        m.insert(ResourceKind::Wood, wood);
    }
    if stone > 0 {
        m.insert(ResourceKind::Stone, stone);
    }
    if tile > 0 {
        m.insert(ResourceKind::Tile, tile);
    }
    if ink > 0 {
        m.insert(ResourceKind::Ink, ink);
    }
    m
}

fn adj(pairs: &[(TileCategory, i32)]) -> BTreeMap<TileCategory, i32> {
    pairs.iter().copied().collect()
}

pub static ALL: LazyLock<Vec<TileDefinition>> = LazyLock::new(|| {
    use TileCategory::*;
    vec![
        // Palace tiles (4)
        TileDefinition {
            tile_id: "palace_1",
            category: Palace,
            cost: cost(3, 3, 2, 1),
            base_points: 8,
            fengshui_bonus: 4,
            adjacency_bonus: adj(&[(Government, 2)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "palace_2",
            category: Palace,
            cost: cost(3, 2, 2, 1),
            base_points: 7,
            fengshui_bonus: 4,
            adjacency_bonus: adj(&[(Religious, 2)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "palace_3",
            category: Palace,
            cost: cost(2, 3, 2, 1),
            base_points: 6,
            fengshui_bonus: 3,
            adjacency_bonus: adj(&[(Palace, 3)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "palace_4",
            category: Palace,
            cost: cost(2, 2, 2, 1),
            base_points: 5,
            fengshui_bonus: 3,
            adjacency_bonus: adj(&[(Commercial, 2)]),
            worker_slots: 2,
        },
        // Government tiles (6)
        TileDefinition {
            tile_id: "government_1",
            category: Government,
            cost: cost(2, 2, 0, 1),
            base_points: 4,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Palace, 2)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "government_2",
            category: Government,
            cost: cost(2, 1, 0, 1),
            base_points: 3,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Government, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "government_3",
            category: Government,
            cost: cost(1, 2, 0, 1),
            base_points: 3,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Palace, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "government_4",
            category: Government,
            cost: cost(2, 1, 1, 0),
            base_points: 4,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Religious, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "government_5",
            category: Government,
            cost: cost(1, 1, 0, 1),
            base_points: 2,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Residential, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "government_6",
            category: Government,
            cost: cost(1, 2, 0, 0),
            base_points: 2,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Palace, 1)]),
            worker_slots: 2,
        },
        // Religious tiles (6)
        TileDefinition {
            tile_id: "religious_1",
            category: Religious,
            cost: cost(2, 2, 1, 0),
            base_points: 5,
            fengshui_bonus: 3,
            adjacency_bonus: adj(&[(Palace, 2)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "religious_2",
            category: Religious,
            cost: cost(1, 2, 1, 0),
            base_points: 4,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Government, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "religious_3",
            category: Religious,
            cost: cost(2, 1, 1, 0),
            base_points: 3,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Religious, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "religious_4",
            category: Religious,
            cost: cost(2, 1, 0, 0),
            base_points: 2,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Residential, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "religious_5",
            category: Religious,
            cost: cost(1, 1, 1, 0),
            base_points: 2,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Commercial, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "religious_6",
            category: Religious,
            cost: cost(1, 2, 0, 0),
            base_points: 3,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Government, 1)]),
            worker_slots: 2,
        },
        // Commercial tiles (8)
        TileDefinition {
            tile_id: "commercial_1",
            category: Commercial,
            cost: cost(1, 1, 0, 0),
            base_points: 2,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Commercial, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "commercial_2",
            category: Commercial,
            cost: cost(1, 1, 0, 0),
            base_points: 1,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Residential, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "commercial_3",
            category: Commercial,
            cost: cost(2, 1, 0, 0),
            base_points: 2,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Gate, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "commercial_4",
            category: Commercial,
            cost: cost(1, 2, 0, 0),
            base_points: 3,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Government, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "commercial_5",
            category: Commercial,
            cost: cost(1, 1, 0, 0),
            base_points: 1,
            fengshui_bonus: 0,
            adjacency_bonus: adj(&[(Commercial, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "commercial_6",
            category: Commercial,
            cost: cost(1, 1, 0, 0),
            base_points: 1,
            fengshui_bonus: 0,
            adjacency_bonus: adj(&[(Residential, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "commercial_7",
            category: Commercial,
            cost: cost(2, 0, 0, 0),
            base_points: 2,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "commercial_8",
            category: Commercial,
            cost: cost(0, 2, 0, 0),
            base_points: 1,
            fengshui_bonus: 0,
            adjacency_bonus: adj(&[(Commercial, 1)]),
            worker_slots: 2,
        },
        // Residential tiles (8)
        TileDefinition {
            tile_id: "residential_1",
            category: Residential,
            cost: cost(2, 0, 0, 0),
            base_points: 2,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Palace, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "residential_2",
            category: Residential,
            cost: cost(2, 0, 0, 0),
            base_points: 2,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Government, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "residential_3",
            category: Residential,
            cost: cost(1, 1, 0, 0),
            base_points: 1,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Religious, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "residential_4",
            category: Residential,
            cost: cost(1, 0, 0, 0),
            base_points: 1,
            fengshui_bonus: 0,
            adjacency_bonus: adj(&[(Commercial, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "residential_5",
            category: Residential,
            cost: cost(1, 0, 0, 0),
            base_points: 0,
            fengshui_bonus: 0,
            adjacency_bonus: adj(&[(Commercial, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "residential_6",
            category: Residential,
            cost: cost(1, 1, 0, 0),
            base_points: 1,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "residential_7",
            category: Residential,
            cost: cost(2, 0, 0, 0),
            base_points: 1,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Residential, 1)]),
            worker_slots: 2,
        },
        TileDefinition {
            tile_id: "residential_8",
            category: Residential,
            cost: cost(1, 0, 0, 0),
            base_points: 1,
            fengshui_bonus: 0,
            adjacency_bonus: adj(&[(Commercial, 1)]),
            worker_slots: 2,
        },
        // Gate tiles (4) — single apprentice slot
        TileDefinition {
            tile_id: "gate_1",
            category: Gate,
            cost: cost(1, 3, 0, 0),
            base_points: 4,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Commercial, 2)]),
            worker_slots: 1,
        },
        TileDefinition {
            tile_id: "gate_2",
            category: Gate,
            cost: cost(1, 3, 0, 0),
            base_points: 4,
            fengshui_bonus: 2,
            adjacency_bonus: adj(&[(Commercial, 2)]),
            worker_slots: 1,
        },
        TileDefinition {
            tile_id: "gate_3",
            category: Gate,
            cost: cost(1, 2, 0, 0),
            base_points: 3,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Residential, 1)]),
            worker_slots: 1,
        },
        TileDefinition {
            tile_id: "gate_4",
            category: Gate,
            cost: cost(1, 2, 0, 0),
            base_points: 3,
            fengshui_bonus: 1,
            adjacency_bonus: adj(&[(Palace, 1)]),
            worker_slots: 1,
        },
    ]
});
