//! The constant 24-entry blueprint catalog: 6 palace-proximity,
//! 6 category-collection, 6 pattern and 6 special cards.

use std::sync::LazyLock;

use super::{BlueprintCard, BlueprintCategory, BlueprintCondition};
use crate::tiles::TileCategory;

pub static ALL: LazyLock<Vec<BlueprintCard>> = LazyLock::new(|| {
    use BlueprintCategory::*;
    use BlueprintCondition as C;
    vec![
        // === Palace proximity (6) ===
        BlueprintCard {
            blueprint_id: "palace_neighbor_1",
            category: PalaceProximity,
            condition: C::PalaceAdjacent { min_count: 2 },
            bonus_points: 4,
        },
        BlueprintCard {
            blueprint_id: "palace_neighbor_2",
            category: PalaceProximity,
            condition: C::PalaceAdjacent { min_count: 3 },
            bonus_points: 6,
        },
        BlueprintCard {
            blueprint_id: "palace_neighbor_3",
            category: PalaceProximity,
            condition: C::PalaceSurround { directions: 4 },
            bonus_points: 10,
        },
        BlueprintCard {
            blueprint_id: "palace_neighbor_4",
            category: PalaceProximity,
            condition: C::PalaceAdjacentCategory {
                category: TileCategory::Government,
                min_count: 2,
            },
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "palace_neighbor_5",
            category: PalaceProximity,
            condition: C::PalaceAdjacentCategory {
                category: TileCategory::Commercial,
                min_count: 2,
            },
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "palace_neighbor_6",
            category: PalaceProximity,
            condition: C::PalaceAdjacentCategory {
                category: TileCategory::Religious,
                min_count: 1,
            },
            bonus_points: 3,
        },
        // === Category collection (6) ===
        BlueprintCard {
            blueprint_id: "collection_commercial",
            category: CategoryCollection,
            condition: C::CategoryCount {
                category: TileCategory::Commercial,
                min_count: 4,
            },
            bonus_points: 6,
        },
        BlueprintCard {
            blueprint_id: "collection_residential",
            category: CategoryCollection,
            condition: C::CategoryCount {
                category: TileCategory::Residential,
                min_count: 4,
            },
            bonus_points: 6,
        },
        BlueprintCard {
            blueprint_id: "collection_government",
            category: CategoryCollection,
            condition: C::CategoryCount {
                category: TileCategory::Government,
                min_count: 3,
            },
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "collection_religious",
            category: CategoryCollection,
            condition: C::CategoryCount {
                category: TileCategory::Religious,
                min_count: 3,
            },
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "collection_diverse",
            category: CategoryCollection,
            condition: C::DiverseCategories { min_types: 5 },
            bonus_points: 7,
        },
        BlueprintCard {
            blueprint_id: "collection_gate",
            category: CategoryCollection,
            condition: C::CategoryCount {
                category: TileCategory::Gate,
                min_count: 2,
            },
            bonus_points: 4,
        },
        // === Pattern (6) ===
        BlueprintCard {
            blueprint_id: "pattern_row",
            category: Pattern,
            condition: C::RowCount { min_count: 4 },
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "pattern_column",
            category: Pattern,
            condition: C::ColumnCount { min_count: 4 },
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "pattern_diagonal",
            category: Pattern,
            condition: C::DiagonalCount { min_count: 3 },
            bonus_points: 4,
        },
        BlueprintCard {
            blueprint_id: "pattern_cluster",
            category: Pattern,
            condition: C::Cluster2x2,
            bonus_points: 6,
        },
        BlueprintCard {
            blueprint_id: "pattern_corner",
            category: Pattern,
            condition: C::CornerCount { min_count: 3 },
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "pattern_center",
            category: Pattern,
            condition: C::CenterCount { min_count: 5 },
            bonus_points: 7,
        },
        // === Special (6) ===
        BlueprintCard {
            blueprint_id: "special_fengshui",
            category: Special,
            condition: C::FengshuiCount { min_count: 3 },
            bonus_points: 6,
        },
        BlueprintCard {
            blueprint_id: "special_workers",
            category: Special,
            condition: C::AllWorkersPlaced,
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "special_efficiency",
            category: Special,
            condition: C::ResourcesUnder { max_total: 3 },
            bonus_points: 4,
        },
        BlueprintCard {
            blueprint_id: "special_adjacent",
            category: Special,
            condition: C::AllConnected,
            bonus_points: 8,
        },
        BlueprintCard {
            blueprint_id: "special_first_builder",
            category: Special,
            condition: C::TileCount { min_count: 6 },
            bonus_points: 5,
        },
        BlueprintCard {
            blueprint_id: "special_balance",
            category: Special,
            condition: C::BalancedCategories {
                categories: vec![
                    TileCategory::Government,
                    TileCategory::Commercial,
                    TileCategory::Residential,
                ],
                min_each: 2,
            },
            bonus_points: 6,
        },
    ]
});
