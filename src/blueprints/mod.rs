//! Blueprint cards: dealt to players at game start, scored at finalization
//! against whatever board state and resources they end the game with.

pub mod catalog;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::{Board, BOARD_SIZE};
use crate::resources::Resources;
use crate::tiles::{self, TileCategory};
use crate::workers::WorkerPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlueprintCategory {
    PalaceProximity,
    CategoryCollection,
    Pattern,
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlueprintCondition {
    PalaceAdjacent { min_count: u32 },
    PalaceSurround { directions: u32 },
    PalaceAdjacentCategory { category: TileCategory, min_count: u32 },
    CategoryCount { category: TileCategory, min_count: u32 },
    DiverseCategories { min_types: u32 },
    TileCount { min_count: u32 },
    RowCount { min_count: u32 },
    ColumnCount { min_count: u32 },
    DiagonalCount { min_count: u32 },
    Cluster2x2,
    CornerCount { min_count: u32 },
    CenterCount { min_count: u32 },
    FengshuiCount { min_count: u32 },
    AllWorkersPlaced,
    ResourcesUnder { max_total: u32 },
    AllConnected,
    BalancedCategories { categories: Vec<TileCategory>, min_each: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintCard {
    pub blueprint_id: &'static str,
    pub category: BlueprintCategory,
    pub condition: BlueprintCondition,
    pub bonus_points: u32,
}

/// The four cells diagonally inward from the mountain corners — the nearest
/// buildable cells to each corner of the board, since the corners themselves
/// are permanent mountain terrain and can never hold a player's tile.
fn corner_cells() -> [(usize, usize); 4] {
    let last = BOARD_SIZE - 1;
    [(1, 1), (1, last - 1), (last - 1, 1), (last - 1, last - 1)]
}

fn owner_tiles(board: &Board, owner_id: i64) -> Vec<(usize, usize)> {
    board
        .cells
        .iter()
        .filter(|c| c.tile.as_ref().is_some_and(|t| t.owner_id == owner_id))
        .map(|c| (c.row, c.col))
        .collect()
}

fn category_of(board: &Board, row: usize, col: usize) -> Option<TileCategory> {
    let tile_id = &board.cell(row, col).tile.as_ref()?.tile_id;
    tiles::get(tile_id).ok().map(|def| def.category)
}

fn is_palace(board: &Board, row: usize, col: usize) -> bool {
    category_of(board, row, col) == Some(TileCategory::Palace)
}

fn palace_cells(board: &Board) -> Vec<(usize, usize)> {
    (0..BOARD_SIZE)
        .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
        .filter(|&(r, c)| is_palace(board, r, c))
        .collect()
}

fn tiles_adjacent_to_palace(
    board: &Board,
    owner_tiles: &[(usize, usize)],
) -> Vec<(usize, usize)> {
    let palaces = palace_cells(board);
    owner_tiles
        .iter()
        .copied()
        .filter(|&(r, c)| {
            Board::orthogonal_neighbors(r, c)
                .into_iter()
                .any(|n| palaces.contains(&n))
        })
        .collect()
}

fn count_in_row(board: &Board, owner_id: i64, row: usize) -> u32 {
    (0..BOARD_SIZE)
        .filter(|&c| board.cell(row, c).tile.as_ref().is_some_and(|t| t.owner_id == owner_id))
        .count() as u32
}

fn count_in_column(board: &Board, owner_id: i64, col: usize) -> u32 {
    (0..BOARD_SIZE)
        .filter(|&r| board.cell(r, col).tile.as_ref().is_some_and(|t| t.owner_id == owner_id))
        .count() as u32
}

fn owns(board: &Board, owner_id: i64, row: i64, col: i64) -> bool {
    Board::in_bounds(row, col)
        && board
            .cell(row as usize, col as usize)
            .tile
            .as_ref()
            .is_some_and(|t| t.owner_id == owner_id)
}

fn longest_diagonal_run(board: &Board, owner_id: i64) -> u32 {
    let mut best = 0;
    for dr_dc in [(1i64, 1i64), (1i64, -1i64)] {
        for row in 0..BOARD_SIZE as i64 {
            for col in 0..BOARD_SIZE as i64 {
                // only start counting at the head of a run
                let (pr, pc) = (row - dr_dc.0, col - dr_dc.1);
                if owns(board, owner_id, pr, pc) {
                    continue;
                }
                if !owns(board, owner_id, row, col) {
                    continue;
                }
                let mut run = 1;
                let (mut r, mut c) = (row, col);
                loop {
                    let (nr, nc) = (r + dr_dc.0, c + dr_dc.1);
                    if owns(board, owner_id, nr, nc) {
                        run += 1;
                        r = nr;
                        c = nc;
                    } else {
                        break;
                    }
                }
                best = best.max(run);
            }
        }
    }
    best
}

fn has_full_2x2_cluster(board: &Board, owner_id: i64) -> bool {
    for row in 0..BOARD_SIZE - 1 {
        for col in 0..BOARD_SIZE - 1 {
            let all_owned = [(row, col), (row, col + 1), (row + 1, col), (row + 1, col + 1)]
                .iter()
                .all(|&(r, c)| {
                    board
                        .cell(r, c)
                        .tile
                        .as_ref()
                        .is_some_and(|t| t.owner_id == owner_id)
                });
            if all_owned {
                return true;
            }
        }
    }
    false
}

fn is_all_connected(board: &Board, owner_tiles: &[(usize, usize)]) -> bool {
    if owner_tiles.len() <= 1 {
        return true;
    }
    let set: BTreeSet<(usize, usize)> = owner_tiles.iter().copied().collect();
    let mut seen = BTreeSet::new();
    let mut stack = vec![owner_tiles[0]];
    seen.insert(owner_tiles[0]);
    while let Some((r, c)) = stack.pop() {
        for n in Board::orthogonal_neighbors(r, c) {
            if set.contains(&n) && !seen.contains(&n) {
                seen.insert(n);
                stack.push(n);
            }
        }
    }
    seen.len() == set.len()
}

/// Whether `condition` is satisfied by a player's final board footprint,
/// worker placements and leftover resources.
pub fn condition_met(
    condition: &BlueprintCondition,
    board: &Board,
    owner_id: i64,
    workers: &WorkerPool,
    resources: &Resources,
) -> bool {
    let mine = owner_tiles(board, owner_id);

    match condition {
        BlueprintCondition::PalaceAdjacent { min_count } => {
            tiles_adjacent_to_palace(board, &mine).len() as u32 >= *min_count
        }
        BlueprintCondition::PalaceSurround { directions } => palace_cells(board).iter().any(|&(r, c)| {
            Board::orthogonal_neighbors(r, c)
                .iter()
                .filter(|&&(nr, nc)| owns(board, owner_id, nr as i64, nc as i64))
                .count() as u32
                >= *directions
        }),
        BlueprintCondition::PalaceAdjacentCategory { category, min_count } => {
            tiles_adjacent_to_palace(board, &mine)
                .into_iter()
                .filter(|&(r, c)| category_of(board, r, c) == Some(*category))
                .count() as u32
                >= *min_count
        }
        BlueprintCondition::CategoryCount { category, min_count } => {
            mine.iter()
                .filter(|&&(r, c)| category_of(board, r, c) == Some(*category))
                .count() as u32
                >= *min_count
        }
        BlueprintCondition::DiverseCategories { min_types } => {
            let distinct: BTreeSet<TileCategory> = mine
                .iter()
                .filter_map(|&(r, c)| category_of(board, r, c))
                .collect();
            distinct.len() as u32 >= *min_types
        }
        BlueprintCondition::TileCount { min_count } => mine.len() as u32 >= *min_count,
        BlueprintCondition::RowCount { min_count } => {
            (0..BOARD_SIZE).any(|row| count_in_row(board, owner_id, row) >= *min_count)
        }
        BlueprintCondition::ColumnCount { min_count } => {
            (0..BOARD_SIZE).any(|col| count_in_column(board, owner_id, col) >= *min_count)
        }
        BlueprintCondition::DiagonalCount { min_count } => {
            longest_diagonal_run(board, owner_id) >= *min_count
        }
        BlueprintCondition::Cluster2x2 => has_full_2x2_cluster(board, owner_id),
        BlueprintCondition::CornerCount { min_count } => {
            corner_cells()
                .iter()
                .filter(|&&(r, c)| owns(board, owner_id, r as i64, c as i64))
                .count() as u32
                >= *min_count
        }
        BlueprintCondition::CenterCount { min_count } => {
            let center = BOARD_SIZE / 2;
            mine.iter()
                .filter(|&&(r, c)| r.abs_diff(center) <= 1 && c.abs_diff(center) <= 1)
                .count() as u32
                >= *min_count
        }
        BlueprintCondition::FengshuiCount { min_count } => {
            mine.iter()
                .filter(|&&(r, c)| board.cell(r, c).tile.as_ref().is_some_and(|t| t.fengshui_active))
                .count() as u32
                >= *min_count
        }
        BlueprintCondition::AllWorkersPlaced => {
            workers.apprentices.available == 0 && workers.officials.available == 0
        }
        BlueprintCondition::ResourcesUnder { max_total } => resources.total() <= *max_total,
        BlueprintCondition::AllConnected => !mine.is_empty() && is_all_connected(board, &mine),
        BlueprintCondition::BalancedCategories { categories, min_each } => {
            categories.iter().all(|cat| {
                mine.iter()
                    .filter(|&&(r, c)| category_of(board, r, c) == Some(*cat))
                    .count() as u32
                    >= *min_each
            })
        }
    }
}

/// Bonus points `card` contributes given this final state; 0 if unmet.
pub fn evaluate(
    card: &BlueprintCard,
    board: &Board,
    owner_id: i64,
    workers: &WorkerPool,
    resources: &Resources,
) -> u32 {
    if condition_met(&card.condition, board, owner_id, workers, resources) {
        card.bonus_points
    } else {
        0
    }
}

pub fn get(blueprint_id: &str) -> Option<&'static BlueprintCard> {
    catalog::ALL.iter().find(|c| c.blueprint_id == blueprint_id)
}

/// Shuffle all blueprint ids and deal `cards_per_player` to each of
/// `num_players` hands, using `rng` for the shuffle.
pub fn deal_blueprints(
    num_players: usize,
    cards_per_player: usize,
    rng: &mut impl rand::Rng,
) -> Vec<Vec<&'static str>> {
    use rand::seq::SliceRandom;
    let mut ids: Vec<&'static str> = catalog::ALL.iter().map(|c| c.blueprint_id).collect();
    ids.shuffle(rng);

    ids.chunks(cards_per_player)
        .take(num_players)
        .map(|chunk| chunk.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PlacedTile;

    const OWNER: i64 = 1;

    fn place(board: &mut Board, row: usize, col: usize, tile_id: &str, owner_id: i64) {
        board.cell_mut(row, col).tile = Some(PlacedTile {
            tile_id: tile_id.to_string(),
            owner_id,
            placed_workers: vec![],
            fengshui_active: false,
        });
    }

    #[test]
    fn catalog_has_exactly_24_entries() {
        assert_eq!(catalog::ALL.len(), 24);
    }

    #[test]
    fn catalog_has_six_of_each_category() {
        let count = |cat: BlueprintCategory| {
            catalog::ALL.iter().filter(|c| c.category == cat).count()
        };
        assert_eq!(count(BlueprintCategory::PalaceProximity), 6);
        assert_eq!(count(BlueprintCategory::CategoryCollection), 6);
        assert_eq!(count(BlueprintCategory::Pattern), 6);
        assert_eq!(count(BlueprintCategory::Special), 6);
    }

    #[test]
    fn category_count_condition_counts_only_owned_tiles_of_that_category() {
        let mut board = Board::new();
        place(&mut board, 1, 1, "commercial_1", OWNER);
        place(&mut board, 1, 3, "commercial_2", OWNER);
        place(&mut board, 3, 1, "commercial_3", 2);
        let met = condition_met(
            &BlueprintCondition::CategoryCount { category: TileCategory::Commercial, min_count: 2 },
            &board,
            OWNER,
            &WorkerPool::initial(),
            &Resources::initial(),
        );
        assert!(met);
    }

    #[test]
    fn row_count_condition_requires_a_single_row_to_reach_the_threshold() {
        let mut board = Board::new();
        place(&mut board, 1, 0, "residential_1", OWNER);
        place(&mut board, 1, 1, "residential_2", OWNER);
        place(&mut board, 1, 3, "residential_3", OWNER);
        let met = condition_met(
            &BlueprintCondition::RowCount { min_count: 4 },
            &board,
            OWNER,
            &WorkerPool::initial(),
            &Resources::initial(),
        );
        assert!(!met, "only 3 of 5 cells in row 1 are owned");
    }

    #[test]
    fn cluster_2x2_requires_all_four_cells_owned() {
        let mut board = Board::new();
        place(&mut board, 1, 1, "residential_1", OWNER);
        place(&mut board, 1, 2, "residential_2", OWNER);
        place(&mut board, 2, 1, "residential_3", OWNER);
        assert!(!condition_met(
            &BlueprintCondition::Cluster2x2,
            &board,
            OWNER,
            &WorkerPool::initial(),
            &Resources::initial(),
        ));
        place(&mut board, 2, 2, "residential_4", OWNER);
        assert!(condition_met(
            &BlueprintCondition::Cluster2x2,
            &board,
            OWNER,
            &WorkerPool::initial(),
            &Resources::initial(),
        ));
    }

    #[test]
    fn palace_surround_is_met_once_the_configured_number_of_sides_are_owned() {
        let mut board = Board::new();
        place(&mut board, 3, 1, "palace_1", OWNER);
        place(&mut board, 2, 1, "residential_1", OWNER);
        place(&mut board, 3, 0, "residential_2", OWNER);
        place(&mut board, 3, 2, "residential_3", OWNER);
        // (4, 1) is left unowned: 3 of the palace's 4 orthogonal neighbors are owned.
        assert!(condition_met(
            &BlueprintCondition::PalaceSurround { directions: 3 },
            &board,
            OWNER,
            &WorkerPool::initial(),
            &Resources::initial(),
        ));
        assert!(!condition_met(
            &BlueprintCondition::PalaceSurround { directions: 4 },
            &board,
            OWNER,
            &WorkerPool::initial(),
            &Resources::initial(),
        ));
    }

    #[test]
    fn all_connected_is_false_when_two_components_exist() {
        let mut board = Board::new();
        place(&mut board, 1, 1, "residential_1", OWNER);
        place(&mut board, 3, 3, "residential_2", OWNER);
        assert!(!condition_met(
            &BlueprintCondition::AllConnected,
            &board,
            OWNER,
            &WorkerPool::initial(),
            &Resources::initial(),
        ));
    }

    #[test]
    fn all_connected_is_true_for_a_single_chain() {
        let mut board = Board::new();
        place(&mut board, 1, 1, "residential_1", OWNER);
        place(&mut board, 1, 2, "residential_2", OWNER);
        place(&mut board, 1, 3, "residential_3", OWNER);
        assert!(condition_met(
            &BlueprintCondition::AllConnected,
            &board,
            OWNER,
            &WorkerPool::initial(),
            &Resources::initial(),
        ));
    }

    #[test]
    fn resources_under_reads_the_leftover_total() {
        let board = Board::new();
        let resources = Resources::initial(); // wood=2, stone=2 -> total 4
        assert!(!condition_met(
            &BlueprintCondition::ResourcesUnder { max_total: 3 },
            &board,
            OWNER,
            &WorkerPool::initial(),
            &resources,
        ));
        let spent = resources.consume(crate::resources::ResourceKind::Wood, 2).unwrap();
        assert!(condition_met(
            &BlueprintCondition::ResourcesUnder { max_total: 3 },
            &board,
            OWNER,
            &WorkerPool::initial(),
            &spent,
        ));
    }

    #[test]
    fn all_workers_placed_requires_every_apprentice_and_official_placed() {
        let board = Board::new();
        let pool = WorkerPool::initial();
        assert!(!condition_met(
            &BlueprintCondition::AllWorkersPlaced,
            &board,
            OWNER,
            &pool,
            &Resources::initial(),
        ));
        let mut full = pool;
        for _ in 0..3 {
            full = full.place(crate::workers::WorkerKind::Apprentice).unwrap();
        }
        for _ in 0..2 {
            full = full.place(crate::workers::WorkerKind::Official).unwrap();
        }
        assert!(condition_met(
            &BlueprintCondition::AllWorkersPlaced,
            &board,
            OWNER,
            &full,
            &Resources::initial(),
        ));
    }

    #[test]
    fn deal_blueprints_gives_each_player_a_disjoint_hand() {
        let mut rng = rand::rng();
        let hands = deal_blueprints(3, 3, &mut rng);
        assert_eq!(hands.len(), 3);
        let mut seen = std::collections::BTreeSet::new();
        for hand in &hands {
            assert_eq!(hand.len(), 3);
            for id in hand {
                assert!(seen.insert(*id), "blueprint {id} dealt twice");
            }
        }
    }
}
