//! The fixed 5x5 board: terrain, placed tiles, and placed workers.

use serde::{Deserialize, Serialize};

use crate::workers::WorkerKind;

pub const BOARD_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Normal,
    Mountain,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWorker {
    pub player_user_id: i64,
    pub worker_kind: WorkerKind,
    pub slot_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile_id: String,
    pub owner_id: i64,
    pub placed_workers: Vec<PlacedWorker>,
    pub fengshui_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub terrain: Terrain,
    pub tile: Option<PlacedTile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cells: Vec<Cell>,
}

impl Board {
    /// Corners are mountains, the center is water, everything else is normal
    /// terrain; fixed for the lifetime of the game.
    pub fn new() -> Self {
        let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        let last = BOARD_SIZE - 1;
        let center = BOARD_SIZE / 2;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let terrain = if (row == 0 || row == last) && (col == 0 || col == last) {
                    Terrain::Mountain
                } else if row == center && col == center {
                    Terrain::Water
                } else {
                    Terrain::Normal
                };
                cells.push(Cell {
                    row,
                    col,
                    terrain,
                    tile: None,
                });
            }
        }
        Board { cells }
    }

    pub fn in_bounds(row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * BOARD_SIZE + col]
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * BOARD_SIZE + col]
    }

    /// The four orthogonal neighbors that exist on the board.
    pub fn orthogonal_neighbors(row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        let (r, c) = (row as i64, col as i64);
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let (nr, nc) = (r + dr, c + dc);
            if Self::in_bounds(nr, nc) {
                out.push((nr as usize, nc as usize));
            }
        }
        out
    }

    /// All cells in the 3x3 block centered on `(row, col)`, including the
    /// center cell itself, clipped to the board.
    pub fn neighborhood_3x3(row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(9);
        let (r, c) = (row as i64, col as i64);
        for dr in -1..=1 {
            for dc in -1..=1 {
                let (nr, nc) = (r + dr, c + dc);
                if Self::in_bounds(nr, nc) {
                    out.push((nr as usize, nc as usize));
                }
            }
        }
        out
    }

    pub fn placed_tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.tile.is_some()).count()
    }

    pub fn non_mountain_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.terrain != Terrain::Mountain)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_mountains_and_center_is_water() {
        let board = Board::new();
        assert_eq!(board.cell(0, 0).terrain, Terrain::Mountain);
        assert_eq!(board.cell(0, 4).terrain, Terrain::Mountain);
        assert_eq!(board.cell(4, 0).terrain, Terrain::Mountain);
        assert_eq!(board.cell(4, 4).terrain, Terrain::Mountain);
        assert_eq!(board.cell(2, 2).terrain, Terrain::Water);
        assert_eq!(board.cell(2, 1).terrain, Terrain::Normal);
    }

    #[test]
    fn orthogonal_neighbors_clip_at_edges() {
        let neighbors = Board::orthogonal_neighbors(0, 0);
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn neighborhood_3x3_includes_center() {
        let block = Board::neighborhood_3x3(2, 2);
        assert!(block.contains(&(2, 2)));
        assert_eq!(block.len(), 9);
    }

    #[test]
    fn neighborhood_3x3_clips_at_corner() {
        let block = Board::neighborhood_3x3(0, 0);
        assert_eq!(block.len(), 4);
    }
}
