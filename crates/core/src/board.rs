//! Board module - cell occupancy index over a tile list
//!
//! Game states store tiles as a list (tiles carry identity). The board is the
//! transient N x N view of that list used while computing a move, a spawn, or
//! terminal detection. Flat row-major storage: index = row * size + col.

use crate::state::Tile;
use crate::types::Direction;

/// Occupancy index for one game state.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: u8,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Index `tiles` by position. Tiles outside the board are ignored.
    pub fn from_tiles(size: u8, tiles: &[Tile]) -> Self {
        let n = size as usize;
        let mut cells = vec![None; n * n];
        for tile in tiles {
            if tile.row < size && tile.col < size {
                cells[tile.row as usize * n + tile.col as usize] = Some(*tile);
            }
        }
        Self { size, cells }
    }

    #[inline(always)]
    fn index(&self, row: u8, col: u8) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row as usize * self.size as usize + col as usize)
    }

    /// Tile at `(row, col)`; `None` when empty or out of bounds.
    pub fn get(&self, row: u8, col: u8) -> Option<Tile> {
        self.index(row, col).and_then(|i| self.cells[i])
    }

    pub fn value_at(&self, row: u8, col: u8) -> Option<u32> {
        self.get(row, col).map(|t| t.value)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(u8, u8)> {
        let n = self.size as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| ((i / n) as u8, (i % n) as u8))
            .collect()
    }

    /// Whether any move could change the board: an empty cell exists, or two
    /// orthogonal neighbours hold the same value.
    pub fn can_move(&self) -> bool {
        if self.occupied_count() < self.cells.len() {
            return true;
        }

        for row in 0..self.size {
            for col in 0..self.size {
                let Some(v) = self.value_at(row, col) else {
                    return true;
                };
                if col + 1 < self.size && self.value_at(row, col + 1) == Some(v) {
                    return true;
                }
                if row + 1 < self.size && self.value_at(row + 1, col) == Some(v) {
                    return true;
                }
            }
        }

        false
    }
}

/// Cell positions of every line for `direction`, each ordered from the
/// leading edge so compaction always runs toward index 0.
///
/// Left/right yield one line per row, up/down one line per column.
pub fn lines(size: u8, direction: Direction) -> Vec<Vec<(u8, u8)>> {
    let order: Vec<u8> = match direction {
        Direction::Left | Direction::Up => (0..size).collect(),
        Direction::Right | Direction::Down => (0..size).rev().collect(),
    };

    (0..size)
        .map(|fixed| {
            order
                .iter()
                .map(|&i| {
                    if direction.is_horizontal() {
                        (fixed, i)
                    } else {
                        (i, fixed)
                    }
                })
                .collect()
        })
        .collect()
}
