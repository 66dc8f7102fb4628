use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cells, owned by a single game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord,
    mine_count: CellCount,
}

impl Board {
    pub fn new(size: Coord) -> Self {
        Self {
            cells: Array2::default((size, size).to_nd_index()),
            size,
            mine_count: 0,
        }
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    /// Mines currently on the board, zero until placement happened.
    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn cell_at_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self.cells[coords.to_nd_index()])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::neighbors(coords, self.size)
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()].mine
    }

    pub fn set_mine(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.mine {
            cell.mine = true;
            self.mine_count += 1;
        }
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.has_mine_at(pos))
            .count() as u8
    }

    /// Stores the neighbor mine count on every non-mine cell.
    pub fn compute_adjacency_counts(&mut self) {
        for coords in self.iter_coords() {
            if self.has_mine_at(coords) {
                continue;
            }
            let count = self.count_adjacent_mines(coords);
            self.cells[coords.to_nd_index()].adjacent_mines = count;
        }
    }

    /// Shows every mine, used for the loss display.
    pub(crate) fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.mine) {
            cell.revealed = true;
        }
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }
}
