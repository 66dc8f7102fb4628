use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use super::*;

/// Places a predetermined layout, for scripted boards and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedMinePlacer {
    mines: Vec<Coord2>,
}

impl FixedMinePlacer {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacer for FixedMinePlacer {
    fn place(&mut self, board: &mut Board, mine_count: CellCount, excluded: Coord2) -> Result<()> {
        let excluded = board.validate_coords(excluded)?;
        check_capacity(board, mine_count)?;

        if self.mines.len() != usize::from(mine_count) {
            return Err(GameError::InvalidConfiguration(
                "layout does not match the mine count",
            ));
        }
        let mut seen = BTreeSet::new();
        for &coords in &self.mines {
            board.validate_coords(coords)?;
            if !seen.insert(coords) {
                return Err(GameError::InvalidConfiguration("layout repeats a mine"));
            }
            if coords == excluded {
                return Err(GameError::InvalidConfiguration(
                    "layout puts a mine on the first revealed cell",
                ));
            }
        }

        for &coords in &self.mines {
            board.set_mine(coords);
        }
        Ok(())
    }
}
