use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places mines on a fresh board, never on `excluded`.
///
/// Implementations must check every precondition before touching the board so that a failed
/// placement leaves it mine-free.
pub trait MinePlacer {
    fn place(&mut self, board: &mut Board, mine_count: CellCount, excluded: Coord2) -> Result<()>;
}

fn check_capacity(board: &Board, mine_count: CellCount) -> Result<()> {
    if mine_count >= board.total_cells() {
        log::warn!(
            "Refusing to place {} mines on a board with {} cells",
            mine_count,
            board.total_cells()
        );
        return Err(GameError::InvalidConfiguration(
            "mine count must be lower than the number of cells",
        ));
    }
    if board.mine_count() != 0 {
        return Err(GameError::InvalidConfiguration("board already has mines"));
    }
    Ok(())
}
