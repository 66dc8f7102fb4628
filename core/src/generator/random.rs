use alloc::vec;
use rand::prelude::*;

use super::*;

/// Uniform placement over every cell except the excluded one, reproducible from a seed.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    rng: SmallRng,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(&mut self, board: &mut Board, mine_count: CellCount, excluded: Coord2) -> Result<()> {
        let excluded = board.validate_coords(excluded)?;
        check_capacity(board, mine_count)?;

        let size = usize::from(board.size());
        let total_cells = usize::from(board.total_cells());
        let mut taken = vec![false; total_cells];
        taken[usize::from(excluded.0) * size + usize::from(excluded.1)] = true;
        let mut free_cells = total_cells - 1;

        for _ in 0..mine_count {
            let place = self.rng.random_range(0..free_cells);
            let Some(index) = taken
                .iter()
                .enumerate()
                .filter(|&(_, &is_taken)| !is_taken)
                .map(|(index, _)| index)
                .nth(place)
            else {
                log::warn!(
                    "Ran out of free cells after {} of {} mines",
                    total_cells - 1 - free_cells,
                    mine_count
                );
                break;
            };

            taken[index] = true;
            free_cells -= 1;
            board.set_mine(((index / size) as Coord, (index % size) as Coord));
        }

        log::debug!("Placed {} mines avoiding {:?}", board.mine_count(), excluded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_count_and_never_on_excluded() {
        for seed in 0..64 {
            let mut board = Board::new(4);
            let excluded = ((seed % 4) as Coord, (seed / 16) as Coord);
            RandomMinePlacer::new(seed).place(&mut board, 15, excluded).unwrap();

            assert_eq!(board.mine_count(), 15);
            assert_eq!(board.iter_coords().filter(|&pos| board.has_mine_at(pos)).count(), 15);
            assert!(!board.has_mine_at(excluded), "seed {seed} mined the excluded cell");
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let mut first = Board::new(8);
        let mut second = Board::new(8);
        RandomMinePlacer::new(7).place(&mut first, 12, (3, 3)).unwrap();
        RandomMinePlacer::new(7).place(&mut second, 12, (3, 3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn too_many_mines_is_rejected_without_mutation() {
        let mut board = Board::new(3);
        let result = RandomMinePlacer::new(1).place(&mut board, 9, (0, 0));
        assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
        assert_eq!(board, Board::new(3));
    }

    #[test]
    fn excluded_outside_board_is_rejected() {
        let mut board = Board::new(3);
        let result = RandomMinePlacer::new(1).place(&mut board, 2, (3, 0));
        assert_eq!(result, Err(GameError::OutOfBounds));
    }
}
