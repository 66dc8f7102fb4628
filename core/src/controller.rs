use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end needs to redraw the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: LevelConfig,
    pub cells: Array2<CellView>,
    pub state: GameState,
    pub face: Face,
    pub lives_remaining: u8,
    pub hints_remaining: u8,
    pub hint_active: bool,
    pub suspended: bool,
    pub elapsed_seconds: u32,
}

impl Snapshot {
    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

/// Entry point for a presentation adapter: routes input events to the game and hands back a
/// fresh [`Snapshot`] after each one.
#[derive(Clone, Debug)]
pub struct Controller<P = RandomMinePlacer> {
    game: Game<P>,
}

impl Controller<RandomMinePlacer> {
    pub fn with_seed(config: LevelConfig, seed: u64) -> Self {
        Self::new(Game::with_seed(config, seed))
    }
}

impl<P: MinePlacer> Controller<P> {
    pub fn new(game: Game<P>) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game<P> {
        &self.game
    }

    /// Reveals the cell, or spends the armed hint on it.
    pub fn on_primary_activate(&mut self, coords: Coord2) -> Result<Snapshot> {
        if self.game.hints().is_active() {
            self.game.apply_hint(coords)?;
        } else {
            self.game.reveal(coords)?;
        }
        Ok(self.snapshot())
    }

    pub fn on_secondary_activate(&mut self, coords: Coord2) -> Result<Snapshot> {
        self.game.toggle_flag(coords)?;
        Ok(self.snapshot())
    }

    pub fn on_hint_request(&mut self) -> Snapshot {
        self.game.arm_hint();
        self.snapshot()
    }

    pub fn on_difficulty_change(&mut self, config: LevelConfig) -> Snapshot {
        self.game.reset_with(config);
        self.snapshot()
    }

    pub fn on_restart(&mut self) -> Snapshot {
        self.game.reset();
        self.snapshot()
    }

    /// Feeds wall-clock time to the game; `None` when nothing changed.
    pub fn on_tick(&mut self, elapsed: Duration) -> Option<Snapshot> {
        self.game.advance(elapsed).then(|| self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        let game = &self.game;
        let board = game.board();
        let size = usize::from(board.size());
        let cells = Array2::from_shape_fn((size, size), |(row, col)| {
            board
                .cell_at((row as Coord, col as Coord))
                .map(Cell::view)
                .unwrap_or(CellView {
                    content: CellContent::Empty,
                    visibility: Visibility::Hidden,
                })
        });
        let session = game.session();

        Snapshot {
            config: *game.config(),
            cells,
            state: session.state(),
            face: game.face(),
            lives_remaining: session.lives_remaining(),
            hints_remaining: game.hints().remaining(),
            hint_active: game.hints().is_active(),
            suspended: session.is_suspended(),
            elapsed_seconds: session.elapsed_seconds(),
        }
    }
}
