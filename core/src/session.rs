use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Active
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for the first reveal, no mines placed yet
    #[default]
    NotStarted,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// No moves are accepted anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Which face the restart button shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Neutral,
    Won,
    Lost,
}

impl From<GameState> for Face {
    fn from(state: GameState) -> Self {
        match state {
            GameState::NotStarted | GameState::Active => Self::Neutral,
            GameState::Won => Self::Won,
            GameState::Lost => Self::Lost,
        }
    }
}

/// Progress counters of one playthrough.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) state: GameState,
    /// Every revealed cell, struck mines included.
    pub(crate) revealed_count: CellCount,
    pub(crate) correctly_flagged_count: CellCount,
    pub(crate) mines_hit: CellCount,
    pub(crate) elapsed_seconds: u32,
    pub(crate) lives_remaining: u8,
    /// Set while a hint preview is on screen, blocks all input.
    pub(crate) suspended: bool,
}

impl Session {
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            state: GameState::NotStarted,
            revealed_count: 0,
            correctly_flagged_count: 0,
            mines_hit: 0,
            elapsed_seconds: 0,
            lives_remaining: config.lives_allowed(),
            suspended: false,
        }
    }

    pub const fn state(&self) -> GameState {
        self.state
    }

    pub const fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub const fn correctly_flagged_count(&self) -> CellCount {
        self.correctly_flagged_count
    }

    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub const fn lives_remaining(&self) -> u8 {
        self.lives_remaining
    }

    pub const fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub(crate) fn check_accepting_input(&self) -> Result<()> {
        if self.state.is_finished() || self.suspended {
            Err(GameError::InvalidStateTransition)
        } else {
            Ok(())
        }
    }

    pub(crate) fn check_active(&self) -> Result<()> {
        self.check_accepting_input()?;
        if matches!(self.state, GameState::Active) {
            Ok(())
        } else {
            Err(GameError::InvalidStateTransition)
        }
    }

    /// Terminal state reached by the current counters, if any.
    pub(crate) fn terminal_state(&self, board: &Board) -> Option<GameState> {
        if !matches!(self.state, GameState::Active) {
            return None;
        }
        if self.lives_remaining == 0 {
            return Some(GameState::Lost);
        }
        let safe_revealed = self.revealed_count - self.mines_hit;
        if self.correctly_flagged_count == board.mine_count()
            && safe_revealed >= board.safe_cell_count()
        {
            return Some(GameState::Won);
        }
        None
    }
}
