#![no_std]

extern crate alloc;

use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use controller::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use hint::*;
pub use schedule::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod controller;
mod engine;
mod error;
mod game;
mod generator;
mod hint;
mod schedule;
mod session;
mod types;

/// Board dimensions and difficulty for one session. Always valid once constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelConfig")]
pub struct LevelConfig {
    size: Coord,
    mine_count: CellCount,
    lives_allowed: u8,
}

#[derive(Deserialize)]
struct RawLevelConfig {
    size: Coord,
    mine_count: CellCount,
    lives_allowed: u8,
}

impl TryFrom<RawLevelConfig> for LevelConfig {
    type Error = GameError;

    fn try_from(raw: RawLevelConfig) -> Result<Self> {
        Self::new(raw.size, raw.mine_count, raw.lives_allowed)
    }
}

impl LevelConfig {
    pub fn new(size: Coord, mine_count: CellCount, lives_allowed: u8) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidConfiguration("board size must be positive"));
        }
        if mine_count >= square(size) {
            return Err(GameError::InvalidConfiguration(
                "mine count must be lower than the number of cells",
            ));
        }
        if lives_allowed == 0 {
            return Err(GameError::InvalidConfiguration("at least one life is required"));
        }
        Ok(Self {
            size,
            mine_count,
            lives_allowed,
        })
    }

    /// Parses and validates a JSON level description such as
    /// `{"size": 8, "mine_count": 12, "lives_allowed": 3}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            log::warn!("Rejected level configuration: {}", err);
            GameError::InvalidConfiguration("malformed level configuration")
        })
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn lives_allowed(&self) -> u8 {
        self.lives_allowed
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Level::Beginner.config()
    }
}

/// Difficulty presets offered to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Medium,
    Expert,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Medium, Level::Expert];

    pub const fn config(self) -> LevelConfig {
        let (size, mine_count, lives_allowed) = match self {
            Self::Beginner => (4, 2, 2),
            Self::Medium => (8, 12, 3),
            Self::Expert => (12, 30, 3),
        };
        LevelConfig {
            size,
            mine_count,
            lives_allowed,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Medium => "medium",
            Self::Expert => "expert",
        }
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::InvalidConfiguration("unknown level"))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Unchanged,
    Revealed,
    HitMine,
    Won,
    Lost,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Unchanged,
    Flagged,
    Unflagged,
    Won,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    Unchanged,
    Armed,
    Previewing,
}

impl HintOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}
