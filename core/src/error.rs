use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside of the board")]
    OutOfBounds,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Input is not accepted in the current game phase")]
    InvalidStateTransition,
}

pub type Result<T> = core::result::Result<T, GameError>;
