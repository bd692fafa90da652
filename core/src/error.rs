use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("A board needs at least one mine")]
    NoMines,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game is paused")]
    Paused,
    #[error("No game in progress")]
    NotPlaying,
}

pub type Result<T> = core::result::Result<T, GameError>;
