use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No round in progress, moves are not accepted")]
    NotPlaying,
    #[error("Round has not finished yet")]
    NotFinished,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Target is not adjacent")]
    NotAdjacent,
    #[error("Target cell is blocked")]
    Blocked,
    #[error("Target cell is already occupied")]
    Occupied,
    #[error("No moves left this turn")]
    NoMovesLeft,
    #[error("Moves remaining, the turn cannot end yet")]
    MovesRemaining,
    #[error("Goal cannot share a cell with the player start")]
    GoalOnStart,
}

pub type Result<T> = core::result::Result<T, GameError>;
