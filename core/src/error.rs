use thiserror::Error;

/// Rejected board operations. Losing is not an error, see [`crate::RevealOutcome::Loss`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    InvalidCoords,
    /// Mine masks must be square and at most `Coord::MAX` wide.
    #[error("Mine layout is not a supported square")]
    InvalidBoardShape,
    #[error("Game already ended, start a new one")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
