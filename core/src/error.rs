use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown difficulty name")]
    InvalidDifficulty,
    #[error("Owner id must be a positive integer")]
    InvalidOwner,
    #[error("Card id is out of range")]
    InvalidId,
    #[error("Position cannot be negative")]
    NegativePosition,
    #[error("Position is outside the deck")]
    InvalidPosition,
    #[error("Game already completed, no new flips are accepted")]
    GameCompleted,
    #[error("This card cannot be flipped")]
    CardNotFlippable,
    #[error("Two cards already revealed, resolve the turn first")]
    TooManyFlipped,
    #[error("Game is not completed yet")]
    NotCompleted,
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(&'static str),
}

impl GameError {
    /// Stable machine-readable code, for callers that key on it.
    pub const fn code(self) -> &'static str {
        use GameError::*;
        match self {
            InvalidDifficulty => "INVALID_DIFFICULTY",
            InvalidOwner => "INVALID_OWNER",
            InvalidId => "INVALID_ID",
            NegativePosition => "NEGATIVE_POSITION",
            InvalidPosition => "INVALID_POSITION",
            GameCompleted => "GAME_COMPLETED",
            CardNotFlippable => "CARD_NOT_FLIPPABLE",
            TooManyFlipped => "TOO_MANY_FLIPPED",
            NotCompleted => "NOT_COMPLETED",
            InvalidSnapshot(_) => "INVALID_SNAPSHOT",
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
