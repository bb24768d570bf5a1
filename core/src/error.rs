use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must be between 1 and 255")]
    InvalidSize,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Malformed {0}, expected a whole number")]
    MalformedNumber(&'static str),
    #[error("Coordinates are outside the board")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

impl GameError {
    /// Errors that prevent a session from being created at all.
    pub const fn is_config_error(self) -> bool {
        matches!(
            self,
            Self::InvalidSize | Self::TooManyMines | Self::MalformedNumber(_)
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
