use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
}

impl CellState {
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}
