#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board dimensions, mine count and placement policy for one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    /// Place mines on the first reveal, never under the revealed cell.
    pub deferred_placement: bool,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount, deferred_placement: bool) -> Self {
        Self {
            size,
            mines,
            deferred_placement,
        }
    }

    pub fn new(size: Coord2, mines: CellCount, deferred_placement: bool) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines, deferred_placement))
    }

    /// Builds a config from raw text fields as typed into a settings form.
    pub fn from_fields(
        width: &str,
        height: &str,
        mines: &str,
        deferred_placement: bool,
    ) -> Result<Self> {
        let width = parse_dimension(width, "width")?;
        let height = parse_dimension(height, "height")?;
        let mines: u32 = mines
            .trim()
            .parse()
            .map_err(|_| GameError::MalformedNumber("mine count"))?;
        let mines = CellCount::try_from(mines).map_err(|_| GameError::TooManyMines)?;
        Self::new((width, height), mines, deferred_placement)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 10), 10, true)
    }
}

fn parse_dimension(text: &str, field: &'static str) -> Result<Coord> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| GameError::MalformedNumber(field))?;
    match Coord::try_from(value) {
        Ok(0) | Err(_) => Err(GameError::InvalidSize),
        Ok(value) => Ok(value),
    }
}

/// The mine set of a board, fixed once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        if layout.safe_cell_count() == 0 {
            return Err(GameError::TooManyMines);
        }
        Ok(layout)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (x as Coord, y as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines among the in-bounds 8 neighbors of `coords`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_adjacent_mines(coords))
    }

    pub(crate) fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// Every mine position, row by row.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        let (x_end, y_end) = self.size();
        (0..y_end)
            .flat_map(|y| (0..x_end).map(move |x| (x, y)))
            .filter(|&coords| self[coords])
            .collect()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// A cell opened by a reveal, with the number to display on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub coords: Coord2,
    pub adjacent_mines: u8,
}

/// Final report produced once, when the game is won or lost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub won: bool,
    /// Every mine on the board, for the final disclosure.
    pub mines: Vec<Coord2>,
    /// Flags that sit on a mine. Flags on safe cells are not counted.
    pub found: CellCount,
    pub total: CellCount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Flagged or already revealed cell.
    NoChange,
    Revealed(Vec<CellUpdate>),
    GameOver {
        /// Cells opened by the final reveal, empty when a mine was hit.
        updates: Vec<CellUpdate>,
        summary: GameSummary,
    },
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub fn updates(&self) -> &[CellUpdate] {
        match self {
            Self::NoChange => &[],
            Self::Revealed(updates) | Self::GameOver { updates, .. } => updates,
        }
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        match self {
            Self::GameOver { summary, .. } => Some(summary),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    /// The cell is already revealed.
    Rejected,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_and_full_boards() {
        assert_eq!(GameConfig::new((0, 5), 0, true), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new((5, 0), 0, true), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new((3, 3), 9, false), Err(GameError::TooManyMines));
        assert!(GameConfig::new((3, 3), 8, false).is_ok());
        assert!(GameConfig::new((3, 3), 0, false).is_ok());
    }

    #[test]
    fn config_from_fields_parses_trimmed_numbers() {
        let config = GameConfig::from_fields(" 16 ", "8", "20\n", false).unwrap();
        assert_eq!(config.size, (16, 8));
        assert_eq!(config.mines, 20);
        assert!(!config.deferred_placement);
        assert_eq!(config.safe_cells(), 108);
    }

    #[test]
    fn config_from_fields_reports_malformed_text() {
        assert_eq!(
            GameConfig::from_fields("ten", "10", "10", true),
            Err(GameError::MalformedNumber("width"))
        );
        assert_eq!(
            GameConfig::from_fields("10", "", "10", true),
            Err(GameError::MalformedNumber("height"))
        );
        assert_eq!(
            GameConfig::from_fields("10", "10", "-1", true),
            Err(GameError::MalformedNumber("mine count"))
        );
    }

    #[test]
    fn config_from_fields_checks_ranges() {
        assert_eq!(
            GameConfig::from_fields("-3", "10", "1", true),
            Err(GameError::InvalidSize)
        );
        assert_eq!(
            GameConfig::from_fields("256", "10", "1", true),
            Err(GameError::InvalidSize)
        );
        assert_eq!(
            GameConfig::from_fields("10", "10", "100", true),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            GameConfig::from_fields("10", "10", "70000", true),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn config_errors_are_classified() {
        assert!(GameError::InvalidSize.is_config_error());
        assert!(GameError::MalformedNumber("width").is_config_error());
        assert!(!GameError::InvalidCoords.is_config_error());
        assert!(!GameError::AlreadyEnded.is_config_error());
    }

    #[test]
    fn layout_counts_neighbors_without_center() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (1, 1), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.adjacent_mine_count((1, 1)), Ok(2));
        assert_eq!(layout.adjacent_mine_count((0, 2)), Ok(1));
        assert_eq!(layout.adjacent_mine_count((1, 0)), Ok(2));
        assert_eq!(layout.adjacent_mine_count((3, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn layout_surrounded_cell_counts_eight() {
        let mines: Vec<_> = (0..3)
            .flat_map(|y| (0..3).map(move |x| (x, y)))
            .filter(|&c| c != (1, 1))
            .collect();
        let layout = MineLayout::from_mine_coords((3, 3), &mines).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), Ok(8));
    }

    #[test]
    fn layout_rejects_bad_coords_and_full_boards() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn layout_lists_mines_row_by_row() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(2, 0), (0, 1), (2, 0)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.mine_coords(), [(2, 0), (0, 1)]);
    }

    #[test]
    fn outcomes_serialize_for_front_ends() {
        let outcome = RevealOutcome::Revealed(alloc::vec![CellUpdate {
            coords: (1, 2),
            adjacent_mines: 3,
        }]);

        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(
            json,
            r#"{"Revealed":[{"coords":[1,2],"adjacent_mines":3}]}"#
        );
    }
}
