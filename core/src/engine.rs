use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - AwaitingFirstMove -> InProgress
/// - AwaitingFirstMove -> Won
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Mines are placed by the first reveal
    #[default]
    AwaitingFirstMove,
    InProgress,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Mine set, revealed set and flag set of a single session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    config: GameConfig,
    seed: u64,
    mine_layout: Option<MineLayout>,
    board: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    phase: GamePhase,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    /// Starts a session, placing mines now unless the config defers them to the first reveal.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines, config.deferred_placement)?;
        let mut engine = Self {
            config,
            seed,
            mine_layout: None,
            board: Array2::default(config.size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            phase: GamePhase::AwaitingFirstMove,
            triggered_mine: None,
        };
        if !config.deferred_placement {
            engine.place_mines(None);
        }
        Ok(engine)
    }

    pub fn new_game(
        width: Coord,
        height: Coord,
        mine_count: CellCount,
        random_after_first_click: bool,
        seed: u64,
    ) -> Result<Self> {
        let config = GameConfig::new_unchecked((width, height), mine_count, random_after_first_click);
        Self::new(config, seed)
    }

    /// Starts a session over a known mine set.
    pub fn with_layout(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            config: GameConfig::new_unchecked(size, mine_layout.mine_count(), false),
            seed: 0,
            board: Array2::default(size.to_nd_index()),
            mine_layout: Some(mine_layout),
            revealed_count: 0,
            flagged_count: 0,
            phase: GamePhase::InProgress,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative with surplus flags
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flagged_count as isize)
    }

    /// `None` until the mines are placed.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    /// Adjacent mine count of any cell, `None` while mines are not placed yet.
    pub fn adjacent_mines(&self, coords: Coord2) -> Result<Option<u8>> {
        let coords = self.validate_coords(coords)?;
        Ok(self
            .mine_layout
            .as_ref()
            .map(|layout| layout.count_adjacent_mines(coords)))
    }

    /// Final report, available once the game has ended.
    pub fn summary(&self) -> Option<GameSummary> {
        let layout = self.mine_layout.as_ref()?;
        if !self.phase.is_finished() {
            return None;
        }

        let mines = layout.mine_coords();
        let found = mines
            .iter()
            .filter(|&&coords| self.board[coords.to_nd_index()].is_flagged())
            .count() as CellCount;
        Some(GameSummary {
            won: matches!(self.phase, GamePhase::Won),
            mines,
            found,
            total: layout.mine_count(),
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = &mut self.board[coords.to_nd_index()];
        Ok(match *cell {
            Hidden => {
                *cell = Flagged;
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Flagged => {
                *cell = Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            Revealed(_) | Exploded => FlagOutcome::Rejected,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        if self.board[coords.to_nd_index()] != CellState::Hidden {
            return Ok(RevealOutcome::NoChange);
        }

        if self.mine_layout.is_none() {
            self.place_mines(Some(coords));
        }
        let Some(layout) = self.mine_layout.as_ref() else {
            return Ok(RevealOutcome::NoChange);
        };
        let safe_cells = layout.safe_cell_count();

        if layout.contains_mine(coords) {
            log::debug!("Mine hit at {:?}", coords);
            self.board[coords.to_nd_index()] = CellState::Exploded;
            self.triggered_mine = Some(coords);
            return Ok(self.finish(false, Vec::new()));
        }

        let updates = self.expose(coords);
        log::debug!("Reveal at {:?} opened {} cells", coords, updates.len());

        if self.revealed_count == safe_cells {
            Ok(self.finish(true, updates))
        } else {
            Ok(RevealOutcome::Revealed(updates))
        }
    }

    /// Populates the mine set once, keeping `exclude` safe.
    fn place_mines(&mut self, exclude: Option<Coord2>) {
        if self.mine_layout.is_some() {
            return;
        }
        let layout = RandomMinefieldGenerator::new(self.seed, exclude).generate(&self.config);
        self.mine_layout = Some(layout);
        self.phase = GamePhase::InProgress;
    }

    /// Opens `coords` and floods outward through cells with no adjacent mines.
    ///
    /// Revealed, flagged and out-of-bounds cells are left alone, so exposing the same cell twice yields nothing the
    /// second time.
    fn expose(&mut self, coords: Coord2) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        let Some(layout) = self.mine_layout.as_ref() else {
            return updates;
        };
        if !in_bounds(coords, self.config.size) {
            return updates;
        }

        let mut to_visit = vec![coords];
        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.board[visit_coords.to_nd_index()];
            if *cell != CellState::Hidden {
                continue;
            }

            let adjacent_mines = layout.count_adjacent_mines(visit_coords);
            *cell = CellState::Revealed(adjacent_mines);
            self.revealed_count += 1;
            updates.push(CellUpdate {
                coords: visit_coords,
                adjacent_mines,
            });
            log::trace!(
                "Opened cell at {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                to_visit.extend(
                    layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.board[pos.to_nd_index()] == CellState::Hidden),
                );
            }
        }
        updates
    }

    fn finish(&mut self, won: bool, updates: Vec<CellUpdate>) -> RevealOutcome {
        self.phase = if won { GamePhase::Won } else { GamePhase::Lost };
        log::debug!("Game ended, phase: {:?}", self.phase);

        match self.summary() {
            Some(summary) => RevealOutcome::GameOver { updates, summary },
            None => RevealOutcome::Revealed(updates),
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.config.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
