use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement from a seed, optionally keeping one cell free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    exclude: Option<Coord2>,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, exclude: Option<Coord2>) -> Self {
        Self { seed, exclude }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: &GameConfig) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        place_mines_with(&mut rng, config.size, config.mines, self.exclude)
    }
}

/// Chooses `mines` distinct cells uniformly at random, never `exclude`.
///
/// Cells are drawn from a shrinking candidate list, so a board where every cell but the excluded one is a mine costs
/// the same as a sparse one.
pub fn place_mines_with<R: Rng + ?Sized>(
    rng: &mut R,
    size: Coord2,
    mines: CellCount,
    exclude: Option<Coord2>,
) -> MineLayout {
    let (x_end, y_end) = size;
    let mut candidates: Vec<Coord2> = (0..y_end)
        .flat_map(|y| (0..x_end).map(move |x| (x, y)))
        .filter(|&coords| Some(coords) != exclude)
        .collect();

    let mut mines = usize::from(mines);
    if mines > candidates.len() {
        log::warn!(
            "Minefield already full, requested {} mines but only {} cells are free",
            mines,
            candidates.len()
        );
        mines = candidates.len();
    }

    let mut mine_mask: ndarray::Array2<bool> = ndarray::Array2::default(size.to_nd_index());
    for _ in 0..mines {
        let pick = rng.random_range(0..candidates.len());
        let coords = candidates.swap_remove(pick);
        mine_mask[coords.to_nd_index()] = true;
    }

    log::debug!(
        "Placed {} mines on a {}x{} board, excluded: {:?}",
        mines,
        size.0,
        size.1,
        exclude
    );
    MineLayout::from_mine_mask(mine_mask)
}
