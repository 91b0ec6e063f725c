use rand::{Rng, SeedableRng, rngs::StdRng};

use super::*;

/// While more than this many cells are still free of mines, the neighborhood of the safe cell
/// is kept clear as well.
pub const NEIGHBORHOOD_RELAX_THRESHOLD: usize = 9;

/// Uniform placement by rejection sampling over the cells that do not hold a mine yet.
///
/// The safe cell is never armed. Its neighbors are skipped too as long as more than
/// [`NEIGHBORHOOD_RELAX_THRESHOLD`] free cells remain, so the opening reveal cascades; past that
/// point only the safe cell itself is excluded, which keeps nearly full boards terminating.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer<R = StdRng> {
    rng: R,
}

impl RandomMinePlacer {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible placement, the same seed and safe cell give the same layout.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMinePlacer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinePlacer for RandomMinePlacer<R> {
    fn place_mines(&mut self, board: &mut Board, safe: Coordinate) -> CellCount {
        let mut remaining = mines_to_place(board);
        let mut not_mined: Vec<Coordinate> = board
            .cells()
            .filter(|cell| !cell.state().has_mine())
            .map(Cell::location)
            .collect();
        let mut placed = 0;

        while remaining > 0 {
            // only the safe cell left, nothing more can go anywhere
            if not_mined.iter().all(|&at| at == safe) {
                break;
            }

            let pick = self.rng.random_range(0..not_mined.len());
            let at = not_mined[pick];
            if at == safe {
                continue;
            }
            if not_mined.len() > NEIGHBORHOOD_RELAX_THRESHOLD && at.is_adjacent_to(safe) {
                continue;
            }

            not_mined.swap_remove(pick);
            if board.cell_at_mut(at).is_some_and(Cell::place_mine) {
                placed += 1;
                remaining -= 1;
            }
        }

        log::debug!(
            "Placed {} mines around safe cell {}, {} cells left free",
            placed,
            safe,
            not_mined.len()
        );
        placed
    }
}
