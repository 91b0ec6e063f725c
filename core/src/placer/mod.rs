use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that arms a fresh board once the first cell to reveal is known.
pub trait MinePlacer {
    /// Place mines on `board`, never on `safe`, returning how many were added.
    fn place_mines(&mut self, board: &mut Board, safe: Coordinate) -> CellCount;
}

/// Placement strategy selector carried by [`GameConfig`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinePlacerKind {
    #[default]
    Random,
}

impl MinePlacerKind {
    pub fn build(self, seed: Option<u64>) -> Box<dyn MinePlacer> {
        match self {
            Self::Random => match seed {
                Some(seed) => Box::new(RandomMinePlacer::with_seed(seed)),
                None => Box::new(RandomMinePlacer::from_entropy()),
            },
        }
    }
}

/// Mines still to place on `board`, capped so one cell always stays free.
fn mines_to_place(board: &Board) -> CellCount {
    let config = board.config();
    let target = config.placeable_mines();
    if target < config.mines {
        log::warn!(
            "Board already full, requested {} mines but only fits {}",
            config.mines,
            target
        );
    }
    target.saturating_sub(board.mine_count())
}
