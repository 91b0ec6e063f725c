//! Game-state engine for a single-player mine-clearing grid puzzle.
//!
//! A [`Game`] owns a [`Board`] of [`Cell`]s. Mines are placed lazily by a [`MinePlacer`] on the
//! first reveal, keeping the revealed cell (and, while the board has room, its neighborhood)
//! clear. Rendering and input live outside this crate: callers drive the game with
//! [`Game::reveal`] and [`Game::toggle_flag`] and poll [`Game::state`] after every action.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use placer::*;
pub use tally::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod game;
mod placer;
mod tally;
mod types;

/// Smallest accepted board side.
pub const MIN_SIDE: Coord = 4;
/// Largest accepted board side.
pub const MAX_SIDE: Coord = 50;
/// Smallest accepted mine count.
pub const MIN_MINES: CellCount = 2;
/// Cells kept free of mines by the mine-count ceiling, room for the opening area.
pub const SAFE_AREA_BUFFER: CellCount = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub placer: MinePlacerKind,
    /// Fixed seed for the placer, `None` draws from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Config taken as-is, without clamping into the accepted bounds.
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            placer: MinePlacerKind::Random,
            seed: None,
        }
    }

    /// Config clamped into the accepted bounds.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        let clamped_width = width.clamp(MIN_SIDE, MAX_SIDE);
        let clamped_height = height.clamp(MIN_SIDE, MAX_SIDE);
        let max_mines = Self::max_mines_for(clamped_width, clamped_height);
        let clamped_mines = mines.clamp(MIN_MINES, max_mines);

        if (clamped_width, clamped_height, clamped_mines) != (width, height, mines) {
            log::warn!(
                "Config clamped from {}x{} with {} mines to {}x{} with {} mines",
                width,
                height,
                mines,
                clamped_width,
                clamped_height,
                clamped_mines
            );
        }
        Self::new_unchecked(clamped_width, clamped_height, clamped_mines)
    }

    pub const fn with_placer(mut self, placer: MinePlacerKind) -> Self {
        self.placer = placer;
        self
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Largest accepted mine count for a board of the given size.
    pub const fn max_mines_for(width: Coord, height: Coord) -> CellCount {
        let ceiling = mult(width, height).saturating_sub(SAFE_AREA_BUFFER);
        if ceiling < MIN_MINES { MIN_MINES } else { ceiling }
    }

    /// Mines a placer can actually fit: every cell but the safe one.
    pub const fn placeable_mines(&self) -> CellCount {
        let room = self.total_cells().saturating_sub(1);
        if self.mines < room { self.mines } else { room }
    }

    /// Check the config against the accepted bounds without changing it.
    pub fn validate(&self) -> Result<()> {
        let side = MIN_SIDE..=MAX_SIDE;
        if !side.contains(&self.width) || !side.contains(&self.height) {
            return Err(GameError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        if self.mines < MIN_MINES {
            return Err(GameError::TooFewMines(self.mines));
        }

        let max = Self::max_mines_for(self.width, self.height);
        if self.mines > max {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                max,
            });
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(20, 20, 100)
    }
}
