use serde::{Deserialize, Serialize};

use crate::*;

/// Visibility and content of a single board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Hidden, no mine.
    #[default]
    Empty,
    /// Hidden, has a mine.
    Mine,
    /// Shown, no mine.
    Revealed,
    /// Shown, detonated mine.
    ExplodedMine,
    /// Hidden, has a mine, flagged.
    FlaggedMine,
    /// Hidden, no mine, flagged.
    FalseFlag,
    /// Out-of-bounds sentinel, never stored in a board.
    Invalid,
}

impl CellState {
    pub const fn has_mine(self) -> bool {
        matches!(self, Self::Mine | Self::FlaggedMine | Self::ExplodedMine)
    }

    /// Undetonated mine, flagged or not. These are what neighbor numbers count.
    pub const fn is_armed(self) -> bool {
        matches!(self, Self::Mine | Self::FlaggedMine)
    }

    /// Whether the player still sees a covered cell.
    pub const fn is_hidden(self) -> bool {
        matches!(
            self,
            Self::Empty | Self::Mine | Self::FlaggedMine | Self::FalseFlag
        )
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::FlaggedMine | Self::FalseFlag)
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// One position of the board, owned by the [`Board`] at a fixed location.
///
/// The state only moves through the transition methods below, which is what keeps
/// [`CellState::Invalid`] out of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    location: Coordinate,
    state: CellState,
}

impl Cell {
    pub(crate) const INVALID: Cell = Cell {
        location: Coordinate::new(-1, -1),
        state: CellState::Invalid,
    };

    pub(crate) const fn new(location: Coordinate) -> Self {
        Self {
            location,
            state: CellState::Empty,
        }
    }

    pub const fn location(&self) -> Coordinate {
        self.location
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Number of mine-bearing neighbors, recomputed from the board on every call.
    ///
    /// Flagged mines count as mines so the number does not change when the player flags one.
    pub fn adjacent_mine_count(&self, board: &Board) -> u8 {
        if !self.state.is_valid() {
            return 0;
        }
        board.adjacent_mine_count(self.location)
    }

    /// Whether both cells sit next to each other, a cell is never adjacent to itself.
    pub fn adjacent_to(&self, other: &Cell) -> bool {
        self.location.is_adjacent_to(other.location)
    }

    /// Flag or unflag a hidden cell, returns `false` when nothing changed.
    pub fn toggle_flag(&mut self) -> bool {
        use CellState::*;

        let next = match self.state {
            Mine => FlaggedMine,
            Empty => FalseFlag,
            FalseFlag => Empty,
            FlaggedMine => Mine,
            Revealed | ExplodedMine | Invalid => return false,
        };
        self.state = next;
        true
    }

    /// Arm this cell, a flag placed beforehand stays on it.
    pub(crate) fn place_mine(&mut self) -> bool {
        use CellState::*;

        match self.state {
            Empty => self.state = Mine,
            FalseFlag => self.state = FlaggedMine,
            _ => return false,
        }
        true
    }

    /// Single-cell part of a reveal: `Empty -> Revealed`, `Mine -> ExplodedMine`.
    ///
    /// Cascading and the loss reveal are driven by [`Board::reveal`].
    pub(crate) fn open(&mut self) -> bool {
        use CellState::*;

        match self.state {
            Empty => self.state = Revealed,
            Mine => self.state = ExplodedMine,
            _ => return false,
        }
        true
    }

    /// Loss reveal transition: hidden safe cells open, every remaining mine detonates.
    pub(crate) fn expose(&mut self) -> bool {
        use CellState::*;

        match self.state {
            Empty | FalseFlag => self.state = Revealed,
            Mine => self.state = ExplodedMine,
            _ => return false,
        }
        true
    }
}
