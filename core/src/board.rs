use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only sentinel handed out for out-of-range lookups.
static INVALID_CELL: Cell = Cell::INVALID;

/// What a single reveal changed on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealSummary {
    /// Safe cells that went from hidden to revealed, cascade and loss reveal included.
    pub revealed: CellCount,
    /// The target held a mine.
    pub detonated: bool,
}

impl RevealSummary {
    pub const fn has_update(self) -> bool {
        self.detonated || self.revealed > 0
    }
}

/// Width x height grid of cells, indexed by `[x, y]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
}

impl Board {
    pub fn new(config: GameConfig) -> Self {
        let shape = (config.width.max(0) as usize, config.height.max(0) as usize);
        let cells = Array2::from_shape_fn(shape, |(x, y)| {
            Cell::new(Coordinate::new(x as Coord, y as Coord))
        });
        Self { config, cells }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> (Coord, Coord) {
        (self.config.width, self.config.height)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.config.width, self.config.height)
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        at.within(self.size())
    }

    /// Cell at `at`, or the shared invalid sentinel when `at` is off the board.
    pub fn cell_at(&self, at: Coordinate) -> &Cell {
        match self.get(at) {
            Some(cell) => cell,
            None => {
                log::warn!("Accessed invalid cell at {}", at);
                &INVALID_CELL
            }
        }
    }

    /// Mutable access for in-range coordinates only, there is no writable sentinel.
    pub fn cell_at_mut(&mut self, at: Coordinate) -> Option<&mut Cell> {
        if self.contains(at) {
            self.cells.get_mut(at.to_nd_index())
        } else {
            log::warn!("Accessed invalid cell at {}", at);
            None
        }
    }

    /// Silent lookup, `None` when out of range.
    pub fn get(&self, at: Coordinate) -> Option<&Cell> {
        if self.contains(at) {
            self.cells.get(at.to_nd_index())
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_neighbors(&self, at: Coordinate) -> NeighborIter {
        NeighborIter::new(at, self.size())
    }

    pub fn count_cells(&self, predicate: impl Fn(CellState) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| predicate(cell.state()))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Number of flags on the board, right or wrong.
    pub fn used_flags(&self) -> CellCount {
        self.count_cells(CellState::is_flagged)
    }

    /// Number of mines currently on the board, detonated ones included.
    pub fn mine_count(&self) -> CellCount {
        self.count_cells(CellState::has_mine)
    }

    /// Mine and flagged-mine neighbors of `at`; zero for positions off the board.
    pub fn adjacent_mine_count(&self, at: Coordinate) -> u8 {
        if !self.contains(at) {
            return 0;
        }
        self.iter_neighbors(at)
            .filter(|&pos| self.state_at(pos).is_armed())
            .count() as u8
    }

    /// Reveal `at`, returns `false` when nothing changed.
    ///
    /// See [`Board::reveal_cells`].
    pub fn reveal(&mut self, at: Coordinate) -> bool {
        self.reveal_cells(at).has_update()
    }

    /// Reveal `at` and report what changed.
    ///
    /// - A mine detonates and the whole board is exposed: hidden safe cells (flagged or not)
    ///   become revealed and every other mine explodes.
    /// - An empty cell is revealed; if none of its neighbors hold a mine the reveal cascades
    ///   over the connected zero region and stops at its numbered border.
    /// - Anything else (already shown, flagged, off the board) is left alone.
    pub fn reveal_cells(&mut self, at: Coordinate) -> RevealSummary {
        let Some(cell) = self.cell_at_mut(at) else {
            return RevealSummary::default();
        };

        match cell.state() {
            CellState::Mine => {
                cell.open();
                log::debug!("Mine detonated at {}", at);
                RevealSummary {
                    revealed: self.expose_all(),
                    detonated: true,
                }
            }
            CellState::Empty => RevealSummary {
                revealed: self.cascade(at),
                detonated: false,
            },
            _ => RevealSummary::default(),
        }
    }

    /// Worklist flood fill from an empty cell, cell state doubles as the visited marker.
    fn cascade(&mut self, start: Coordinate) -> CellCount {
        let mut revealed = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit) = to_visit.pop_front() {
            let cell = &mut self.cells[visit.to_nd_index()];
            if cell.state() != CellState::Empty {
                continue;
            }
            cell.open();
            revealed += 1;

            let count = self.adjacent_mine_count(visit);
            log::trace!("Revealed cell at {}, mine count: {}", visit, count);

            if count == 0 {
                to_visit.extend(
                    self.iter_neighbors(visit)
                        .filter(|&pos| self.state_at(pos) == CellState::Empty),
                );
            }
        }

        revealed
    }

    /// Loss reveal over the whole grid, returns how many safe cells were opened.
    fn expose_all(&mut self) -> CellCount {
        let mut revealed = 0;
        for cell in self.cells.iter_mut() {
            let was_safe = !cell.state().has_mine();
            if cell.expose() && was_safe {
                revealed += 1;
            }
        }
        revealed
    }

    fn state_at(&self, at: Coordinate) -> CellState {
        self.get(at).map_or(CellState::Invalid, Cell::state)
    }
}
