use super::*;

/// Places mines at a predetermined list of positions.
///
/// Entries off the board or on the safe cell are skipped, as is anything past the
/// placeable mine count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedMinePlacer {
    mines: Vec<Coordinate>,
}

impl FixedMinePlacer {
    pub fn new(mines: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacer for FixedMinePlacer {
    fn place_mines(&mut self, board: &mut Board, safe: Coordinate) -> CellCount {
        let mut remaining = mines_to_place(board);
        let mut placed = 0;

        for &at in &self.mines {
            if remaining == 0 {
                break;
            }
            if at == safe {
                log::debug!("Skipping fixed mine on safe cell {}", at);
                continue;
            }
            if board.cell_at_mut(at).is_some_and(Cell::place_mine) {
                placed += 1;
                remaining -= 1;
            }
        }

        placed
    }
}
