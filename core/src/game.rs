use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::*;

/// Overall outcome, `Win` and `Loss` are terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Win,
    Loss,
}

impl GameState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

/// Outcome of [`Game::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    Ok,
    /// Nothing changed: the cell was already shown, flagged, off the board, or the game is over.
    AlreadyRevealed,
    Exploded,
}

impl RevealResult {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::AlreadyRevealed)
    }
}

/// Outcome of [`Game::toggle_flag`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagResult {
    Ok,
    /// Nothing changed: the cell is not hidden, off the board, or the game is over.
    NotHidden,
}

impl FlagResult {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// One game from first reveal to win or loss.
///
/// Mines are not placed until the first reveal, which uses the revealed cell as the safe
/// cell. The outcome is derived from the board on every [`Game::state`] call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    board: Board,
    mines_placed: bool,
    started_at: u64,
    tally: Tally,
}

impl Game {
    pub fn new(mut config: GameConfig) -> Self {
        let placeable = config.placeable_mines();
        if config.mines > placeable {
            log::warn!(
                "Mine count {} does not fit a {}x{} board, using {}",
                config.mines,
                config.width,
                config.height,
                placeable
            );
            config.mines = placeable;
        }

        let started_at = now_secs();
        log::debug!("New {}x{} game with {} mines", config.width, config.height, config.mines);
        Self {
            config,
            board: Board::new(config),
            mines_placed: false,
            started_at,
            tally: Tally::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, at: Coordinate) -> &Cell {
        self.board.cell_at(at)
    }

    pub fn adjacent_mine_count(&self, at: Coordinate) -> u8 {
        self.board.adjacent_mine_count(at)
    }

    /// Whether the next reveal will place the mines.
    pub fn is_first_move(&self) -> bool {
        !self.mines_placed
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Unix timestamp in seconds of when the game was created.
    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    pub fn elapsed_secs(&self) -> u64 {
        now_secs().saturating_sub(self.started_at)
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Mines minus flags placed, negative when the player over-flags.
    pub fn remaining_flags(&self) -> isize {
        (self.config.mines as isize) - (self.board.used_flags() as isize)
    }

    /// Any detonated mine is a loss, every mine flagged is a win.
    ///
    /// Hidden safe cells do not block a win, and revealing every safe cell does not win on its
    /// own.
    pub fn state(&self) -> GameState {
        let mut flagged_mines: CellCount = 0;
        for cell in self.board.cells() {
            match cell.state() {
                CellState::ExplodedMine => return GameState::Loss,
                CellState::FlaggedMine => flagged_mines += 1,
                _ => {}
            }
        }

        if flagged_mines == self.config.mines {
            GameState::Win
        } else {
            GameState::Playing
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_terminal()
    }

    /// Reveal a cell, placing mines with the configured strategy if this is the first move.
    pub fn reveal(&mut self, at: Coordinate) -> RevealResult {
        if self.mines_placed {
            return self.reveal_placed(at);
        }
        let mut placer = self.config.placer.build(self.config.seed);
        self.reveal_with(at, placer.as_mut())
    }

    /// Reveal a cell, placing mines with `placer` if this is the first move.
    ///
    /// A first reveal off the board returns [`RevealResult::AlreadyRevealed`] and leaves
    /// placement pending, so the first real cell revealed is still the safe one.
    pub fn reveal_with(&mut self, at: Coordinate, placer: &mut dyn MinePlacer) -> RevealResult {
        if !self.mines_placed && !self.is_finished() {
            if !self.board.contains(at) {
                log::warn!("First reveal at invalid cell {}, mines not placed", at);
                return RevealResult::AlreadyRevealed;
            }
            let placed = placer.place_mines(&mut self.board, at);
            self.mines_placed = true;
            log::debug!("First move at {}, {} mines placed", at, placed);
        }
        self.reveal_placed(at)
    }

    fn reveal_placed(&mut self, at: Coordinate) -> RevealResult {
        if self.is_finished() {
            log::debug!("Reveal at {} ignored, game already ended", at);
            return RevealResult::AlreadyRevealed;
        }

        let summary = self.board.reveal_cells(at);
        self.tally.record_reveal(summary);

        if !summary.has_update() {
            RevealResult::AlreadyRevealed
        } else if summary.detonated {
            RevealResult::Exploded
        } else {
            RevealResult::Ok
        }
    }

    /// Flag or unflag a hidden cell.
    pub fn toggle_flag(&mut self, at: Coordinate) -> FlagResult {
        if self.is_finished() {
            log::debug!("Flag at {} ignored, game already ended", at);
            return FlagResult::NotHidden;
        }

        let Some(cell) = self.board.cell_at_mut(at) else {
            return FlagResult::NotHidden;
        };
        if !cell.toggle_flag() {
            return FlagResult::NotHidden;
        }
        if cell.state().is_flagged() {
            self.tally.record_flag();
        }
        FlagResult::Ok
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: Coord, y: Coord) -> Coordinate {
        Coordinate::new(x, y)
    }

    /// Game whose first reveal at `first` arms exactly `mines`.
    fn started_game(
        width: Coord,
        height: Coord,
        mines: &[Coordinate],
        first: Coordinate,
    ) -> (Game, RevealResult) {
        let config = GameConfig::new_unchecked(width, height, mines.len() as CellCount);
        let mut game = Game::new(config);
        let outcome = game.reveal_with(first, &mut FixedMinePlacer::new(mines.iter().copied()));
        (game, outcome)
    }

    #[test]
    fn first_reveal_places_mines_once() {
        let mut game = Game::new(GameConfig::new(8, 8, 10).with_seed(11));

        assert_eq!(game.state(), GameState::default());
        assert!(game.is_first_move());
        assert_eq!(game.board().mine_count(), 0);
        assert_eq!(game.reveal(at(4, 4)), RevealResult::Ok);
        assert!(!game.is_first_move());
        assert_eq!(game.board().mine_count(), 10);

        let mines = |game: &Game| -> Vec<bool> {
            game.board().cells().map(|cell| cell.state().has_mine()).collect()
        };
        let before = mines(&game);
        game.reveal(at(0, 0));
        assert_eq!(mines(&game), before);
    }

    #[test]
    fn first_reveal_off_the_board_keeps_placement_pending() {
        let mut game = Game::new(GameConfig::new(8, 8, 10));

        assert_eq!(game.reveal(at(8, 0)), RevealResult::AlreadyRevealed);
        assert!(game.is_first_move());
        assert_eq!(game.board().mine_count(), 0);
    }

    /// Mines that wall off the (3, 3) corner, which stays hidden after opening from (0, 0).
    const WALL: [Coordinate; 2] = [Coordinate::new(2, 3), Coordinate::new(3, 2)];

    #[test]
    fn revealing_twice_reports_already_revealed() {
        let (mut game, first) = started_game(4, 4, &WALL, at(0, 0));

        assert_eq!(first, RevealResult::Ok);
        assert_eq!(game.reveal(at(0, 0)), RevealResult::AlreadyRevealed);
        assert_eq!(game.reveal(at(1, 1)), RevealResult::AlreadyRevealed);
        assert_eq!(game.cell_at(at(3, 3)).state(), CellState::Empty);
        assert_eq!(game.tally().revealed, 13);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn hitting_a_mine_loses_and_exposes_board() {
        let (mut game, _) = started_game(4, 4, &WALL, at(0, 0));
        game.toggle_flag(at(2, 3));

        assert_eq!(game.reveal(at(3, 2)), RevealResult::Exploded);
        assert_eq!(game.state(), GameState::Loss);
        assert_eq!(game.cell_at(at(2, 3)).state(), CellState::FlaggedMine);
        assert_eq!(game.cell_at(at(3, 3)).state(), CellState::Revealed);
        assert!(
            game.board()
                .cells()
                .all(|cell| !cell.state().is_hidden() || cell.state() == CellState::FlaggedMine)
        );
        // (3, 3) was uncovered by the loss, not by the player
        assert_eq!(game.tally().revealed, 13);
        assert_eq!(game.tally().exploded, 1);
    }

    #[test]
    fn terminal_state_is_sticky() {
        let (mut game, _) = started_game(4, 4, &WALL, at(0, 0));

        assert_eq!(game.toggle_flag(at(2, 3)), FlagResult::Ok);
        assert_eq!(game.toggle_flag(at(3, 2)), FlagResult::Ok);
        assert_eq!(game.state(), GameState::Win);

        assert_eq!(game.toggle_flag(at(2, 3)), FlagResult::NotHidden);
        assert_eq!(game.reveal(at(3, 3)), RevealResult::AlreadyRevealed);
        assert_eq!(game.cell_at(at(3, 3)).state(), CellState::Empty);
        assert_eq!(game.state(), GameState::Win);
    }

    #[test]
    fn win_requires_every_mine_flagged() {
        let (mut game, _) = started_game(4, 4, &WALL, at(0, 0));

        // every safe cell revealed, mines still unflagged
        assert_eq!(game.reveal(at(3, 3)), RevealResult::Ok);
        assert_eq!(game.board().count_cells(|state| state == CellState::Empty), 0);
        assert_eq!(game.state(), GameState::Playing);

        game.toggle_flag(at(2, 3));
        assert_eq!(game.state(), GameState::Playing);
        game.toggle_flag(at(3, 2));
        assert_eq!(game.state(), GameState::Win);
    }

    #[test]
    fn win_ignores_hidden_safe_cells_and_false_flags() {
        let (mut game, _) = started_game(4, 4, &WALL, at(0, 0));

        assert_eq!(game.toggle_flag(at(3, 3)), FlagResult::Ok);
        game.toggle_flag(at(2, 3));
        game.toggle_flag(at(3, 2));

        assert_eq!(game.state(), GameState::Win);
        assert_eq!(game.cell_at(at(3, 3)).state(), CellState::FalseFlag);
        assert_eq!(game.remaining_flags(), -1);
    }

    #[test]
    fn flag_results_and_remaining_flags() {
        let (mut game, _) = started_game(4, 4, &WALL, at(0, 0));

        assert_eq!(game.remaining_flags(), 2);
        assert_eq!(game.toggle_flag(at(0, 0)), FlagResult::NotHidden);
        assert_eq!(game.toggle_flag(at(-1, 0)), FlagResult::NotHidden);
        assert_eq!(game.toggle_flag(at(2, 3)), FlagResult::Ok);
        assert_eq!(game.toggle_flag(at(3, 3)), FlagResult::Ok);
        assert_eq!(game.toggle_flag(at(1, 3)), FlagResult::NotHidden);
        assert_eq!(game.remaining_flags(), 0);

        assert_eq!(game.toggle_flag(at(3, 3)), FlagResult::Ok);
        assert_eq!(game.cell_at(at(3, 3)).state(), CellState::Empty);
        assert_eq!(game.remaining_flags(), 1);
        assert_eq!(game.tally().flagged, 2);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let (mut game, _) = started_game(4, 4, &WALL, at(0, 0));
        assert_eq!(game.toggle_flag(at(2, 3)), FlagResult::Ok);

        assert_eq!(game.reveal(at(2, 3)), RevealResult::AlreadyRevealed);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn oversized_mine_count_is_clamped() {
        let game = Game::new(GameConfig::new_unchecked(4, 4, 40));

        assert_eq!(game.config().mines, 15);
        assert_eq!(game.remaining_flags(), 15);
    }

    #[test]
    fn nearly_full_board_terminates() {
        let mut game = Game::new(GameConfig::new_unchecked(4, 4, 15).with_seed(3));

        assert_eq!(game.reveal(at(2, 2)), RevealResult::Ok);
        assert_eq!(game.board().mine_count(), 15);
        assert_eq!(game.adjacent_mine_count(at(2, 2)), 8);
        assert_eq!(game.state(), GameState::Playing);

        for cell in game.board().clone().cells() {
            if cell.state() == CellState::Mine {
                game.toggle_flag(cell.location());
            }
        }
        assert_eq!(game.state(), GameState::Win);
    }

    #[test]
    fn elapsed_time_counts_from_creation() {
        let game = Game::new(GameConfig::default());

        assert!(game.started_at() > 0);
        assert!(game.elapsed_secs() < 5);
    }
}
