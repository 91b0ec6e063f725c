use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board size {width}x{height}")]
    InvalidSize { width: Coord, height: Coord },
    #[error("Too few mines: {0}")]
    TooFewMines(CellCount),
    #[error("Too many mines: requested {requested} but at most {max} fit")]
    TooManyMines { requested: CellCount, max: CellCount },
    #[error("Invalid config: {0}")]
    Config(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
