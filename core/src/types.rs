use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
///
/// Signed so that offsetting past the board edge yields a representable (but out-of-range) value.
pub type Coord = i16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Immutable `(x, y)` board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: Coord,
    pub y: Coord,
}

impl Coordinate {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// New coordinate displaced by `(dx, dy)`, not bounds-checked.
    pub const fn offset(self, dx: Coord, dy: Coord) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Chebyshev distance of exactly one, a position is never adjacent to itself.
    pub fn is_adjacent_to(self, other: Coordinate) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }

    /// Whether this coordinate lies inside a `width` x `height` board.
    pub const fn within(self, (width, height): (Coord, Coord)) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }

    pub(crate) fn to_nd_index(self) -> [usize; 2] {
        [self.x as usize, self.y as usize]
    }
}

impl From<(Coord, Coord)> for Coordinate {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = if a > 0 { a as CellCount } else { 0 };
    let b = if b > 0 { b as CellCount } else { 0 };
    a.saturating_mul(b)
}

pub const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// In-bounds 8-neighborhood of a coordinate.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coordinate,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coordinate, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&(dx, dy)) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;

            let next_item = self.center.offset(dx, dy);
            if next_item.within(self.bounds) {
                return Some(next_item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(DISPLACEMENTS.len() - usize::from(self.index)))
    }
}
