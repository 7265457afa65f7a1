//! Value types shared by the board model, the rules, and the search.
//!
//! Everything here is `Copy` so moves and coordinates can be passed around
//! freely by the generator and the search without touching the allocator.

use std::fmt;

pub use crate::game_state::game_state::{GameState, SideState};
pub use crate::game_state::undo_state::{TokenUndo, UndoToken};

/// One of the two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    X,
    O,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::X, Side::O];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::X => 0,
            Side::O => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Side::X => 'X',
            Side::O => 'O',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Zero-based `(row, column)` grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Signed `(d_row, d_col)` from `self` to `other`.
    #[inline]
    pub fn delta_to(self, other: Coord) -> (isize, isize) {
        (
            other.row as isize - self.row as isize,
            other.col as isize - self.col as isize,
        )
    }

    /// Neighbour one step away in `dir`, without any board bound above.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Coord::new(row, col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit direction for a unit delta; `None` for anything else.
    pub fn from_delta(d_row: isize, d_col: isize) -> Option<Self> {
        match (d_row, d_col) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Wall orientation. A vertical wall blocks horizontal movement and a
/// horizontal wall blocks vertical movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Vertical, Orientation::Horizontal];

    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Orientation::Vertical => 'V',
            Orientation::Horizontal => 'H',
        }
    }
}

/// A two-segment wall identified by the top-left cell of the 2x2 group it
/// separates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallPlacement {
    pub orientation: Orientation,
    pub coord: Coord,
}

impl WallPlacement {
    #[inline]
    pub const fn new(orientation: Orientation, coord: Coord) -> Self {
        Self { orientation, coord }
    }

    #[inline]
    pub const fn vertical(row: usize, col: usize) -> Self {
        Self::new(Orientation::Vertical, Coord::new(row, col))
    }

    #[inline]
    pub const fn horizontal(row: usize, col: usize) -> Self {
        Self::new(Orientation::Horizontal, Coord::new(row, col))
    }

    /// The two blocked edges in canonical form: the top/left cell of each
    /// edge plus `Right` or `Down`.
    pub fn segments(self) -> [(Coord, Direction); 2] {
        let Coord { row, col } = self.coord;
        match self.orientation {
            Orientation::Vertical => [
                (Coord::new(row, col), Direction::Right),
                (Coord::new(row + 1, col), Direction::Right),
            ],
            Orientation::Horizontal => [
                (Coord::new(row, col), Direction::Down),
                (Coord::new(row, col + 1), Direction::Down),
            ],
        }
    }

    /// True when this wall covers the edge leaving `from` in `dir`.
    pub fn blocks(self, from: Coord, dir: Direction) -> bool {
        match canonical_edge(from, dir) {
            Some(edge) => self.segments().contains(&edge),
            None => false,
        }
    }

    /// Every in-bounds wall that would cover the edge leaving `from` in `dir`
    /// on a `rows x columns` grid. At most two walls share one edge.
    pub fn covering(
        from: Coord,
        dir: Direction,
        rows: usize,
        columns: usize,
    ) -> Vec<WallPlacement> {
        let Some((cell, canonical_dir)) = canonical_edge(from, dir) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(2);
        match canonical_dir {
            Direction::Right => {
                if cell.col + 1 >= columns {
                    return out;
                }
                if cell.row >= 1 {
                    out.push(WallPlacement::vertical(cell.row - 1, cell.col));
                }
                if cell.row + 1 < rows {
                    out.push(WallPlacement::vertical(cell.row, cell.col));
                }
            }
            _ => {
                if cell.row + 1 >= rows {
                    return out;
                }
                if cell.col >= 1 {
                    out.push(WallPlacement::horizontal(cell.row, cell.col - 1));
                }
                if cell.col + 1 < columns {
                    out.push(WallPlacement::horizontal(cell.row, cell.col));
                }
            }
        }
        out
    }
}

impl fmt::Display for WallPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.orientation.symbol(), self.coord)
    }
}

/// Rewrites an edge as `(top-or-left cell, Right | Down)`.
pub fn canonical_edge(from: Coord, dir: Direction) -> Option<(Coord, Direction)> {
    match dir {
        Direction::Right | Direction::Down => Some((from, dir)),
        Direction::Left | Direction::Up => Some((from.step(dir)?, dir.opposite())),
    }
}

/// A token relocation plus an optional wall placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub side: Side,
    pub token: usize,
    pub destination: Coord,
    pub wall: Option<WallPlacement>,
}

impl Move {
    #[inline]
    pub const fn token_only(side: Side, token: usize, destination: Coord) -> Self {
        Self {
            side,
            token,
            destination,
            wall: None,
        }
    }

    #[inline]
    pub const fn with_wall(
        side: Side,
        token: usize,
        destination: Coord,
        wall: WallPlacement,
    ) -> Self {
        Self {
            side,
            token,
            destination,
            wall: Some(wall),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} -> {}", self.side, self.token + 1, self.destination)?;
        if let Some(wall) = self.wall {
            write!(f, " + {wall}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_walls_match_segments() {
        for wall in [WallPlacement::vertical(2, 3), WallPlacement::horizontal(4, 1)] {
            for (cell, dir) in wall.segments() {
                assert!(WallPlacement::covering(cell, dir, 9, 9).contains(&wall));
                let other = cell.step(dir).expect("segment neighbour exists");
                assert!(wall.blocks(other, dir.opposite()));
            }
        }
    }

    #[test]
    fn edge_cells_have_a_single_covering_wall() {
        let walls = WallPlacement::covering(Coord::new(0, 0), Direction::Right, 9, 9);
        assert_eq!(walls, vec![WallPlacement::vertical(0, 0)]);

        let walls = WallPlacement::covering(Coord::new(3, 8), Direction::Up, 9, 9);
        assert_eq!(walls, vec![WallPlacement::horizontal(2, 7)]);
    }

    #[test]
    fn step_refuses_to_leave_the_top_left_corner() {
        assert_eq!(Coord::new(0, 0).step(Direction::Up), None);
        assert_eq!(Coord::new(0, 0).step(Direction::Left), None);
        assert_eq!(Coord::new(0, 0).step(Direction::Down), Some(Coord::new(1, 0)));
    }
}
