//! Grid model: cells, mirrored boundary wall flags, and token positions.
//!
//! `Board` exclusively owns cell contents. Wall flags are stored on both
//! cells sharing a boundary and are always toggled in pairs, so
//! `cell(a).walls.get(dir) == cell(b).walls.get(dir.opposite())` for every
//! pair of neighbours `a`, `b`. Nothing here checks bounds or legality;
//! callers validate first.

use crate::errors::SetupError;
use crate::game_state::quoridor_rules::TOKENS_PER_SIDE;
use crate::game_state::quoridor_types::*;

/// What currently sits on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupant {
    #[default]
    Empty,
    /// A home cell whose token has moved away.
    Trace,
    Token(Side),
}

/// Boundary wall flags of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallFlags {
    pub top: bool,
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
}

impl WallFlags {
    #[inline]
    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    fn set(&mut self, dir: Direction, value: bool) {
        match dir {
            Direction::Up => self.top = value,
            Direction::Down => self.bottom = value,
            Direction::Left => self.left = value,
            Direction::Right => self.right = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub occupant: Occupant,
    pub walls: WallFlags,
    origin: Option<Side>,
}

impl Cell {
    /// Side whose token started on this cell, fixed at construction.
    #[inline]
    pub fn origin(&self) -> Option<Side> {
        self.origin
    }

    #[inline]
    fn vacated_marker(&self) -> Occupant {
        if self.origin.is_some() {
            Occupant::Trace
        } else {
            Occupant::Empty
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    // [side][token]
    tokens: [[Coord; TOKENS_PER_SIDE]; 2],
    homes: [[Coord; TOKENS_PER_SIDE]; 2],
}

impl Board {
    /// Builds an empty wall-free grid with the four tokens on their homes.
    ///
    /// Size ranges are checked by the caller (`GameState::new`); this only
    /// rejects tokens that are off the board or stacked.
    pub fn new(
        rows: usize,
        columns: usize,
        player_1_pawns: [Coord; TOKENS_PER_SIDE],
        player_2_pawns: [Coord; TOKENS_PER_SIDE],
    ) -> Result<Self, SetupError> {
        let mut board = Self {
            rows,
            columns,
            cells: vec![Cell::default(); rows * columns],
            tokens: [player_1_pawns, player_2_pawns],
            homes: [player_1_pawns, player_2_pawns],
        };

        for side in Side::ALL {
            for home in board.homes[side.index()] {
                if !board.in_bounds(home) {
                    return Err(SetupError::TokenOutOfBounds(home));
                }
                let idx = board.index(home);
                if board.cells[idx].origin.is_some() {
                    return Err(SetupError::TokensOverlap(home));
                }
                board.cells[idx].origin = Some(side);
                board.cells[idx].occupant = Occupant::Token(side);
            }
        }

        Ok(board)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.columns
    }

    #[inline]
    pub(crate) fn index(&self, coord: Coord) -> usize {
        coord.row * self.columns + coord.col
    }

    #[inline]
    pub(crate) fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.columns, index % self.columns)
    }

    /// Render-friendly accessor; `None` off the board.
    #[inline]
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if self.in_bounds(coord) {
            Some(&self.cells[self.index(coord)])
        } else {
            None
        }
    }

    #[inline]
    pub fn occupant(&self, coord: Coord) -> Occupant {
        self.cell(coord).map_or(Occupant::Empty, |c| c.occupant)
    }

    #[inline]
    pub fn holds_token(&self, coord: Coord) -> bool {
        matches!(self.occupant(coord), Occupant::Token(_))
    }

    #[inline]
    pub fn token(&self, side: Side, index: usize) -> Coord {
        self.tokens[side.index()][index]
    }

    #[inline]
    pub fn tokens(&self, side: Side) -> [Coord; TOKENS_PER_SIDE] {
        self.tokens[side.index()]
    }

    #[inline]
    pub fn homes(&self, side: Side) -> [Coord; TOKENS_PER_SIDE] {
        self.homes[side.index()]
    }

    /// A side's goal set: the opponent's home cells.
    #[inline]
    pub fn goals(&self, side: Side) -> [Coord; TOKENS_PER_SIDE] {
        self.homes[side.opposite().index()]
    }

    /// In-bounds neighbour of `coord` in `dir`.
    #[inline]
    pub fn neighbor(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        coord.step(dir).filter(|c| self.in_bounds(*c))
    }

    /// True when a wall sits on the `dir` boundary of `coord`. The board edge
    /// is not a wall; use `neighbor` to detect it.
    #[inline]
    pub fn has_wall(&self, coord: Coord, dir: Direction) -> bool {
        self.cells[self.index(coord)].walls.get(dir)
    }

    /// True when a single step from `coord` in `dir` is impossible, either
    /// because of a wall or because it would leave the board.
    #[inline]
    pub fn is_blocked(&self, coord: Coord, dir: Direction) -> bool {
        self.neighbor(coord, dir).is_none() || self.has_wall(coord, dir)
    }

    pub fn place_wall(&mut self, wall: WallPlacement) {
        self.set_wall(wall, true);
    }

    pub fn lift_wall(&mut self, wall: WallPlacement) {
        self.set_wall(wall, false);
    }

    fn set_wall(&mut self, wall: WallPlacement, value: bool) {
        for (cell, dir) in wall.segments() {
            let other = Coord::new(
                cell.row + usize::from(dir == Direction::Down),
                cell.col + usize::from(dir == Direction::Right),
            );
            let a = self.index(cell);
            let b = self.index(other);
            self.cells[a].walls.set(dir, value);
            self.cells[b].walls.set(dir.opposite(), value);
        }
    }

    /// Relocates a token and returns what is needed to put it back.
    pub fn move_token(&mut self, side: Side, index: usize, dest: Coord) -> TokenUndo {
        let previous = self.tokens[side.index()][index];
        let from = self.index(previous);
        let to = self.index(dest);
        let replaced = self.cells[to].occupant;

        self.cells[from].occupant = self.cells[from].vacated_marker();
        self.cells[to].occupant = Occupant::Token(side);
        self.tokens[side.index()][index] = dest;

        TokenUndo {
            side,
            index,
            previous,
            replaced,
        }
    }

    pub fn restore_token(&mut self, undo: TokenUndo) {
        let current = self.tokens[undo.side.index()][undo.index];
        let at = self.index(current);
        let back = self.index(undo.previous);
        self.cells[at].occupant = undo.replaced;
        self.cells[back].occupant = Occupant::Token(undo.side);
        self.tokens[undo.side.index()][undo.index] = undo.previous;
    }

    /// Checks that every wall flag is mirrored on the neighbouring cell.
    pub fn walls_consistent(&self) -> bool {
        (0..self.cells.len()).all(|idx| {
            let coord = self.coord_of(idx);
            [Direction::Right, Direction::Down].into_iter().all(|dir| {
                match self.neighbor(coord, dir) {
                    Some(other) => {
                        self.has_wall(coord, dir) == self.has_wall(other, dir.opposite())
                    }
                    None => !self.has_wall(coord, dir),
                }
            })
        })
    }
}
