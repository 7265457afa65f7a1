//! Token jump rules.
//!
//! A token moves one cell orthogonally onto a free cell, two cells straight
//! over an adjacent opposing token, or one cell diagonally around an adjacent
//! opposing token when the straight jump over it is blocked. Walls are never
//! crossed, including the corner of an L-shaped diagonal route. A vacated home
//! cell (`Occupant::Trace`) counts as empty.

use crate::errors::RuleViolation;
use crate::game_state::grid::{Board, Occupant};
use crate::game_state::quoridor_types::*;

/// Checks whether token `index` of `side` may jump to `dest`.
pub fn valid_token_move(
    board: &Board,
    side: Side,
    index: usize,
    dest: Coord,
) -> Result<(), RuleViolation> {
    if !board.in_bounds(dest) {
        return Err(RuleViolation::OutOfBounds);
    }

    let from = board.token(side, index);
    let (d_row, d_col) = from.delta_to(dest);
    let distance = from.manhattan(dest);
    if distance == 0 || distance > 2 {
        return Err(RuleViolation::InvalidDistance);
    }

    match board.occupant(dest) {
        Occupant::Token(owner) if owner == side => return Err(RuleViolation::OccupiedByOwnToken),
        Occupant::Token(_) => return Err(RuleViolation::NotAShortHop),
        Occupant::Empty | Occupant::Trace => {}
    }

    let opponent = Occupant::Token(side.opposite());

    if distance == 1 {
        let Some(dir) = Direction::from_delta(d_row, d_col) else {
            return Err(RuleViolation::InvalidDistance);
        };
        if board.has_wall(from, dir) {
            return Err(RuleViolation::WallBlocked);
        }
        return Ok(());
    }

    if d_row == 0 || d_col == 0 {
        let Some(dir) = Direction::from_delta(d_row.signum(), d_col.signum()) else {
            return Err(RuleViolation::InvalidDistance);
        };
        let Some(mid) = board.neighbor(from, dir) else {
            return Err(RuleViolation::OutOfBounds);
        };
        if board.occupant(mid) != opponent {
            return Err(RuleViolation::NothingToJumpOver);
        }
        if board.has_wall(from, dir) || board.has_wall(mid, dir) {
            return Err(RuleViolation::WallBlocked);
        }
        return Ok(());
    }

    diagonal_jump(board, side, from, d_row, d_col)
}

fn diagonal_jump(
    board: &Board,
    side: Side,
    from: Coord,
    d_row: isize,
    d_col: isize,
) -> Result<(), RuleViolation> {
    let (Some(vertical), Some(horizontal)) = (
        Direction::from_delta(d_row, 0),
        Direction::from_delta(0, d_col),
    ) else {
        return Err(RuleViolation::InvalidDistance);
    };

    let opponent = Occupant::Token(side.opposite());
    let mut straight_open = false;
    let mut wall_in_route = false;
    let mut jumped_any = false;

    // Either leg of the L may carry the opposing token.
    for (first, second) in [(vertical, horizontal), (horizontal, vertical)] {
        let Some(mid) = board.neighbor(from, first) else {
            continue;
        };
        if board.occupant(mid) != opponent {
            continue;
        }
        jumped_any = true;

        if straight_jump_open(board, from, first) {
            straight_open = true;
            continue;
        }
        if board.has_wall(from, first) || board.has_wall(mid, second) {
            wall_in_route = true;
            continue;
        }
        return Ok(());
    }

    if !jumped_any {
        Err(RuleViolation::NothingToJumpOver)
    } else if straight_open {
        Err(RuleViolation::StraightJumpOpen)
    } else {
        debug_assert!(wall_in_route);
        Err(RuleViolation::WallBlocked)
    }
}

/// True when a straight two-cell jump from `from` in `dir` could land: no
/// wall on either crossed edge, the landing cell exists and holds no token.
fn straight_jump_open(board: &Board, from: Coord, dir: Direction) -> bool {
    let Some(mid) = board.neighbor(from, dir) else {
        return false;
    };
    let Some(landing) = board.neighbor(mid, dir) else {
        return false;
    };
    !board.has_wall(from, dir) && !board.has_wall(mid, dir) && !board.holds_token(landing)
}

/// Appends every legal `(token index, destination)` for `side`, tokens in
/// index order and destinations in row-major order.
pub fn generate_token_moves(board: &Board, side: Side, out: &mut Vec<(usize, Coord)>) {
    for index in 0..board.tokens(side).len() {
        let from = board.token(side, index);
        for d_row in -2isize..=2 {
            for d_col in -2isize..=2 {
                let distance = d_row.unsigned_abs() + d_col.unsigned_abs();
                if distance == 0 || distance > 2 {
                    continue;
                }
                let (Some(row), Some(col)) = (
                    from.row.checked_add_signed(d_row),
                    from.col.checked_add_signed(d_col),
                ) else {
                    continue;
                };
                let dest = Coord::new(row, col);
                if valid_token_move(board, side, index, dest).is_ok() {
                    out.push((index, dest));
                }
            }
        }
    }
}
