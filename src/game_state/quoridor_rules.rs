//! Canonical rule constants.
//!
//! Board-size and wall-supply bounds plus the default setup used when no
//! configuration is supplied.

use crate::game_state::quoridor_types::Coord;

pub const MIN_ROWS: usize = 3;
pub const MAX_ROWS: usize = 22;
pub const MIN_COLUMNS: usize = 4;
pub const MAX_COLUMNS: usize = 28;
pub const MAX_WALLS: usize = 18;

pub const DEFAULT_ROWS: usize = 11;
pub const DEFAULT_COLUMNS: usize = 14;
pub const DEFAULT_WALLS: usize = 9;

/// Tokens per side.
pub const TOKENS_PER_SIDE: usize = 2;

/// Default home cells for both sides on a `rows x columns` board: side X on
/// the left, side O on the right, each four cells in from the corners. Boards
/// too small for that inset put the homes on the corners instead.
pub fn default_pawns(rows: usize, columns: usize) -> ([Coord; 2], [Coord; 2]) {
    let (near_row, far_row) = inset(rows);
    let (near_col, far_col) = inset(columns);
    (
        [Coord::new(near_row, near_col), Coord::new(far_row, near_col)],
        [Coord::new(near_row, far_col), Coord::new(far_row, far_col)],
    )
}

fn inset(len: usize) -> (usize, usize) {
    if len >= 9 {
        (3, len - 4)
    } else {
        (0, len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pawns_on_default_board() {
        let (x, o) = default_pawns(DEFAULT_ROWS, DEFAULT_COLUMNS);
        assert_eq!(x, [Coord::new(3, 3), Coord::new(7, 3)]);
        assert_eq!(o, [Coord::new(3, 10), Coord::new(7, 10)]);
    }

    #[test]
    fn default_pawns_fall_back_to_corners_on_small_boards() {
        let (x, o) = default_pawns(5, 6);
        assert_eq!(x, [Coord::new(0, 0), Coord::new(4, 0)]);
        assert_eq!(o, [Coord::new(0, 5), Coord::new(4, 5)]);
    }
}
