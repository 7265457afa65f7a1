//! Wall legality: interior bounds and segment overlap.
//!
//! These checks are O(1) and never look at path connectivity; the move
//! generator asks the path oracle for that separately.

use crate::errors::RuleViolation;
use crate::game_state::grid::Board;
use crate::game_state::quoridor_types::*;

/// Accepts a wall whose top-left corner lies strictly inside the grid and
/// whose two segments are both free.
pub fn valid_wall_placement(board: &Board, wall: WallPlacement) -> Result<(), RuleViolation> {
    let Coord { row, col } = wall.coord;
    if row + 1 >= board.rows() || col + 1 >= board.columns() {
        return Err(RuleViolation::OutOfBounds);
    }

    if wall
        .segments()
        .iter()
        .any(|&(cell, dir)| board.has_wall(cell, dir))
    {
        return Err(RuleViolation::WallBlocked);
    }

    Ok(())
}

/// Every structurally valid placement of the given orientations, in grid scan
/// order (row, then column, vertical before horizontal on the same corner).
pub fn generate_wall_placements(
    board: &Board,
    orientations: &[Orientation],
    out: &mut Vec<WallPlacement>,
) {
    for row in 0..board.rows().saturating_sub(1) {
        for col in 0..board.columns().saturating_sub(1) {
            for &orientation in orientations {
                let wall = WallPlacement::new(orientation, Coord::new(row, col));
                if valid_wall_placement(board, wall).is_ok() {
                    out.push(wall);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(
            5,
            6,
            [Coord::new(0, 0), Coord::new(4, 0)],
            [Coord::new(0, 5), Coord::new(4, 5)],
        )
        .expect("board should build")
    }

    #[test]
    fn walls_on_last_row_or_column_are_out_of_bounds() {
        let b = board();
        assert_eq!(
            valid_wall_placement(&b, WallPlacement::horizontal(4, 0)),
            Err(RuleViolation::OutOfBounds)
        );
        assert_eq!(
            valid_wall_placement(&b, WallPlacement::vertical(0, 5)),
            Err(RuleViolation::OutOfBounds)
        );
        assert_eq!(valid_wall_placement(&b, WallPlacement::vertical(3, 4)), Ok(()));
    }

    #[test]
    fn overlapping_segments_are_rejected() {
        let mut b = board();
        b.place_wall(WallPlacement::vertical(1, 2));

        assert_eq!(
            valid_wall_placement(&b, WallPlacement::vertical(1, 2)),
            Err(RuleViolation::WallBlocked)
        );
        assert_eq!(
            valid_wall_placement(&b, WallPlacement::vertical(0, 2)),
            Err(RuleViolation::WallBlocked)
        );
        assert_eq!(
            valid_wall_placement(&b, WallPlacement::vertical(2, 2)),
            Err(RuleViolation::WallBlocked)
        );
        assert_eq!(valid_wall_placement(&b, WallPlacement::vertical(3, 2)), Ok(()));
        assert_eq!(valid_wall_placement(&b, WallPlacement::horizontal(1, 2)), Ok(()));
    }

    #[test]
    fn placements_come_in_scan_order() {
        let b = board();
        let mut out = Vec::new();
        generate_wall_placements(&b, &Orientation::ALL, &mut out);
        assert_eq!(out.len(), 2 * 4 * 5);
        assert_eq!(out[0], WallPlacement::vertical(0, 0));
        assert_eq!(out[1], WallPlacement::horizontal(0, 0));
        assert_eq!(out[2], WallPlacement::vertical(0, 1));
        assert_eq!(out[out.len() - 1], WallPlacement::horizontal(3, 4));
    }
}
