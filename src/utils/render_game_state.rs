//! Plain-text board renderer.
//!
//! Cells sit on even rows and columns of a character grid, wall segments in
//! between. Open boundaries print as `|` and `—`, walls as `‖` and `=`. Rows
//! and columns are labelled `1`..`9` then `A`, `B`, ... on every side.

use crate::game_state::game_state::GameState;
use crate::game_state::grid::Occupant;
use crate::game_state::quoridor_types::*;

/// One-character label for a 0-based row or column index.
pub fn coordinate_label(index: usize) -> char {
    match index {
        0..=8 => char::from(b'1' + index as u8),
        _ => char::from_u32('A' as u32 + (index - 9) as u32).unwrap_or('?'),
    }
}

/// Inverse of `coordinate_label`.
pub fn parse_coordinate_label(label: char) -> Option<usize> {
    match label {
        '1'..='9' => Some(label as usize - '1' as usize),
        'A'..='Z' => Some(label as usize - 'A' as usize + 9),
        'a'..='z' => Some(label as usize - 'a' as usize + 9),
        _ => None,
    }
}

pub fn render_game_state(game_state: &GameState) -> String {
    let board = &game_state.board;
    let rows = board.rows();
    let columns = board.columns();
    let height = 2 * rows + 3;
    let width = 2 * columns + 3;

    let mut out = String::new();
    for i in 0..height {
        let mut line = String::with_capacity(width);
        for j in 0..width {
            let border_col = j == 0 || j == width - 1;
            let col = (j / 2).wrapping_sub(1);
            let row = (i / 2).wrapping_sub(1);

            let ch = if i == 0 || i == height - 1 {
                if border_col || j % 2 == 1 {
                    ' '
                } else {
                    coordinate_label(col)
                }
            } else if i == 1 || i == height - 2 {
                if border_col || j % 2 == 1 {
                    ' '
                } else {
                    '='
                }
            } else if i % 2 == 0 {
                if border_col {
                    coordinate_label(row)
                } else if j == 1 || j == width - 2 {
                    '‖'
                } else if j % 2 == 0 {
                    cell_symbol(game_state, Coord::new(row, col))
                } else if board.has_wall(Coord::new(row, col), Direction::Right) {
                    '‖'
                } else {
                    '|'
                }
            } else if !border_col && j % 2 == 0 {
                // Boundary between `row` and the row below it.
                if board.has_wall(Coord::new(row, col), Direction::Down) {
                    '='
                } else {
                    '—'
                }
            } else {
                ' '
            };
            line.push(ch);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    for side in Side::ALL {
        let supply = game_state.side_state(side);
        out.push_str(&format!(
            "{side} walls: V {} H {}\n",
            supply.vertical_walls, supply.horizontal_walls
        ));
    }
    out.push_str(&format!("{} to move", game_state.side_to_move));
    out
}

fn cell_symbol(game_state: &GameState, coord: Coord) -> char {
    let Some(cell) = game_state.cell(coord) else {
        return '?';
    };
    match cell.occupant {
        Occupant::Token(side) => side.symbol(),
        Occupant::Trace => cell
            .origin()
            .map(|side| side.symbol().to_ascii_lowercase())
            .unwrap_or(' '),
        Occupant::Empty => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_switch_to_letters_after_nine() {
        assert_eq!(coordinate_label(0), '1');
        assert_eq!(coordinate_label(8), '9');
        assert_eq!(coordinate_label(9), 'A');
        assert_eq!(coordinate_label(27), 'S');
        for index in 0..28 {
            assert_eq!(parse_coordinate_label(coordinate_label(index)), Some(index));
        }
        assert_eq!(parse_coordinate_label('0'), None);
    }

    #[test]
    fn renders_tokens_walls_and_traces() {
        let mut game = GameState::new(
            3,
            4,
            [Coord::new(0, 0), Coord::new(2, 0)],
            [Coord::new(0, 3), Coord::new(2, 3)],
            1,
        )
        .expect("game should build");
        game.apply(Move::with_wall(
            Side::X,
            0,
            Coord::new(0, 1),
            WallPlacement::horizontal(0, 2),
        ));

        let text = render_game_state(&game);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9 + 3);
        assert_eq!(lines[0], "  1 2 3 4");
        assert_eq!(lines[1], "  = = = =");
        assert_eq!(lines[2], "1‖x|X| |O‖1");
        assert_eq!(lines[3], "  — — = =");
        assert_eq!(lines[4], "2‖ | | | ‖2");
        assert_eq!(lines[9], "X walls: V 1 H 0");
        assert_eq!(lines[11], "O to move");
    }
}
