use crate::game_state::grid::Occupant;
use crate::game_state::quoridor_types::*;

/// Undo record for `Board::move_token` / `Board::restore_token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUndo {
    pub side: Side,
    pub index: usize,
    pub previous: Coord,
    pub replaced: Occupant,
}

/// Single undo record for `GameState::apply` / `GameState::undo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoToken {
    pub mv: Move,
    pub token: TokenUndo,
    pub prev_side_to_move: Side,
    pub prev_ply: u16,
}
