use thiserror::Error;

use crate::game_state::game_state::GameState;
use crate::game_state::quoridor_types::{Move, Side};

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("search worker thread panicked")]
    WorkerPanicked,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState, side: Side) -> MoveGenResult<Vec<Move>>;

    /// Cheaper emptiness check used at search horizons.
    fn has_any_move(&self, game_state: &GameState, side: Side) -> MoveGenResult<bool> {
        Ok(!self.generate_legal_moves(game_state, side)?.is_empty())
    }
}
