//! Player abstraction shared by the match harness and front-ends.
//!
//! Every participant, computer or human, exposes a single `decide_move`
//! capability and is picked when a session is set up.

use crate::game_state::game_state::GameState;
use crate::game_state::quoridor_types::Move;

#[derive(Debug, Clone, Default)]
pub struct DecideParams {
    /// Search depth override for computer players.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerOutput {
    pub chosen_move: Option<Move>,
    /// The player passes this turn. Only human players ask for it.
    pub skip_turn: bool,
    pub info_lines: Vec<String>,
}

pub trait Player: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Picks a move for `game_state.side_to_move`. `chosen_move` is `None`
    /// only when that side has no legal move or the player skips.
    fn decide_move(
        &mut self,
        game_state: &GameState,
        params: &DecideParams,
    ) -> Result<PlayerOutput, String>;
}
