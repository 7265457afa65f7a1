//! Human player fed by a front-end.
//!
//! The front-end queues the user's entries; `decide_move` hands back the next
//! queued move only after full validation, so a rejected entry surfaces as an
//! error the caller can re-prompt on. An entry may also skip the turn.

use std::collections::VecDeque;

use crate::engines::engine_trait::{DecideParams, Player, PlayerOutput};
use crate::game_state::game_state::GameState;
use crate::game_state::quoridor_types::Move;

/// One entry typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanInput {
    Play(Move),
    Skip,
}

#[derive(Debug, Default)]
pub struct HumanPlayer {
    pending: VecDeque<HumanInput>,
}

impl HumanPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, mv: Move) {
        self.pending.push_back(HumanInput::Play(mv));
    }

    pub fn submit_skip(&mut self) {
        self.pending.push_back(HumanInput::Skip);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        "Human"
    }

    fn new_game(&mut self) {
        self.pending.clear();
    }

    fn decide_move(
        &mut self,
        game_state: &GameState,
        _params: &DecideParams,
    ) -> Result<PlayerOutput, String> {
        let input = self
            .pending
            .pop_front()
            .ok_or("no move submitted for the human player")?;

        let mv = match input {
            HumanInput::Play(mv) => mv,
            HumanInput::Skip => {
                return Ok(PlayerOutput {
                    skip_turn: true,
                    ..PlayerOutput::default()
                })
            }
        };

        let mut scratch = game_state.clone();
        scratch
            .validate_move(mv)
            .map_err(|violation| format!("illegal move {mv}: {violation}"))?;

        Ok(PlayerOutput {
            chosen_move: Some(mv),
            ..PlayerOutput::default()
        })
    }
}
