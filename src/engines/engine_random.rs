//! Random-move player.
//!
//! Picks uniformly among legal moves. Used for diagnostics, opening
//! variety in the match harness, and as a weak sparring partner.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{DecideParams, Player, PlayerOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

pub struct RandomPlayer {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sequence of picks.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn decide_move(
        &mut self,
        game_state: &GameState,
        _params: &DecideParams,
    ) -> Result<PlayerOutput, String> {
        let legal_moves = self
            .move_generator
            .generate_legal_moves(game_state, game_state.side_to_move)
            .map_err(|e| e.to_string())?;

        let mut out = PlayerOutput::default();
        out.info_lines
            .push(format!("random_player legal_moves {}", legal_moves.len()));

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let picked = legal_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or("failed to choose a random move")?;
        out.chosen_move = Some(*picked);
        Ok(out)
    }
}
