//! Crate root module declarations for the Quoridor rules engine.
//!
//! This file exposes the board model, the move-legality rules, the path
//! connectivity oracle, move generation, the alpha-beta search, the player
//! implementations and the text/config helpers so binaries, tests, and
//! benchmarks can import stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod game_state;
    pub mod grid;
    pub mod quoridor_rules;
    pub mod quoridor_types;
    pub mod undo_state;
}

pub mod moves {
    pub mod token_moves;
    pub mod wall_placement;
}

pub mod move_generation {
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod path_oracle;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod threading;
}

pub mod engines {
    pub mod engine_human;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod match_harness;
    pub mod render_game_state;
}
