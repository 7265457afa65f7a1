//! Pluggable leaf evaluation.
//!
//! Both scorers sum `1/d` over a side's tokens, `d` being the distance from
//! a token to its nearer goal, and subtract the opponent's sum. A token
//! already on a goal short-circuits to a win or loss.

use crate::game_state::game_state::GameState;
use crate::game_state::grid::Board;
use crate::game_state::quoridor_types::*;
use crate::move_generation::path_oracle::shortest_distance;

pub const WIN_SCORE: f64 = f64::INFINITY;
pub const DRAW_SCORE: f64 = 0.0;

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view. Larger is better.
    fn score(&self, game_state: &GameState, perspective: Side) -> f64;
}

/// Geometric distance, ignoring walls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanScorer;

/// Shortest wall-respecting route from the connectivity oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathDistanceScorer;

impl BoardScorer for ManhattanScorer {
    fn score(&self, game_state: &GameState, perspective: Side) -> f64 {
        proximity_balance(&game_state.board, perspective, |_, from, goal| {
            Some(from.manhattan(goal))
        })
    }
}

impl BoardScorer for PathDistanceScorer {
    fn score(&self, game_state: &GameState, perspective: Side) -> f64 {
        proximity_balance(&game_state.board, perspective, shortest_distance)
    }
}

fn proximity_balance<F>(board: &Board, perspective: Side, distance: F) -> f64
where
    F: Fn(&Board, Coord, Coord) -> Option<usize>,
{
    let mut sums = [0.0f64; 2];
    for side in [perspective, perspective.opposite()] {
        let goals = board.goals(side);
        for token in board.tokens(side) {
            let nearest = goals
                .iter()
                .filter_map(|&goal| distance(board, token, goal))
                .min();
            match nearest {
                Some(0) if side == perspective => return WIN_SCORE,
                Some(0) => return -WIN_SCORE,
                Some(d) => sums[side.index()] += 1.0 / d as f64,
                // Cut off from every goal; contributes nothing.
                None => {}
            }
        }
    }
    sums[perspective.index()] - sums[perspective.opposite().index()]
}
