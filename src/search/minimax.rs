//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The searching side maximizes and the opponent minimizes. Positions where a
//! token stands on a goal are scored as a win or loss; a side with no legal
//! move is a stalemate and scores neutral. The root keeps the first move that
//! reaches the best score, so results are deterministic for a given
//! generator order.

use std::thread;

use tracing::debug;

use crate::game_state::game_state::GameState;
use crate::game_state::quoridor_types::{Move, Side};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::search::board_scoring::{BoardScorer, DRAW_SCORE, WIN_SCORE};
use crate::search::threading::{chunk_ranges, ThreadingConfig};

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub threading: ThreadingConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            threading: ThreadingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: f64,
    pub nodes: u64,
}

struct Searcher<'a, G: ?Sized, S: ?Sized> {
    generator: &'a G,
    scorer: &'a S,
    perspective: Side,
    nodes: u64,
}

impl<G: MoveGenerator + ?Sized, S: BoardScorer + ?Sized> Searcher<'_, G, S> {
    fn minimax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
    ) -> MoveGenResult<f64> {
        self.nodes += 1;

        if let Some(winner) = game_state.winner() {
            return Ok(if winner == self.perspective {
                WIN_SCORE
            } else {
                -WIN_SCORE
            });
        }

        let side = game_state.side_to_move;
        if depth == 0 {
            if !self.generator.has_any_move(game_state, side)? {
                return Ok(DRAW_SCORE);
            }
            return Ok(self.scorer.score(game_state, self.perspective));
        }

        let moves = self.generator.generate_legal_moves(game_state, side)?;
        if moves.is_empty() {
            return Ok(DRAW_SCORE);
        }

        let maximizing = side == self.perspective;
        let mut best = if maximizing { -WIN_SCORE } else { WIN_SCORE };

        for mv in moves {
            let undo = game_state.apply(mv);
            let score = self.minimax(game_state, depth - 1, alpha, beta);
            game_state.undo(undo);
            let score = score?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }

        Ok(best)
    }
}

/// Searches `config.max_depth` plies for the side to move and returns its
/// best move. `best_move` is `None` when the game is already over or the side
/// to move has no legal move.
pub fn minimax_search<G, S>(
    game_state: &GameState,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> MoveGenResult<SearchResult>
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    let perspective = game_state.side_to_move;
    let depth = config.max_depth.max(1);

    if let Some(winner) = game_state.winner() {
        let best_score = if winner == perspective { WIN_SCORE } else { -WIN_SCORE };
        return Ok(SearchResult {
            best_move: None,
            best_score,
            nodes: 1,
        });
    }

    let moves = generator.generate_legal_moves(game_state, perspective)?;
    if moves.is_empty() {
        return Ok(SearchResult {
            best_move: None,
            best_score: DRAW_SCORE,
            nodes: 1,
        });
    }

    let result = if config.threading.is_parallel() && moves.len() > 1 {
        parallel_root(game_state, generator, scorer, &moves, depth, config.threading)?
    } else {
        sequential_root(game_state, generator, scorer, &moves, depth)?
    };

    debug!(
        side = %perspective,
        depth,
        root_moves = moves.len(),
        nodes = result.nodes,
        score = result.best_score,
        best = ?result.best_move.map(|mv| mv.to_string()),
        "minimax search finished"
    );
    Ok(result)
}

fn sequential_root<G, S>(
    game_state: &GameState,
    generator: &G,
    scorer: &S,
    moves: &[Move],
    depth: u8,
) -> MoveGenResult<SearchResult>
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    let mut scratch = game_state.clone();
    let mut searcher = Searcher {
        generator,
        scorer,
        perspective: game_state.side_to_move,
        nodes: 1,
    };

    let mut alpha = -WIN_SCORE;
    let mut best_move = None;
    let mut best_score = -WIN_SCORE;

    for &mv in moves {
        let undo = scratch.apply(mv);
        let score = searcher.minimax(&mut scratch, depth - 1, alpha, WIN_SCORE);
        scratch.undo(undo);
        let score = score?;

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        alpha = alpha.max(score);
    }

    Ok(SearchResult {
        best_move,
        best_score,
        nodes: searcher.nodes,
    })
}

/// Scores every root move with a full window on worker threads, then picks
/// the first best in root order. Matches `sequential_root` on move and score.
fn parallel_root<G, S>(
    game_state: &GameState,
    generator: &G,
    scorer: &S,
    moves: &[Move],
    depth: u8,
    threading: ThreadingConfig,
) -> MoveGenResult<SearchResult>
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    let perspective = game_state.side_to_move;
    let ranges = chunk_ranges(moves.len(), threading.normalized_threads());

    let chunks: Vec<MoveGenResult<(Vec<f64>, u64)>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                let chunk = &moves[range];
                let mut scratch = game_state.clone();
                scope.spawn(move || -> MoveGenResult<(Vec<f64>, u64)> {
                    let mut searcher = Searcher {
                        generator,
                        scorer,
                        perspective,
                        nodes: 0,
                    };
                    let mut scores = Vec::with_capacity(chunk.len());
                    for &mv in chunk {
                        let undo = scratch.apply(mv);
                        let score =
                            searcher.minimax(&mut scratch, depth - 1, -WIN_SCORE, WIN_SCORE);
                        scratch.undo(undo);
                        scores.push(score?);
                    }
                    Ok((scores, searcher.nodes))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or(Err(MoveGenerationError::WorkerPanicked))
            })
            .collect()
    });

    let mut nodes = 1;
    let mut scores = Vec::with_capacity(moves.len());
    for chunk in chunks {
        let (chunk_scores, chunk_nodes) = chunk?;
        scores.extend(chunk_scores);
        nodes += chunk_nodes;
    }

    let mut best_move = None;
    let mut best_score = -WIN_SCORE;
    for (&mv, &score) in moves.iter().zip(&scores) {
        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    Ok(SearchResult {
        best_move,
        best_score,
        nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::quoridor_types::{Coord, WallPlacement};
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::search::board_scoring::{ManhattanScorer, PathDistanceScorer};
    use crate::search::threading::ThreadingConfig;

    /// Generates normally for X and panics when asked for O's moves.
    struct PanicsForO;

    impl MoveGenerator for PanicsForO {
        fn generate_legal_moves(
            &self,
            game_state: &GameState,
            side: Side,
        ) -> MoveGenResult<Vec<Move>> {
            if side == Side::O {
                panic!("generator failure for O");
            }
            LegalMoveGenerator.generate_legal_moves(game_state, side)
        }
    }

    fn small_game(walls: usize) -> GameState {
        GameState::new(
            5,
            6,
            [Coord::new(0, 0), Coord::new(4, 0)],
            [Coord::new(0, 5), Coord::new(4, 5)],
            walls,
        )
        .expect("game should build")
    }

    /// O's tokens at (1,0) and (3,0) are boxed in by four walls and by X's
    /// token at (2,0), which cannot move either. X's token at (4,5) is free.
    fn boxed_in_o() -> GameState {
        let mut game = GameState::new(
            5,
            6,
            [Coord::new(2, 0), Coord::new(4, 5)],
            [Coord::new(3, 0), Coord::new(0, 5)],
            0,
        )
        .expect("game should build");
        game.board.move_token(Side::O, 1, Coord::new(1, 0));
        for wall in [
            WallPlacement::horizontal(0, 0),
            WallPlacement::vertical(1, 0),
            WallPlacement::horizontal(3, 0),
            WallPlacement::vertical(3, 0),
        ] {
            game.board.place_wall(wall);
        }
        game
    }

    fn config(max_depth: u8) -> SearchConfig {
        SearchConfig {
            max_depth,
            threading: ThreadingConfig::default(),
        }
    }

    fn search(game: &GameState, max_depth: u8) -> SearchResult {
        minimax_search(game, &LegalMoveGenerator, &ManhattanScorer, config(max_depth))
            .expect("search should succeed")
    }

    #[test]
    fn takes_a_win_in_one() {
        let mut game = GameState::new(
            3,
            4,
            [Coord::new(0, 0), Coord::new(1, 3)],
            [Coord::new(0, 2), Coord::new(2, 3)],
            0,
        )
        .expect("game should build");
        game.side_to_move = Side::O;
        game.apply(Move::token_only(Side::O, 1, Coord::new(2, 2)));

        for depth in [1, 2] {
            let result = search(&game, depth);
            assert_eq!(result.best_move, Some(Move::token_only(Side::X, 1, Coord::new(2, 3))));
            assert_eq!(result.best_score, WIN_SCORE);
        }
    }

    #[test]
    fn search_is_deterministic() {
        let game = small_game(1);
        let first = minimax_search(&game, &LegalMoveGenerator, &PathDistanceScorer, config(1))
            .expect("search should succeed");
        let second = minimax_search(&game, &LegalMoveGenerator, &PathDistanceScorer, config(1))
            .expect("search should succeed");
        assert!(first.best_move.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn stuck_side_to_move_is_a_draw() {
        let mut game = boxed_in_o();
        game.side_to_move = Side::O;
        assert!(!game.game_end());
        assert!(game.legal_moves(Side::O).is_empty());

        for depth in [1, 3] {
            let result = search(&game, depth);
            assert_eq!(result.best_move, None);
            assert_eq!(result.best_score, DRAW_SCORE);
        }
    }

    #[test]
    fn stalemate_at_the_horizon_is_a_draw() {
        let game = boxed_in_o();
        let moves = game.legal_moves(Side::X);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.token == 1));

        // Every X move leaves O stuck at depth zero.
        let result = search(&game, 1);
        assert_eq!(result.best_move, Some(moves[0]));
        assert_eq!(result.best_score, DRAW_SCORE);

        let mut after = game.clone();
        after.apply(moves[0]);
        assert!(!LegalMoveGenerator
            .has_any_move(&after, Side::O)
            .expect("generation should succeed"));
    }

    #[test]
    fn parallel_root_matches_sequential() {
        for (walls, depth) in [(0, 3), (1, 1)] {
            let game = small_game(walls);
            let sequential = search(&game, depth);
            let parallel = minimax_search(
                &game,
                &LegalMoveGenerator,
                &ManhattanScorer,
                SearchConfig {
                    max_depth: depth,
                    threading: ThreadingConfig::root_split(3),
                },
            )
            .expect("search should succeed");
            assert_eq!(parallel.best_move, sequential.best_move);
            assert_eq!(parallel.best_score, sequential.best_score);
        }
    }

    #[test]
    fn panicking_worker_is_reported() {
        let err = minimax_search(
            &small_game(0),
            &PanicsForO,
            &ManhattanScorer,
            SearchConfig {
                max_depth: 1,
                threading: ThreadingConfig::root_split(2),
            },
        )
        .expect_err("search should fail");
        assert_eq!(err, MoveGenerationError::WorkerPanicked);
    }
}
