use std::sync::Arc;
use std::thread;

use crate::game_state::game_state::GameState;
use crate::game_state::quoridor_types::Move;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::search::threading::{chunk_ranges, ThreadingConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub wall_moves: usize,
    pub token_only_moves: usize,
    pub wins: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.wall_moves += rhs.wall_moves;
        self.token_only_moves += rhs.token_only_moves;
        self.wins += rhs.wins;
    }

    fn leaf() -> Self {
        PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        }
    }
}

/// Counts move sequences of exactly `depth` plies from `game_state`, with
/// side-to-move alternating. Won positions are not expanded further.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts::leaf());
    }

    let mut scratch = game_state.clone();
    let mut total = PerftCounts::default();

    let root_moves = generator.generate_legal_moves(&scratch, scratch.side_to_move)?;
    for mv in root_moves {
        perft_recurse(generator, &mut scratch, mv, depth, 1, &mut total)?;
    }
    Ok(total)
}

/// `perft` with the root moves split into contiguous chunks, one worker
/// thread per chunk.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
    threading: ThreadingConfig,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts::leaf());
    }

    let root_moves: Arc<[Move]> = generator
        .generate_legal_moves(game_state, game_state.side_to_move)?
        .into();
    let ranges = chunk_ranges(root_moves.len(), threading.normalized_threads());
    let mut handles = Vec::with_capacity(ranges.len());

    for range in ranges {
        let generator_ref = Arc::clone(&generator);
        let moves = Arc::clone(&root_moves);
        let mut scratch = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = moves[range].iter().try_for_each(|&mv| {
                perft_recurse(generator_ref.as_ref(), &mut scratch, mv, depth, 1, &mut local)
            });
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle
            .join()
            .map_err(|_| MoveGenerationError::WorkerPanicked)?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    mv: Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    let undo = game_state.apply(mv);
    let won = game_state.game_end();

    if current_depth == search_depth {
        counts.nodes += 1;
        if mv.wall.is_some() {
            counts.wall_moves += 1;
        } else {
            counts.token_only_moves += 1;
        }
    }
    if won {
        counts.wins += 1;
    }
    if won || current_depth == search_depth {
        game_state.undo(undo);
        return Ok(());
    }

    let moves = generator.generate_legal_moves(game_state, game_state.side_to_move);
    let result = moves.and_then(|moves| {
        moves
            .into_iter()
            .try_for_each(|child| {
                perft_recurse(generator, game_state, child, search_depth, current_depth + 1, counts)
            })
    });
    game_state.undo(undo);
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{perft, perft_multi_threaded, PerftCounts};
    use crate::game_state::game_state::GameState;
    use crate::game_state::quoridor_types::{Coord, Move, Side};
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
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

    fn tiny_game(walls: usize) -> GameState {
        GameState::new(
            5,
            6,
            [Coord::new(0, 0), Coord::new(4, 0)],
            [Coord::new(0, 5), Coord::new(4, 5)],
            walls,
        )
        .expect("game should build")
    }

    #[test]
    fn depth_zero_is_a_single_node() {
        let counts = perft(&LegalMoveGenerator, &tiny_game(1), 0).expect("perft should run");
        assert_eq!(counts, PerftCounts { nodes: 1, ..PerftCounts::default() });
    }

    #[test]
    fn depth_one_counts_root_moves() {
        let game = tiny_game(0);
        let counts = perft(&LegalMoveGenerator, &game, 1).expect("perft should run");
        assert_eq!(counts.nodes, 4);
        assert_eq!(counts.token_only_moves, 4);
        assert_eq!(counts.wall_moves, 0);

        let walled = perft(&LegalMoveGenerator, &tiny_game(1), 1).expect("perft should run");
        assert_eq!(walled.nodes, 160);
        assert_eq!(walled.wall_moves, 160);
    }

    #[test]
    fn depth_two_without_walls() {
        // Every X step leaves O with the same four short hops.
        let counts = perft(&LegalMoveGenerator, &tiny_game(0), 2).expect("perft should run");
        assert_eq!(counts.nodes, 16);
    }

    #[test]
    fn threaded_perft_matches_single_thread() {
        let game = tiny_game(0);
        let single = perft(&LegalMoveGenerator, &game, 3).expect("perft should run");
        for threads in [1, 3, 16] {
            let threaded = perft_multi_threaded(
                Arc::new(LegalMoveGenerator),
                &game,
                3,
                ThreadingConfig::root_split(threads),
            )
            .expect("perft should run");
            assert_eq!(single, threaded, "{threads} threads");
        }
    }

    #[test]
    fn walled_root_is_split_across_workers() {
        let game = tiny_game(1);
        let single = perft(&LegalMoveGenerator, &game, 1).expect("perft should run");
        let threaded = perft_multi_threaded(
            Arc::new(LegalMoveGenerator),
            &game,
            1,
            ThreadingConfig::root_split(4),
        )
        .expect("perft should run");
        assert_eq!(single, threaded);
    }

    #[test]
    fn panicking_worker_is_reported() {
        let err = perft_multi_threaded(
            Arc::new(PanicsForO),
            &tiny_game(0),
            2,
            ThreadingConfig::root_split(2),
        )
        .expect_err("perft should fail");
        assert_eq!(err, MoveGenerationError::WorkerPanicked);
    }
}
