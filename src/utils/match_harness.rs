//! Head-to-head match harness for local testing.
//!
//! Plays two `Player` implementations against each other from a given
//! start position, with an optional seeded random opening prefix, and
//! aggregates series statistics.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::engines::engine_trait::{DecideParams, Player};
use crate::game_state::game_state::GameState;
use crate::game_state::quoridor_types::Side;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win(Side),
    /// The side to move had no legal move.
    Stalemate,
    MaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, side: Side },
    Stalemate,
    MaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub decide_params: DecideParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 0,
            opening_max_plies: 2,
            decide_params: DecideParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub started_at: DateTime<Utc>,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub move_counts: [u32; 2],
    pub total_time_ns: [u128; 2],
}

impl MatchResult {
    pub fn avg_move_time_ms(&self, side: Side) -> f64 {
        let moves = self.move_counts[side.index()];
        if moves == 0 {
            return 0.0;
        }
        self.total_time_ns[side.index()] as f64 / moves as f64 / 1_000_000.0
    }
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub start_state: GameState,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 4,
            base_seed: 0,
            start_state: GameState::new_game(),
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

impl MatchSeriesStats {
    fn avg_ms(total_ns: u128, moves: u32) -> f64 {
        if moves == 0 {
            0.0
        } else {
            total_ns as f64 / moves as f64 / 1_000_000.0
        }
    }

    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            Self::avg_ms(self.player1_total_time_ns, self.player1_moves),
            Self::avg_ms(self.player2_total_time_ns, self.player2_moves),
        )
    }
}

/// Per-match bookkeeping collected while moves are played.
#[derive(Default)]
struct MatchLog {
    opening_moves: Vec<String>,
    played_moves: Vec<String>,
    move_counts: [u32; 2],
    total_time_ns: [u128; 2],
}

impl MatchLog {
    fn finish(
        self,
        outcome: MatchOutcome,
        final_state: GameState,
        started_at: DateTime<Utc>,
    ) -> MatchResult {
        info!(?outcome, plies = self.played_moves.len(), "match finished");
        MatchResult {
            outcome,
            final_state,
            started_at,
            opening_moves: self.opening_moves,
            played_moves: self.played_moves,
            move_counts: self.move_counts,
            total_time_ns: self.total_time_ns,
        }
    }
}

/// Plays one seeded match. `player_x` moves for side X, `player_o` for O.
pub fn play_match(
    player_x: &mut dyn Player,
    player_o: &mut dyn Player,
    start_state: GameState,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchResult, String> {
    let started_at = Utc::now();
    player_x.new_game();
    player_o.new_game();

    let (mut state, opening_moves) = apply_seeded_random_opening(
        &start_state,
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;
    let mut log = MatchLog {
        opening_moves,
        ..MatchLog::default()
    };

    for _ in 0..config.max_plies {
        if let Some(winner) = state.winner() {
            return Ok(log.finish(MatchOutcome::Win(winner), state, started_at));
        }

        let legal_moves = state.legal_moves(state.side_to_move);
        if legal_moves.is_empty() {
            return Ok(log.finish(MatchOutcome::Stalemate, state, started_at));
        }

        let mover = state.side_to_move;
        let started = Instant::now();
        let out = match mover {
            Side::X => player_x.decide_move(&state, &config.decide_params)?,
            Side::O => player_o.decide_move(&state, &config.decide_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();
        let player_name = match mover {
            Side::X => player_x.name(),
            Side::O => player_o.name(),
        }
        .to_owned();
        for line in &out.info_lines {
            debug!(player = %player_name, "{line}");
        }

        log.move_counts[mover.index()] = log.move_counts[mover.index()].saturating_add(1);
        log.total_time_ns[mover.index()] =
            log.total_time_ns[mover.index()].saturating_add(elapsed_ns);

        if out.skip_turn {
            info!(ply = state.ply, side = %mover, player = %player_name, "turn skipped");
            log.played_moves.push("skip".to_owned());
            state.skip_turn();
            continue;
        }

        let chosen = out
            .chosen_move
            .ok_or_else(|| format!("{player_name} returned no move with legal moves available"))?;
        if !legal_moves.contains(&chosen) {
            return Err(format!("{player_name} returned illegal move {chosen}"));
        }

        info!(
            ply = state.ply,
            side = %mover,
            player = %player_name,
            mv = %chosen,
            elapsed_ms = elapsed_ns as f64 / 1_000_000.0,
            "move played"
        );
        log.played_moves.push(chosen.to_string());
        state.apply(chosen);
    }

    let outcome = match state.winner() {
        Some(winner) => MatchOutcome::Win(winner),
        None => MatchOutcome::MaxPlies,
    };
    Ok(log.finish(outcome, state, started_at))
}

/// Plays a series, alternating which player takes side X (deterministic
/// from `base_seed`).
pub fn play_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    F1: Fn() -> Box<dyn Player>,
    F2: Fn() -> Box<dyn Player>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut side_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_x = side_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();

        info!(game = i + 1, games = config.games, seed, player1_is_x, "series game starting");

        let result = if player1_is_x {
            play_match(
                player1.as_mut(),
                player2.as_mut(),
                config.start_state.clone(),
                seed,
                &config.per_game,
            )?
        } else {
            play_match(
                player2.as_mut(),
                player1.as_mut(),
                config.start_state.clone(),
                seed,
                &config.per_game,
            )?
        };

        let (p1_side, p2_side) = if player1_is_x {
            (Side::X, Side::O)
        } else {
            (Side::O, Side::X)
        };
        stats.player1_moves = stats
            .player1_moves
            .saturating_add(result.move_counts[p1_side.index()]);
        stats.player2_moves = stats
            .player2_moves
            .saturating_add(result.move_counts[p2_side.index()]);
        stats.player1_total_time_ns = stats
            .player1_total_time_ns
            .saturating_add(result.total_time_ns[p1_side.index()]);
        stats.player2_total_time_ns = stats
            .player2_total_time_ns
            .saturating_add(result.total_time_ns[p2_side.index()]);

        let mapped = match result.outcome {
            MatchOutcome::Win(side) if side == p1_side => {
                stats.player1_wins += 1;
                SeriesOutcome::PlayerWin {
                    player: PlayerId::Player1,
                    side,
                }
            }
            MatchOutcome::Win(side) => {
                stats.player2_wins += 1;
                SeriesOutcome::PlayerWin {
                    player: PlayerId::Player2,
                    side,
                }
            }
            MatchOutcome::Stalemate => {
                stats.draws += 1;
                SeriesOutcome::Stalemate
            }
            MatchOutcome::MaxPlies => {
                stats.draws += 1;
                SeriesOutcome::MaxPlies
            }
        };
        stats.outcomes.push(mapped);
    }

    Ok(stats)
}

/// Plays between `min_plies` and `max_plies` uniformly random legal moves,
/// stopping early if the game ends or the side to move is stuck.
pub fn apply_seeded_random_opening(
    start_state: &GameState,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> Result<(GameState, Vec<String>), String> {
    if min_plies > max_plies {
        return Err(format!(
            "opening_min_plies {min_plies} exceeds opening_max_plies {max_plies}"
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let plies = rng.random_range(min_plies..=max_plies);
    let mut state = start_state.clone();
    let mut moves = Vec::with_capacity(usize::from(plies));

    for _ in 0..plies {
        if state.game_end() {
            break;
        }
        let legal_moves = LegalMoveGenerator.legal_moves(&state, state.side_to_move);
        let Some(&mv) = legal_moves.as_slice().choose(&mut rng) else {
            break;
        };
        moves.push(mv.to_string());
        state.apply(mv);
    }

    Ok((state, moves))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_human::HumanPlayer;
    use crate::engines::engine_minimax::MinimaxPlayer;
    use crate::engines::engine_random::RandomPlayer;
    use crate::game_state::quoridor_types::Coord;
    use crate::search::minimax::SearchConfig;

    fn tiny_start() -> GameState {
        GameState::new(
            3,
            4,
            [Coord::new(0, 0), Coord::new(2, 0)],
            [Coord::new(0, 3), Coord::new(2, 3)],
            1,
        )
        .expect("game should build")
    }

    #[test]
    fn opening_is_reproducible() {
        let start = tiny_start();
        let (a_state, a_moves) =
            apply_seeded_random_opening(&start, 9, 1, 3).expect("opening should apply");
        let (b_state, b_moves) =
            apply_seeded_random_opening(&start, 9, 1, 3).expect("opening should apply");
        assert_eq!(a_moves, b_moves);
        assert_eq!(a_state, b_state);
        assert!(!a_moves.is_empty());
        assert!(apply_seeded_random_opening(&start, 9, 3, 1).is_err());
    }

    #[test]
    fn minimax_against_random_reaches_an_outcome() {
        let mut x = MinimaxPlayer::new(SearchConfig {
            max_depth: 1,
            ..SearchConfig::default()
        });
        let mut o = RandomPlayer::with_seed(3);
        let config = MatchConfig {
            max_plies: 60,
            opening_min_plies: 0,
            opening_max_plies: 0,
            ..MatchConfig::default()
        };
        let result =
            play_match(&mut x, &mut o, tiny_start(), 1, &config).expect("match should run");

        assert!(result.opening_moves.is_empty());
        assert_eq!(result.played_moves.len(), usize::from(result.final_state.ply));
        assert!(result.move_counts[Side::X.index()] >= 1);
        match result.outcome {
            MatchOutcome::Win(side) => assert_eq!(result.final_state.winner(), Some(side)),
            MatchOutcome::Stalemate | MatchOutcome::MaxPlies => {
                assert_eq!(result.final_state.winner(), None)
            }
        }
        assert!(result.started_at <= Utc::now());
    }

    #[test]
    fn series_counts_every_game() {
        let stats = play_match_series(
            || Box::new(RandomPlayer::with_seed(1)) as Box<dyn Player>,
            || Box::new(RandomPlayer::with_seed(2)) as Box<dyn Player>,
            MatchSeriesConfig {
                games: 3,
                base_seed: 11,
                start_state: tiny_start(),
                per_game: MatchConfig {
                    max_plies: 20,
                    ..MatchConfig::default()
                },
            },
        )
        .expect("series should run");
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 3);
        assert!(stats.report().starts_with("games=3"));
    }

    #[test]
    fn skipped_turn_passes_to_the_opponent() {
        let mut x = HumanPlayer::new();
        x.submit_skip();
        let mut o = RandomPlayer::with_seed(5);
        let config = MatchConfig {
            max_plies: 2,
            opening_min_plies: 0,
            opening_max_plies: 0,
            ..MatchConfig::default()
        };
        let start = tiny_start();
        let result =
            play_match(&mut x, &mut o, start.clone(), 1, &config).expect("match should run");

        assert_eq!(result.outcome, MatchOutcome::MaxPlies);
        assert_eq!(result.played_moves.len(), 2);
        assert_eq!(result.played_moves[0], "skip");
        assert_eq!(result.final_state.ply, 2);
        assert_eq!(result.final_state.side_to_move, Side::X);
        assert_eq!(result.final_state.board.tokens(Side::X), start.board.tokens(Side::X));
    }
}
