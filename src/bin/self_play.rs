//! Computer-vs-computer game runner.
//!
//! Run with:
//! `cargo run --release --bin self_play -- --config quoridor.toml --depth 2`
//! `RUST_LOG=quoridor=debug cargo run --release --bin self_play -- --random-o`

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quoridor::config::GameConfig;
use quoridor::engines::engine_minimax::MinimaxPlayer;
use quoridor::engines::engine_random::RandomPlayer;
use quoridor::engines::engine_trait::Player;
use quoridor::game_state::quoridor_types::Side;
use quoridor::search::board_scoring::{BoardScorer, ManhattanScorer, PathDistanceScorer};
use quoridor::search::minimax::SearchConfig;
use quoridor::search::threading::ThreadingConfig;
use quoridor::utils::match_harness::{play_match, MatchConfig, MatchOutcome};
use quoridor::utils::render_game_state::render_game_state;

#[derive(Debug, Parser)]
#[command(about = "Play a Quoridor game between two computer players")]
struct Args {
    /// Board setup file; defaults are used when it does not exist.
    #[arg(long, default_value = "quoridor.toml")]
    config: PathBuf,

    /// Minimax search depth in plies.
    #[arg(long, default_value_t = 1)]
    depth: u8,

    /// Worker threads for root-parallel search.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Stop the game as a draw after this many plies.
    #[arg(long, default_value_t = 200)]
    plies: u16,

    /// Seed for the random opening and the random player.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Random plies played before the players take over.
    #[arg(long, default_value_t = 0)]
    opening_plies: u8,

    /// Score leaves by wall-aware path length instead of Manhattan distance.
    #[arg(long)]
    path_distance: bool,

    /// Let side O pick uniformly random moves.
    #[arg(long)]
    random_o: bool,

    /// Print the final board.
    #[arg(long)]
    show_board: bool,
}

fn scorer(path_distance: bool) -> Box<dyn BoardScorer> {
    if path_distance {
        Box::new(PathDistanceScorer)
    } else {
        Box::new(ManhattanScorer)
    }
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = GameConfig::load(&args.config).map_err(|e| e.to_string())?;
    let start_state = config.new_game().map_err(|e| e.to_string())?;

    let search_config = SearchConfig {
        max_depth: args.depth,
        threading: ThreadingConfig::root_split(args.threads),
    };
    let mut player_x = MinimaxPlayer::with_scorer(search_config, scorer(args.path_distance));
    let mut player_o: Box<dyn Player> = if args.random_o {
        Box::new(RandomPlayer::with_seed(args.seed))
    } else {
        Box::new(MinimaxPlayer::with_scorer(search_config, scorer(args.path_distance)))
    };

    let match_config = MatchConfig {
        max_plies: args.plies,
        opening_min_plies: args.opening_plies,
        opening_max_plies: args.opening_plies,
        ..MatchConfig::default()
    };
    let result = play_match(
        &mut player_x,
        player_o.as_mut(),
        start_state,
        args.seed,
        &match_config,
    )?;

    if args.show_board {
        println!("{}", render_game_state(&result.final_state));
    }
    let summary = match result.outcome {
        MatchOutcome::Win(side) => format!("{side} wins"),
        MatchOutcome::Stalemate => "draw: side to move is stuck".to_owned(),
        MatchOutcome::MaxPlies => "draw: ply limit reached".to_owned(),
    };
    println!(
        "{summary} after {} plies (started {}, X avg {:.3} ms, O avg {:.3} ms)",
        result.final_state.ply,
        result.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        result.avg_move_time_ms(Side::X),
        result.avg_move_time_ms(Side::O),
    );
    Ok(())
}
