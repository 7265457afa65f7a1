use crate::engines::engine_trait::{DecideParams, Player, PlayerOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::board_scoring::{BoardScorer, ManhattanScorer};
use crate::search::minimax::{minimax_search, SearchConfig};

/// Computer player backed by alpha-beta minimax.
pub struct MinimaxPlayer {
    move_generator: LegalMoveGenerator,
    scorer: Box<dyn BoardScorer>,
    search_config: SearchConfig,
}

impl MinimaxPlayer {
    pub fn new(search_config: SearchConfig) -> Self {
        Self::with_scorer(search_config, Box::new(ManhattanScorer))
    }

    pub fn with_scorer(search_config: SearchConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            scorer,
            search_config,
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        self.search_config
    }
}

impl Default for MinimaxPlayer {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Player for MinimaxPlayer {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn decide_move(
        &mut self,
        game_state: &GameState,
        params: &DecideParams,
    ) -> Result<PlayerOutput, String> {
        let mut config = self.search_config;
        if let Some(depth) = params.depth {
            config.max_depth = depth;
        }

        let result = minimax_search(
            game_state,
            &self.move_generator,
            self.scorer.as_ref(),
            config,
        )
        .map_err(|e| e.to_string())?;

        let mut out = PlayerOutput {
            chosen_move: result.best_move,
            ..PlayerOutput::default()
        };
        out.info_lines.push(format!(
            "minimax_player depth {} score {} nodes {}",
            config.max_depth, result.best_score, result.nodes
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::MinimaxPlayer;
    use crate::engines::engine_trait::{DecideParams, Player};
    use crate::game_state::game_state::GameState;
    use crate::game_state::quoridor_types::{Coord, Move, Side};
    use crate::search::board_scoring::PathDistanceScorer;
    use crate::search::minimax::SearchConfig;

    #[test]
    fn finds_the_winning_step() {
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

        let mut player =
            MinimaxPlayer::with_scorer(SearchConfig::default(), Box::new(PathDistanceScorer));
        let out = player
            .decide_move(&game, &DecideParams { depth: Some(1) })
            .expect("decision should succeed");
        assert_eq!(out.chosen_move, Some(Move::token_only(Side::X, 1, Coord::new(2, 3))));
        assert_eq!(out.info_lines.len(), 1);
    }
}
