//! Core incremental game state.
//!
//! `GameState` bundles the grid, each side's wall supply, and the side to
//! move. Moves are applied in place and reverted with the `UndoToken` that
//! `apply` returns, so the search never deep-copies a board per node.

use crate::errors::{RuleViolation, SetupError};
use crate::game_state::grid::{Board, Cell};
use crate::game_state::quoridor_rules::*;
use crate::game_state::quoridor_types::*;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::path_oracle::reaches_any_goal;
use crate::moves::token_moves::valid_token_move;
use crate::moves::wall_placement::valid_wall_placement;

/// Remaining wall supply of one side. Vertical and horizontal walls are
/// counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideState {
    pub vertical_walls: u8,
    pub horizontal_walls: u8,
}

impl SideState {
    #[inline]
    pub const fn new(walls: u8) -> Self {
        Self {
            vertical_walls: walls,
            horizontal_walls: walls,
        }
    }

    #[inline]
    pub const fn remaining(&self, orientation: Orientation) -> u8 {
        match orientation {
            Orientation::Vertical => self.vertical_walls,
            Orientation::Horizontal => self.horizontal_walls,
        }
    }

    #[inline]
    pub const fn has_walls(&self) -> bool {
        self.vertical_walls > 0 || self.horizontal_walls > 0
    }

    /// Orientations this side can still place, vertical first.
    pub fn available_orientations(&self) -> Vec<Orientation> {
        Orientation::ALL
            .into_iter()
            .filter(|&o| self.remaining(o) > 0)
            .collect()
    }

    fn slot(&mut self, orientation: Orientation) -> &mut u8 {
        match orientation {
            Orientation::Vertical => &mut self.vertical_walls,
            Orientation::Horizontal => &mut self.horizontal_walls,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub sides: [SideState; 2],
    pub side_to_move: Side,
    pub ply: u16,
}

impl GameState {
    /// Builds a game with `walls` of each orientation per side. Side X
    /// moves first.
    pub fn new(
        rows: usize,
        columns: usize,
        player_1_pawns: [Coord; TOKENS_PER_SIDE],
        player_2_pawns: [Coord; TOKENS_PER_SIDE],
        walls: usize,
    ) -> Result<Self, SetupError> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&rows) {
            return Err(SetupError::RowsOutOfRange {
                value: rows,
                min: MIN_ROWS,
                max: MAX_ROWS,
            });
        }
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) {
            return Err(SetupError::ColumnsOutOfRange {
                value: columns,
                min: MIN_COLUMNS,
                max: MAX_COLUMNS,
            });
        }
        if walls > MAX_WALLS {
            return Err(SetupError::WallsOutOfRange {
                value: walls,
                max: MAX_WALLS,
            });
        }

        let board = Board::new(rows, columns, player_1_pawns, player_2_pawns)?;
        // MAX_WALLS fits in u8.
        let supply = SideState::new(walls as u8);
        Ok(Self {
            board,
            sides: [supply, supply],
            side_to_move: Side::X,
            ply: 0,
        })
    }

    /// Default 11x14 board with nine walls of each orientation per side.
    pub fn new_game() -> Self {
        let (x, o) = default_pawns(DEFAULT_ROWS, DEFAULT_COLUMNS);
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS, x, o, DEFAULT_WALLS)
            .expect("default setup is always in range")
    }

    #[inline]
    pub fn side_state(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    #[inline]
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.board.cell(coord)
    }

    /// Applies a move in place. The move must already be legal; see
    /// `play` for the checked variant.
    pub fn apply(&mut self, mv: Move) -> UndoToken {
        debug_assert!(
            valid_token_move(&self.board, mv.side, mv.token, mv.destination).is_ok(),
            "apply called with an illegal token move: {mv}"
        );

        let undo = UndoToken {
            mv,
            token: self.board.move_token(mv.side, mv.token, mv.destination),
            prev_side_to_move: self.side_to_move,
            prev_ply: self.ply,
        };

        if let Some(wall) = mv.wall {
            debug_assert!(valid_wall_placement(&self.board, wall).is_ok());
            let slot = self.sides[mv.side.index()].slot(wall.orientation);
            debug_assert!(*slot > 0, "apply called without walls of that type");
            *slot = slot.saturating_sub(1);
            self.board.place_wall(wall);
        }

        self.side_to_move = mv.side.opposite();
        self.ply = self.ply.saturating_add(1);
        undo
    }

    /// Reverts the move that produced `undo`. Undo tokens must be replayed
    /// in reverse order of application.
    pub fn undo(&mut self, undo: UndoToken) {
        if let Some(wall) = undo.mv.wall {
            self.board.lift_wall(wall);
            *self.sides[undo.mv.side.index()].slot(wall.orientation) += 1;
        }
        self.board.restore_token(undo.token);
        self.side_to_move = undo.prev_side_to_move;
        self.ply = undo.prev_ply;
    }

    /// True once some token stands on one of its goal cells.
    #[inline]
    pub fn game_end(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        Side::ALL.into_iter().find(|&side| {
            let goals = self.board.goals(side);
            self.board.tokens(side).iter().any(|t| goals.contains(t))
        })
    }

    /// Every fully legal move for `side`, in generator order.
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        LegalMoveGenerator.legal_moves(self, side)
    }

    pub fn valid_token_move(
        &self,
        side: Side,
        index: usize,
        dest: Coord,
    ) -> Result<(), RuleViolation> {
        if index >= TOKENS_PER_SIDE {
            return Err(RuleViolation::OutOfBounds);
        }
        valid_token_move(&self.board, side, index, dest)
    }

    /// Bounds, overlap and supply check for a wall of `side`. Connectivity
    /// is checked separately by `check_paths_after_move`.
    pub fn valid_wall_placement(
        &self,
        side: Side,
        wall: WallPlacement,
    ) -> Result<(), RuleViolation> {
        valid_wall_placement(&self.board, wall)?;
        if self.side_state(side).remaining(wall.orientation) == 0 {
            return Err(RuleViolation::NoWallOfType(wall.orientation));
        }
        Ok(())
    }

    /// Temporarily applies `mv` and requires every token to keep a path to
    /// at least one of its goals. The state is restored before returning.
    /// Malformed moves are rejected before anything is applied.
    pub fn check_paths_after_move(&mut self, mv: Move) -> Result<(), RuleViolation> {
        self.valid_token_move(mv.side, mv.token, mv.destination)?;
        if let Some(wall) = mv.wall {
            self.valid_wall_placement(mv.side, wall)?;
        }

        let undo = self.apply(mv);
        let all_connected = Side::ALL.into_iter().all(|side| {
            let goals = self.board.goals(side);
            self.board
                .tokens(side)
                .iter()
                .all(|&token| reaches_any_goal(&self.board, token, &goals, None))
        });
        self.undo(undo);

        if all_connected {
            Ok(())
        } else {
            Err(RuleViolation::PathWouldBeBlocked)
        }
    }

    /// Runs every check a front-end needs before committing `mv`, returning
    /// the first rejection.
    pub fn validate_move(&mut self, mv: Move) -> Result<(), RuleViolation> {
        if self.game_end() {
            return Err(RuleViolation::GameOver);
        }
        if mv.side != self.side_to_move {
            return Err(RuleViolation::NotYourTurn);
        }
        self.valid_token_move(mv.side, mv.token, mv.destination)?;
        match mv.wall {
            Some(wall) => self.valid_wall_placement(mv.side, wall)?,
            None => {
                if LegalMoveGenerator.wall_required(self, mv.side) {
                    return Err(RuleViolation::WallMustBePlaced);
                }
            }
        }
        self.check_paths_after_move(mv)
    }

    /// Hands the turn to the opponent without moving. Only a human player
    /// asks for this; the generator never produces it.
    pub fn skip_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        self.ply = self.ply.saturating_add(1);
    }

    /// Validates and applies `mv`.
    pub fn play(&mut self, mv: Move) -> Result<UndoToken, RuleViolation> {
        self.validate_move(mv)?;
        Ok(self.apply(mv))
    }
}
