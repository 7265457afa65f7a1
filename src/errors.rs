//! Errors used throughout the rules engine.
//!
//! `RuleViolation` is the machine-distinguishable rejection reason returned by
//! every legality check. These are recoverable: an interactive front-end
//! re-prompts, the move generator discards the candidate. `SetupError` covers
//! rejected constructor and configuration arguments.

use thiserror::Error;

use crate::game_state::quoridor_types::{Coord, Orientation};

/// Why a token move, wall placement, or combined move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// Destination or wall coordinate lies outside the grid (or, for walls,
    /// outside the interior).
    #[error("coordinate is outside the board")]
    OutOfBounds,

    /// Token move of Manhattan distance 0 or more than 2.
    #[error("a token must move one or two cells")]
    InvalidDistance,

    /// Destination already holds one of the mover's own tokens.
    #[error("destination holds one of your own tokens")]
    OccupiedByOwnToken,

    /// A wall obstructs the jump, or the wall would overlap an existing one.
    #[error("a wall is in the way")]
    WallBlocked,

    /// Short move into a cell held by an opposing token; it has to be jumped.
    #[error("destination holds an opposing token; jump over it instead")]
    NotAShortHop,

    /// Long or diagonal jump with no opposing token to jump over.
    #[error("there is no opposing token to jump over")]
    NothingToJumpOver,

    /// Diagonal jump while the straight jump over the same token is open.
    #[error("the straight jump is open, so the diagonal jump is not allowed")]
    StraightJumpOpen,

    /// The side has used up its walls of this orientation.
    #[error("no {0:?} walls left")]
    NoWallOfType(Orientation),

    /// The move would leave some token without any path to its goals.
    #[error("the move would block every path of a token to its goals")]
    PathWouldBeBlocked,

    /// Token-only move while the side still has a wall it could place.
    #[error("a wall must be placed while walls remain")]
    WallMustBePlaced,

    /// The move belongs to the side that is not on turn.
    #[error("it is not this side's turn")]
    NotYourTurn,

    /// A token already stands on one of its goals.
    #[error("the game is already over")]
    GameOver,
}

/// Rejected board construction or configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("rows must be within {min}..={max}, got {value}")]
    RowsOutOfRange { value: usize, min: usize, max: usize },

    #[error("columns must be within {min}..={max}, got {value}")]
    ColumnsOutOfRange { value: usize, min: usize, max: usize },

    #[error("walls must be at most {max}, got {value}")]
    WallsOutOfRange { value: usize, max: usize },

    #[error("rows must be odd, got {0}")]
    RowsMustBeOdd(usize),

    #[error("columns must be even, got {0}")]
    ColumnsMustBeEven(usize),

    #[error("token at {0} is outside the board")]
    TokenOutOfBounds(Coord),

    #[error("two tokens start on {0}")]
    TokensOverlap(Coord),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
