//! Full legal move generation pipeline.
//!
//! Combines token jumps with wall placements, drops walls that would strand
//! the opponent, then drops combined moves that would strand one of the
//! mover's own tokens. When no combined move survives, plain jumps are
//! generated instead. Two generators produce identical output:
//! `LegalMoveGenerator` answers connectivity from cached path certificates,
//! `BaselineMoveGenerator` applies every candidate and re-runs the full check.

use tracing::debug;

use crate::game_state::game_state::GameState;
use crate::game_state::grid::Board;
use crate::game_state::quoridor_types::*;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::move_generation::path_oracle::{reaches_any_goal, PathCertificate};
use crate::moves::token_moves::generate_token_moves;
use crate::moves::wall_placement::generate_wall_placements;

pub struct LegalMoveGenerator;
pub struct BaselineMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState, side: Side) -> MoveGenResult<Vec<Move>> {
        Ok(self.legal_moves(game_state, side))
    }

    fn has_any_move(&self, game_state: &GameState, side: Side) -> MoveGenResult<bool> {
        Ok(!self.collect(game_state, side, 1).is_empty())
    }
}

impl MoveGenerator for BaselineMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState, side: Side) -> MoveGenResult<Vec<Move>> {
        Ok(self.legal_moves(game_state, side))
    }
}

/// Walls `side` could place right now: in supply, structurally valid, and
/// leaving both opposing tokens a path to their goals. Scan order.
pub fn wall_candidates(game_state: &GameState, side: Side) -> Vec<WallPlacement> {
    let supply = game_state.side_state(side);
    if !supply.has_walls() {
        return Vec::new();
    }

    let board = &game_state.board;
    let mut placements = Vec::new();
    generate_wall_placements(board, &supply.available_orientations(), &mut placements);

    let opponent = side.opposite();
    let goals = board.goals(opponent);
    let guards: Vec<(Coord, PathCertificate)> = board
        .tokens(opponent)
        .iter()
        .map(|&token| (token, PathCertificate::certify(board, token, &goals)))
        .collect();

    placements.retain(|&wall| {
        guards
            .iter()
            .all(|(token, cert)| cert.survives_wall(board, *token, &goals, wall))
    });
    placements
}

impl LegalMoveGenerator {
    pub fn legal_moves(&self, game_state: &GameState, side: Side) -> Vec<Move> {
        self.collect(game_state, side, usize::MAX)
    }

    /// True when `side` has some legal move that places a wall, which makes
    /// every token-only move illegal.
    pub fn wall_required(&self, game_state: &GameState, side: Side) -> bool {
        let walls = wall_candidates(game_state, side);
        if walls.is_empty() {
            return false;
        }
        let mut jumps = Vec::with_capacity(24);
        generate_token_moves(&game_state.board, side, &mut jumps);
        !combined_moves(&game_state.board, side, &jumps, &walls, 1).is_empty()
    }

    fn collect(&self, game_state: &GameState, side: Side, limit: usize) -> Vec<Move> {
        let board = &game_state.board;
        let mut jumps = Vec::with_capacity(24);
        generate_token_moves(board, side, &mut jumps);

        let walls = wall_candidates(game_state, side);
        let out = combined_moves(board, side, &jumps, &walls, limit);
        debug!(
            %side,
            jumps = jumps.len(),
            walls = walls.len(),
            moves = out.len(),
            "generated legal moves"
        );
        if !out.is_empty() {
            return out;
        }

        // No wall fits after any jump: plain jumps keep the side moving.
        jumps
            .into_iter()
            .take(limit)
            .map(|(token, dest)| Move::token_only(side, token, dest))
            .collect()
    }
}

/// Every jump paired with every wall that keeps all tokens of `side`
/// connected once the jump is made. Stops after `limit` moves.
fn combined_moves(
    board: &Board,
    side: Side,
    jumps: &[(usize, Coord)],
    walls: &[WallPlacement],
    limit: usize,
) -> Vec<Move> {
    if walls.is_empty() {
        return Vec::new();
    }

    let goals = board.goals(side);
    let positions = board.tokens(side);
    let mut certificates: Vec<(Coord, PathCertificate)> = Vec::new();
    let mut out = Vec::with_capacity(jumps.len() * walls.len());

    for &(token, dest) in jumps {
        // Certificates for every token of `side` as placed after the jump.
        let mut after = positions;
        after[token] = dest;
        let slots: Vec<usize> = after
            .iter()
            .map(|&at| certificate_slot(&mut certificates, board, at, &goals))
            .collect();

        for &wall in walls {
            let keeps_paths = slots.iter().all(|&slot| {
                let (at, cert) = &certificates[slot];
                cert.survives_wall(board, *at, &goals, wall)
            });
            if keeps_paths {
                out.push(Move::with_wall(side, token, dest, wall));
                if out.len() >= limit {
                    return out;
                }
            }
        }
    }
    out
}

fn certificate_slot(
    cache: &mut Vec<(Coord, PathCertificate)>,
    board: &Board,
    at: Coord,
    goals: &[Coord],
) -> usize {
    if let Some(slot) = cache.iter().position(|(cached, _)| *cached == at) {
        return slot;
    }
    cache.push((at, PathCertificate::certify(board, at, goals)));
    cache.len() - 1
}

impl BaselineMoveGenerator {
    pub fn legal_moves(&self, game_state: &GameState, side: Side) -> Vec<Move> {
        let mut scratch = game_state.clone();
        let mut jumps = Vec::with_capacity(24);
        generate_token_moves(&scratch.board, side, &mut jumps);

        let walls = Self::wall_candidates(&mut scratch, side);
        let mut out = Vec::new();
        for &(token, dest) in &jumps {
            for &wall in &walls {
                let mv = Move::with_wall(side, token, dest, wall);
                if scratch.check_paths_after_move(mv).is_ok() {
                    out.push(mv);
                }
            }
        }
        if !out.is_empty() {
            return out;
        }

        jumps
            .into_iter()
            .map(|(token, dest)| Move::token_only(side, token, dest))
            .collect()
    }

    fn wall_candidates(scratch: &mut GameState, side: Side) -> Vec<WallPlacement> {
        let supply = *scratch.side_state(side);
        if !supply.has_walls() {
            return Vec::new();
        }

        let mut placements = Vec::new();
        generate_wall_placements(&scratch.board, &supply.available_orientations(), &mut placements);

        let opponent = side.opposite();
        placements.retain(|&wall| {
            scratch.board.place_wall(wall);
            let board = &scratch.board;
            let goals = board.goals(opponent);
            let connected = board
                .tokens(opponent)
                .iter()
                .all(|&token| reaches_any_goal(board, token, &goals, None));
            scratch.board.lift_wall(wall);
            connected
        });
        placements
    }
}
