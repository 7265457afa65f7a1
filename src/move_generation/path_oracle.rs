//! Path connectivity oracle.
//!
//! Answers "can this cell still reach that cell?" with an A* search over
//! single wall-respecting steps. Token occupancy is ignored: this is the
//! structural check behind the rule that no wall may cut a token off from
//! every goal. A diagonal step is only possible when one of its L-shaped
//! routes is open, so expanding orthogonal steps reaches exactly the same
//! cells, and the Manhattan heuristic stays admissible and consistent.
//!
//! `PathCertificate` caches the result of one search so that checking many
//! candidate walls against the same position rarely needs a fresh search.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use tracing::trace;

use crate::game_state::grid::Board;
use crate::game_state::quoridor_types::*;
use crate::moves::wall_placement::valid_wall_placement;

/// True when `dst` is reachable from `src` through the current walls.
pub fn has_path(board: &Board, src: Coord, dst: Coord) -> bool {
    has_path_with_wall(board, src, dst, None)
}

/// Like `has_path`, treating `extra` as if it were already placed.
pub fn has_path_with_wall(
    board: &Board,
    src: Coord,
    dst: Coord,
    extra: Option<WallPlacement>,
) -> bool {
    shortest_path(board, src, dst, extra).is_some()
}

/// Number of single steps on a shortest wall-respecting route.
pub fn shortest_distance(board: &Board, src: Coord, dst: Coord) -> Option<usize> {
    shortest_path(board, src, dst, None).map(|path| path.len() - 1)
}

/// True when `src` reaches at least one of `goals`.
pub fn reaches_any_goal(
    board: &Board,
    src: Coord,
    goals: &[Coord],
    extra: Option<WallPlacement>,
) -> bool {
    goals
        .iter()
        .any(|&goal| has_path_with_wall(board, src, goal, extra))
}

/// Shortest route from `src` to `dst`, both ends included.
pub fn shortest_path(
    board: &Board,
    src: Coord,
    dst: Coord,
    extra: Option<WallPlacement>,
) -> Option<Vec<Coord>> {
    a_star(board, src, dst, |cell, dir| {
        board.has_wall(cell, dir) || extra.is_some_and(|wall| wall.blocks(cell, dir))
    })
}

fn a_star<F>(board: &Board, src: Coord, dst: Coord, blocked: F) -> Option<Vec<Coord>>
where
    F: Fn(Coord, Direction) -> bool,
{
    if !board.in_bounds(src) || !board.in_bounds(dst) {
        return None;
    }

    let cell_count = board.rows() * board.columns();
    let mut g_score = vec![usize::MAX; cell_count];
    let mut came_from = vec![usize::MAX; cell_count];
    let mut open = BinaryHeap::new();

    let start = board.index(src);
    let goal = board.index(dst);
    g_score[start] = 0;
    open.push(Reverse((src.manhattan(dst), start)));

    while let Some(Reverse((f, current))) = open.pop() {
        let here = board.coord_of(current);
        let g = g_score[current];
        if f > g + here.manhattan(dst) {
            // Stale entry superseded by a cheaper route.
            continue;
        }
        if current == goal {
            return Some(reconstruct(board, &came_from, start, goal));
        }

        for dir in Direction::ALL {
            let Some(next) = board.neighbor(here, dir) else {
                continue;
            };
            if blocked(here, dir) {
                continue;
            }
            let idx = board.index(next);
            let tentative = g + 1;
            if tentative < g_score[idx] {
                g_score[idx] = tentative;
                came_from[idx] = current;
                open.push(Reverse((tentative + next.manhattan(dst), idx)));
            }
        }
    }

    None
}

fn reconstruct(board: &Board, came_from: &[usize], start: usize, goal: usize) -> Vec<Coord> {
    let mut path = vec![board.coord_of(goal)];
    let mut at = goal;
    while at != start {
        at = came_from[at];
        path.push(board.coord_of(at));
    }
    path.reverse();
    path
}

/// Cached proof that a token at some cell reaches one of its goals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathCertificate {
    /// No goal is reachable even before any new wall.
    Unreachable,
    /// One known route; a wall touching it needs a closer look.
    Single(Vec<Coord>),
    /// Two routes whose covering walls are disjoint, so no single new wall
    /// can cut both.
    Double,
}

impl PathCertificate {
    /// Searches the current board for a route from `from` to the nearer of
    /// `goals`, then for a second route that avoids every edge a placeable
    /// wall on the first route would also cover.
    pub fn certify(board: &Board, from: Coord, goals: &[Coord]) -> Self {
        let Some(primary) = goals
            .iter()
            .filter_map(|&goal| shortest_path(board, from, goal, None))
            .min_by_key(Vec::len)
        else {
            return PathCertificate::Unreachable;
        };

        let rows = board.rows();
        let columns = board.columns();
        let mut cutting_walls = HashSet::new();
        for (cell, dir) in route_edges(&primary) {
            cutting_walls.extend(
                WallPlacement::covering(cell, dir, rows, columns)
                    .into_iter()
                    .filter(|&wall| valid_wall_placement(board, wall).is_ok()),
            );
        }

        let disjoint = goals.iter().any(|&goal| {
            a_star(board, from, goal, |cell, dir| {
                board.has_wall(cell, dir)
                    || WallPlacement::covering(cell, dir, rows, columns)
                        .iter()
                        .any(|wall| cutting_walls.contains(wall))
            })
            .is_some()
        });

        if disjoint {
            PathCertificate::Double
        } else {
            PathCertificate::Single(primary)
        }
    }

    /// True when a token at `from` still reaches one of `goals` once `wall`
    /// is added. Gives the same answer as a full search; it only skips work.
    pub fn survives_wall(
        &self,
        board: &Board,
        from: Coord,
        goals: &[Coord],
        wall: WallPlacement,
    ) -> bool {
        let path = match self {
            PathCertificate::Double => return true,
            PathCertificate::Unreachable => {
                return reaches_any_goal(board, from, goals, Some(wall));
            }
            PathCertificate::Single(path) => path,
        };

        let cut: Vec<usize> = route_edges(path)
            .enumerate()
            .filter(|&(_, (cell, dir))| wall.blocks(cell, dir))
            .map(|(i, _)| i)
            .collect();
        let (Some(&first), Some(&last)) = (cut.first(), cut.last()) else {
            return true;
        };

        if has_path_with_wall(board, path[first], path[last + 1], Some(wall)) {
            return true;
        }

        trace!(%from, %wall, "local path repair failed, running full search");
        reaches_any_goal(board, from, goals, Some(wall))
    }
}

/// Consecutive steps of a route as `(cell, direction)` pairs.
fn route_edges(path: &[Coord]) -> impl Iterator<Item = (Coord, Direction)> + '_ {
    path.windows(2).filter_map(|pair| {
        let (d_row, d_col) = pair[0].delta_to(pair[1]);
        Direction::from_delta(d_row, d_col).map(|dir| (pair[0], dir))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: usize, columns: usize) -> Board {
        Board::new(
            rows,
            columns,
            [Coord::new(0, 0), Coord::new(rows - 1, 0)],
            [Coord::new(0, columns - 1), Coord::new(rows - 1, columns - 1)],
        )
        .expect("board should build")
    }

    #[test]
    fn open_board_distance_is_manhattan() {
        let b = board(9, 9);
        assert!(has_path(&b, Coord::new(0, 0), Coord::new(8, 8)));
        assert_eq!(shortest_distance(&b, Coord::new(0, 0), Coord::new(8, 8)), Some(16));
        assert_eq!(shortest_distance(&b, Coord::new(4, 4), Coord::new(4, 4)), Some(0));
    }

    #[test]
    fn walls_force_a_detour() {
        let mut b = board(5, 6);
        b.place_wall(WallPlacement::horizontal(0, 0));
        b.place_wall(WallPlacement::horizontal(0, 2));
        // Row 0 can only drop to row 1 through column 4 or 5.
        assert_eq!(shortest_distance(&b, Coord::new(0, 0), Coord::new(1, 0)), Some(9));
        let path = shortest_path(&b, Coord::new(0, 0), Coord::new(1, 0), None)
            .expect("route exists");
        assert_eq!(path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(path.last(), Some(&Coord::new(1, 0)));
        assert!(path.windows(2).all(|p| p[0].manhattan(p[1]) == 1));
    }

    #[test]
    fn sealed_pocket_has_no_path() {
        let mut b = board(9, 9);
        let inside = Coord::new(4, 4);
        for wall in [
            WallPlacement::horizontal(3, 3),
            WallPlacement::vertical(4, 3),
            WallPlacement::horizontal(4, 4),
        ] {
            b.place_wall(wall);
        }
        assert!(has_path(&b, inside, Coord::new(0, 0)));

        let last = WallPlacement::vertical(3, 4);
        assert!(!has_path_with_wall(&b, inside, Coord::new(0, 0), Some(last)));
        b.place_wall(last);
        assert!(!has_path(&b, inside, Coord::new(8, 8)));
        assert!(has_path(&b, Coord::new(0, 0), Coord::new(8, 8)));
    }

    #[test]
    fn open_board_certificates_are_double() {
        let b = board(9, 9);
        let cert = PathCertificate::certify(&b, Coord::new(4, 4), &[Coord::new(0, 4)]);
        assert_eq!(cert, PathCertificate::Double);
    }

    #[test]
    fn corridor_certificate_is_single() {
        // A one-cell-wide corridor along row 0: every route shares its edges.
        let mut b = board(3, 6);
        b.place_wall(WallPlacement::horizontal(0, 0));
        b.place_wall(WallPlacement::horizontal(0, 2));
        let cert = PathCertificate::certify(&b, Coord::new(0, 0), &[Coord::new(0, 5)]);
        assert!(matches!(cert, PathCertificate::Single(_)));
    }

    #[test]
    fn certificates_agree_with_full_search_for_every_wall() {
        let mut b = board(7, 8);
        for wall in [
            WallPlacement::horizontal(2, 0),
            WallPlacement::horizontal(2, 2),
            WallPlacement::vertical(3, 4),
            WallPlacement::horizontal(4, 5),
            WallPlacement::vertical(0, 3),
        ] {
            b.place_wall(wall);
        }
        let goals = [Coord::new(0, 7), Coord::new(6, 7)];

        let mut walls = Vec::new();
        crate::moves::wall_placement::generate_wall_placements(&b, &Orientation::ALL, &mut walls);

        for row in 0..b.rows() {
            for col in 0..b.columns() {
                let from = Coord::new(row, col);
                let cert = PathCertificate::certify(&b, from, &goals);
                for &wall in &walls {
                    assert_eq!(
                        cert.survives_wall(&b, from, &goals, wall),
                        reaches_any_goal(&b, from, &goals, Some(wall)),
                        "from {from} with {wall}"
                    );
                }
            }
        }
    }
}
