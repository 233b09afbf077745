use std::collections::{HashSet, VecDeque};

use crate::direction::Dir4;
use crate::grid::Grid;
use crate::position::Position;

/// First move of a shortest path from `start` to `goal`.
///
/// Breadth-first over the 4-connected tile graph, including the horizontal
/// tunnel edges, expanding neighbours in `Dir4::PRIORITY` order. The goal is
/// accepted as soon as it is discovered, so a wall tile can be approached
/// through open tiles, but the returned first move always leads onto an open
/// tile. `forbid` removes one outgoing edge of `start` only.
///
/// Returns `None` when `start == goal` or no path exists; callers pick their
/// own fallback.
pub(crate) fn next_step(
    grid: &Grid,
    start: Position,
    goal: Position,
    forbid: Option<Dir4>,
) -> Option<Dir4> {
    if start == goal {
        return None;
    }

    let mut visited: HashSet<Position> = HashSet::from([start]);
    let mut queue: VecDeque<(Position, Dir4)> = VecDeque::new();

    for dir in Dir4::PRIORITY {
        if Some(dir) == forbid {
            continue;
        }
        let next = grid.wrap(start + dir.delta());
        if !grid.is_open(next) {
            continue;
        }
        if next == goal {
            return Some(dir);
        }
        if visited.insert(next) {
            queue.push_back((next, dir));
        }
    }

    while let Some((current, first)) = queue.pop_front() {
        for dir in Dir4::PRIORITY {
            let next = grid.wrap(current + dir.delta());
            if next == goal {
                return Some(first);
            }
            if grid.is_open(next) && visited.insert(next) {
                queue.push_back((next, first));
            }
        }
    }

    None
}

/// The traversable move from `pos` that ends furthest (Manhattan) from
/// `pursuer`, earliest in priority order on ties.
pub(crate) fn flee_direction(grid: &Grid, pos: Position, pursuer: Position) -> Option<Dir4> {
    let mut best: Option<(Dir4, i32)> = None;
    for dir in Dir4::PRIORITY {
        let next = grid.wrap(pos + dir.delta());
        if !grid.is_open(next) {
            continue;
        }
        let distance = next.manhattan(pursuer);
        if best.is_none_or(|(_, best_distance)| distance > best_distance) {
            best = Some((dir, distance));
        }
    }
    best.map(|(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        Grid::from_text(text).unwrap()
    }

    const OPEN: &str = "\
#######
#P....#
#.....#
#..G..#
#######";

    #[test]
    fn no_step_towards_self() {
        let grid = grid(OPEN);
        let tile = Position::new(2, 2);
        assert_eq!(next_step(&grid, tile, tile, None), None);
    }

    #[test]
    fn disconnected_goal_has_no_step() {
        let grid = grid("#######\n#P.#..#\n#..#.G#\n#######");
        assert_eq!(
            next_step(&grid, Position::new(1, 1), Position::new(5, 1), None),
            None
        );
    }

    #[test]
    fn ties_break_in_priority_order() {
        let grid = grid(OPEN);
        // Up-left and left-up both take two steps; Up is expanded first.
        assert_eq!(
            next_step(&grid, Position::new(3, 3), Position::new(2, 2), None),
            Some(Dir4::Up)
        );
        assert_eq!(
            next_step(&grid, Position::new(3, 3), Position::new(4, 2), None),
            Some(Dir4::Up)
        );
        assert_eq!(
            next_step(&grid, Position::new(1, 1), Position::new(5, 1), None),
            Some(Dir4::Right)
        );
    }

    #[test]
    fn forbidden_direction_only_applies_at_start() {
        let grid = grid(OPEN);
        let step = next_step(
            &grid,
            Position::new(2, 2),
            Position::new(1, 2),
            Some(Dir4::Left),
        );
        assert_eq!(step, Some(Dir4::Up));
    }

    #[test]
    fn forbidding_the_only_exit_leaves_no_path() {
        let grid = grid("#####\n#P..#\n###G#\n#####");
        assert_eq!(
            next_step(&grid, Position::new(1, 1), Position::new(3, 1), Some(Dir4::Right)),
            None
        );
    }

    #[test]
    fn paths_use_the_tunnel() {
        let grid = grid("#######\n.P#G#..\n#######");
        // The wall at x = 2 blocks the direct route; wrapping left is the
        // only way to reach x = 5.
        assert_eq!(
            next_step(&grid, Position::new(1, 1), Position::new(5, 1), None),
            Some(Dir4::Left)
        );
    }

    #[test]
    fn wall_goal_is_approached_but_never_entered() {
        let grid = grid(OPEN);
        assert_eq!(
            next_step(&grid, Position::new(5, 1), Position::new(6, 0), None),
            None
        );
        assert_eq!(
            next_step(&grid, Position::new(4, 1), Position::new(6, 1), None),
            Some(Dir4::Right)
        );
        // Already beside the wall: stepping into it would stall the ghost.
        assert_eq!(
            next_step(&grid, Position::new(5, 1), Position::new(6, 1), None),
            None
        );
    }

    #[test]
    fn flee_maximises_manhattan_distance() {
        let corridor = grid("#######\n#P...G#\n#######");
        let dir = flee_direction(&corridor, Position::new(3, 1), Position::new(1, 1));
        assert_eq!(dir, Some(Dir4::Right));

        let room = grid(OPEN);
        let dir = flee_direction(&room, Position::new(3, 2), Position::new(1, 1));
        assert_eq!(dir, Some(Dir4::Down));
    }

    #[test]
    fn flee_ties_resolve_by_priority() {
        let grid = grid(OPEN);
        // Every move ends one tile away from a pursuer on the same tile.
        let dir = flee_direction(&grid, Position::new(3, 2), Position::new(3, 2));
        assert_eq!(dir, Some(Dir4::Up));
    }

    #[test]
    fn flee_without_moves_is_none() {
        let grid = grid("#####\n#P#G#\n#####\n#.###");
        assert_eq!(flee_direction(&grid, Position::new(3, 1), Position::new(1, 1)), None);
    }
}
