use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::motion::wrap_tile;
use crate::position::Position;

mod parse;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    Empty,
    Wall,
    Pellet,
    PowerPellet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum PelletKind {
    Normal,
    Power,
}

/// The maze for one level. Walls never change after construction; the pellet
/// sets only shrink as the player eats them.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    pellets: HashSet<Position>,
    power_pellets: HashSet<Position>,
    player_spawn: Position,
    ghost_spawns: Vec<Position>,
    home: Position,
}

impl Grid {
    /// Spawn tiles must already be `Cell::Empty` in `cells`.
    pub(crate) fn new(
        cells: Vec<Vec<Cell>>,
        player_spawn: Position,
        ghost_spawns: Vec<Position>,
    ) -> Self {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        debug_assert!(cells.iter().all(|row| row.len() == width));
        let mut grid = Self {
            cells,
            width,
            height,
            pellets: HashSet::new(),
            power_pellets: HashSet::new(),
            player_spawn,
            ghost_spawns,
            home: Position::new(0, 0),
        };
        grid.reset_pellets();
        grid.home = grid.find_home_tile();
        grid
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub(crate) fn at(&self, pos: Position) -> Cell {
        if pos.in_bounds(self.bounds()) {
            self.cells[pos.y as usize][pos.x as usize]
        } else {
            Cell::Wall
        }
    }

    fn at_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if pos.in_bounds(self.bounds()) {
            Some(&mut self.cells[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Out-of-bounds tiles are walls.
    pub(crate) fn is_wall(&self, pos: Position) -> bool {
        self.at(pos) == Cell::Wall
    }

    pub(crate) fn is_open(&self, pos: Position) -> bool {
        !self.is_wall(pos)
    }

    /// Applies the horizontal tunnel wrap to a tile coordinate.
    pub(crate) fn wrap(&self, pos: Position) -> Position {
        wrap_tile(pos, self.width)
    }

    /// Whether an actor may occupy `pos`, treating the left and right edges as
    /// connected.
    pub(crate) fn is_passable(&self, pos: Position) -> bool {
        self.is_open(self.wrap(pos))
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &cell)| (Position::from_index(x, y), cell))
        })
    }

    /// Removes the pellet on `pos`, if any. Eating an empty tile is a no-op.
    pub(crate) fn eat_pellet_at(&mut self, pos: Position) -> Option<PelletKind> {
        let kind = if self.pellets.remove(&pos) {
            PelletKind::Normal
        } else if self.power_pellets.remove(&pos) {
            PelletKind::Power
        } else {
            return None;
        };
        if let Some(cell) = self.at_mut(pos) {
            *cell = Cell::Empty;
        }
        Some(kind)
    }

    #[cfg(test)]
    pub(crate) fn pellet_at(&self, pos: Position) -> Option<PelletKind> {
        if self.pellets.contains(&pos) {
            Some(PelletKind::Normal)
        } else if self.power_pellets.contains(&pos) {
            Some(PelletKind::Power)
        } else {
            None
        }
    }

    pub(crate) fn pellets_remaining(&self) -> usize {
        self.pellets.len() + self.power_pellets.len()
    }

    pub(crate) fn player_spawn(&self) -> Position {
        self.player_spawn
    }

    pub(crate) fn ghost_spawns(&self) -> &[Position] {
        &self.ghost_spawns
    }

    /// Central open tile that eaten ghosts head back to.
    pub(crate) fn ghost_home_tile(&self) -> Position {
        self.home
    }

    fn find_home_tile(&self) -> Position {
        let center = Position::from_index(self.width / 2, self.height / 2);
        if self.is_open(center) {
            return center;
        }
        let max_radius = self.width.max(self.height) as i32;
        for radius in 1..max_radius {
            for dx in -radius..=radius {
                for dy in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let pos = Position::new(center.x + dx, center.y + dy);
                    if self.is_open(pos) {
                        return pos;
                    }
                }
            }
        }
        center
    }

    /// Keeps the first `count` ghost spawns; the rest become ordinary pellets.
    pub(crate) fn set_active_ghosts(&mut self, count: usize) {
        let spare: Vec<Position> = self.ghost_spawns.iter().skip(count).copied().collect();
        for pos in spare {
            if let Some(cell) = self.at_mut(pos) {
                *cell = Cell::Pellet;
            }
        }
        self.reset_pellets();
    }

    /// Rebuilds the pellet sets from the pellet markers left in the cells.
    pub(crate) fn reset_pellets(&mut self) {
        self.pellets.clear();
        self.power_pellets.clear();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::from_index(x, y);
                match self.cells[y][x] {
                    Cell::Pellet => {
                        self.pellets.insert(pos);
                    }
                    Cell::PowerPellet => {
                        self.power_pellets.insert(pos);
                    }
                    Cell::Empty | Cell::Wall => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAZE: &str = "\
#####
#P.o#
#.#.#
#G.G#
#####";

    fn grid() -> Grid {
        Grid::from_text(MAZE).unwrap()
    }

    #[test]
    fn is_wall_matches_markers_and_bounds() {
        let grid = grid();
        for (y, line) in MAZE.lines().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let pos = Position::from_index(x, y);
                assert_eq!(grid.is_wall(pos), ch == '#', "at {pos:?}");
            }
        }
        for pos in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(5, 2),
            Position::new(2, 5),
        ] {
            assert!(grid.is_wall(pos));
            assert!(!grid.is_open(pos));
        }
    }

    #[test]
    fn eating_is_idempotent() {
        let mut grid = grid();
        let before = grid.pellets_remaining();
        let tile = Position::new(2, 1);
        assert_eq!(grid.eat_pellet_at(tile), Some(PelletKind::Normal));
        assert_eq!(grid.eat_pellet_at(tile), None);
        assert_eq!(grid.pellets_remaining(), before - 1);
        assert_eq!(grid.at(tile), Cell::Empty);
    }

    #[test]
    fn power_pellets_are_reported() {
        let mut grid = grid();
        assert_eq!(
            grid.eat_pellet_at(Position::new(3, 1)),
            Some(PelletKind::Power)
        );
        assert_eq!(grid.eat_pellet_at(Position::new(1, 1)), None);
    }

    #[test]
    fn home_tile_is_center_when_open() {
        let grid = Grid::from_text("#####\n#P..#\n#.G.#\n#...#\n#####").unwrap();
        assert_eq!(grid.ghost_home_tile(), Position::new(2, 2));
    }

    #[test]
    fn home_tile_searches_rings_when_center_is_wall() {
        let grid = grid();
        // Centre (2, 2) is a wall; the first open tile on ring 1 in dx-major
        // order is (1, 1).
        assert!(grid.is_wall(Position::new(2, 2)));
        assert_eq!(grid.ghost_home_tile(), Position::new(1, 1));
    }

    #[test]
    fn spare_ghost_spawns_become_pellets() {
        let mut grid = grid();
        let before = grid.pellets_remaining();
        grid.set_active_ghosts(1);
        assert_eq!(grid.pellets_remaining(), before + 1);
        assert_eq!(grid.pellet_at(Position::new(3, 3)), Some(PelletKind::Normal));
        assert_eq!(grid.pellet_at(Position::new(1, 3)), None);
    }

    #[test]
    fn tunnel_edges_are_passable_only_when_the_far_side_is_open() {
        let grid = Grid::from_text("#####\n P.G \n#####").unwrap();
        assert!(grid.is_passable(Position::new(-1, 1)));
        assert!(grid.is_passable(Position::new(5, 1)));
        assert!(!grid.is_passable(Position::new(-1, 0)));
    }
}
