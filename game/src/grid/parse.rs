use std::fs;
use std::path::Path;

use crate::error::LevelError;
use crate::position::Position;

use super::{Cell, Grid};

const WALL: char = '#';
const PELLET: char = '.';
const POWER_PELLET: char = 'o';
const PLAYER_SPAWN: char = 'P';
const GHOST_SPAWN: char = 'G';

impl Grid {
    pub(crate) fn load(path: &Path) -> Result<Self, LevelError> {
        let text = fs::read_to_string(path).map_err(|e| LevelError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_text(&text)
    }

    /// Parses a level drawn one character per tile. Blank lines are skipped
    /// and short rows are padded with empty tiles. Spawn markers become empty
    /// tiles once their coordinates are recorded.
    pub(crate) fn from_text(text: &str) -> Result<Self, LevelError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            return Err(LevelError::Empty);
        }

        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let mut cells: Vec<Vec<Cell>> = Vec::with_capacity(lines.len());
        let mut player_spawn: Option<Position> = None;
        let mut ghost_spawns: Vec<Position> = Vec::new();
        let mut has_pellets = false;

        for (y, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(width);
            for (x, ch) in line.chars().enumerate() {
                let pos = Position::from_index(x, y);
                let cell = match ch {
                    WALL => Cell::Wall,
                    PELLET => {
                        has_pellets = true;
                        Cell::Pellet
                    }
                    POWER_PELLET => {
                        has_pellets = true;
                        Cell::PowerPellet
                    }
                    PLAYER_SPAWN => {
                        if let Some(previous) = player_spawn {
                            log::warn!("duplicate player spawn at {pos:?}, replacing {previous:?}");
                        }
                        player_spawn = Some(pos);
                        Cell::Empty
                    }
                    GHOST_SPAWN => {
                        ghost_spawns.push(pos);
                        Cell::Empty
                    }
                    _ => Cell::Empty,
                };
                row.push(cell);
            }
            row.resize(width, Cell::Empty);
            cells.push(row);
        }

        let player_spawn = player_spawn.ok_or(LevelError::MissingPlayerSpawn)?;
        if ghost_spawns.is_empty() {
            return Err(LevelError::MissingGhostSpawn);
        }
        if !has_pellets {
            return Err(LevelError::NoPellets);
        }

        Ok(Grid::new(cells, player_spawn, ghost_spawns))
    }
}
