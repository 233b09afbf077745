use std::fs;
use std::path::Path;

use crate::error::LevelError;
use crate::grid::Grid;

include!(concat!(env!("OUT_DIR"), "/levels.rs"));

pub(crate) struct Level {
    pub(crate) name: String,
    pub(crate) grid: Grid,
}

/// Pristine level grids, validated up front so starting or advancing a level
/// can never fail halfway.
pub(crate) struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    pub(crate) fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels {
                dir: Default::default(),
            });
        }
        Ok(Self { levels })
    }

    /// Levels compiled into the binary from `levels/*.txt`.
    pub(crate) fn embedded() -> Result<Self, LevelError> {
        let levels = LEVEL_DATA
            .iter()
            .map(|(name, text)| {
                Ok(Level {
                    name: name.to_string(),
                    grid: Grid::from_text(text)?,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;
        Self::new(levels)
    }

    /// Every `.txt` file in `dir`, ordered by file name.
    pub(crate) fn from_dir(dir: &Path) -> Result<Self, LevelError> {
        let entries = fs::read_dir(dir).map_err(|e| LevelError::Io {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut paths: Vec<_> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "txt"))
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(LevelError::NoLevels {
                dir: dir.to_path_buf(),
            });
        }
        let levels = paths
            .iter()
            .map(|path| {
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string();
                Ok(Level {
                    name,
                    grid: Grid::load(path)?,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;
        Self::new(levels)
    }

    /// Level numbers start at 1 and cycle through the available mazes.
    pub(crate) fn get(&self, level: u32) -> &Level {
        let index = (level.max(1) as usize - 1) % self.levels.len();
        &self.levels[index]
    }
}
