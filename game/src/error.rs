use std::fmt;
use std::path::PathBuf;

/// Reasons a level cannot be turned into a playable grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LevelError {
    Io { path: PathBuf, message: String },
    Empty,
    MissingPlayerSpawn,
    MissingGhostSpawn,
    NoPellets,
    NoLevels { dir: PathBuf },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "cannot read level {}: {message}", path.display())
            }
            Self::Empty => write!(f, "level is empty"),
            Self::MissingPlayerSpawn => write!(f, "level has no player spawn (P)"),
            Self::MissingGhostSpawn => write!(f, "level has no ghost spawns (G)"),
            Self::NoPellets => write!(f, "level has no pellets"),
            Self::NoLevels { dir } => write!(f, "no .txt levels found in {}", dir.display()),
        }
    }
}

impl std::error::Error for LevelError {}
