use serde::{Deserialize, Serialize};

use crate::config::GlobalMode;
use crate::direction::Dir4;
use crate::grid::Grid;
use crate::position::Position;

const PINKY_LOOKAHEAD: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Personality {
    Blinky,
    Pinky,
    Clyde,
    Inky,
}

/// What a ghost may look at when picking a target tile.
pub(crate) struct TargetView<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) mode: GlobalMode,
    pub(crate) player_tile: Position,
    pub(crate) player_dir: Option<Dir4>,
}

pub(crate) type TargetFn = fn(&TargetView) -> Position;

impl Personality {
    /// Spawn order; ghost `i` gets `ROSTER[i % 4]`.
    pub(crate) const ROSTER: [Personality; 4] = [
        Personality::Blinky,
        Personality::Pinky,
        Personality::Clyde,
        Personality::Inky,
    ];

    /// Clyde and Inky have no rule of their own yet and share `fallback`.
    pub(crate) fn targeting(self) -> TargetFn {
        match self {
            Personality::Blinky => blinky,
            Personality::Pinky => pinky,
            Personality::Clyde | Personality::Inky => fallback,
        }
    }
}

fn blinky(view: &TargetView) -> Position {
    match view.mode {
        GlobalMode::Scatter => Position::from_index(view.grid.width().saturating_sub(1), 0),
        GlobalMode::Chase => view.player_tile,
    }
}

fn pinky(view: &TargetView) -> Position {
    match view.mode {
        GlobalMode::Scatter => Position::new(0, 0),
        GlobalMode::Chase => match view.player_dir {
            Some(dir) => view.player_tile + dir.delta().scaled(PINKY_LOOKAHEAD),
            None => view.player_tile,
        },
    }
}

fn fallback(view: &TargetView) -> Position {
    match view.mode {
        GlobalMode::Scatter => Position::from_index(0, view.grid.height().saturating_sub(1)),
        GlobalMode::Chase => view.player_tile,
    }
}
