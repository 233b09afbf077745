use serde::{Deserialize, Serialize};

use crate::position::PositionDelta;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum Dir4 {
    Up,
    Left,
    Down,
    Right,
}

impl Dir4 {
    /// Neighbor visiting order. Ties in pathfinding and flee scoring resolve to
    /// the earliest entry.
    pub(crate) const PRIORITY: [Dir4; 4] = [Dir4::Up, Dir4::Left, Dir4::Down, Dir4::Right];

    pub(crate) fn delta(self) -> PositionDelta {
        match self {
            Dir4::Up => PositionDelta::new(0, -1),
            Dir4::Left => PositionDelta::new(-1, 0),
            Dir4::Down => PositionDelta::new(0, 1),
            Dir4::Right => PositionDelta::new(1, 0),
        }
    }

    pub(crate) fn opposite(self) -> Dir4 {
        match self {
            Dir4::Up => Dir4::Down,
            Dir4::Down => Dir4::Up,
            Dir4::Left => Dir4::Right,
            Dir4::Right => Dir4::Left,
        }
    }

    /// Unit vector in pixel space (y grows downwards).
    pub(crate) fn unit(self) -> (f32, f32) {
        let PositionDelta { dx, dy } = self.delta();
        (dx as f32, dy as f32)
    }
}
