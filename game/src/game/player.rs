use crate::direction::Dir4;
use crate::grid::{Grid, PelletKind};
use crate::input::MoveKeys;
use crate::motion::{Pixel, near_center, tile_center, wrap_pixel};
use crate::position::Position;

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) pos: Pixel,
    pub(crate) direction: Option<Dir4>,
    /// Buffered turn, committed the next time the player is centred on a
    /// tile whose neighbour in that direction is open.
    pub(crate) desired: Option<Dir4>,
    pub(crate) speed: f32,
}

impl Player {
    pub(crate) fn new(spawn: Position, speed: f32) -> Self {
        Self {
            pos: tile_center(spawn),
            direction: None,
            desired: None,
            speed,
        }
    }

    pub(crate) fn tile(&self) -> Position {
        self.pos.tile()
    }

    /// Releasing every key keeps the previous request.
    pub(crate) fn steer(&mut self, keys: &MoveKeys) {
        if let Some(dir) = keys.desired() {
            self.desired = Some(dir);
        }
    }

    pub(crate) fn reset(&mut self, spawn: Position) {
        self.pos = tile_center(spawn);
        self.direction = None;
        self.desired = None;
    }

    /// Advances the player by `dt` seconds and eats whatever pellet lies
    /// under it once it has settled near a tile centre.
    pub(crate) fn update(&mut self, dt: f32, grid: &mut Grid) -> Option<PelletKind> {
        let tile = self.tile();
        if let Some(desired) = self.desired
            && self.direction != Some(desired)
            && near_center(self.pos)
            && grid.is_passable(tile + desired.delta())
        {
            self.pos = tile_center(tile);
            self.direction = Some(desired);
        }

        if let Some(dir) = self.direction {
            let moved = self.pos.stepped(dir, self.speed * dt);
            if grid.is_passable(moved.tile()) {
                self.pos = wrap_pixel(moved, grid.width());
            } else {
                self.pos = tile_center(tile);
                self.direction = None;
            }
        }

        if near_center(self.pos) {
            grid.eat_pellet_at(self.tile())
        } else {
            None
        }
    }
}
