//! Pixel/tile conversions shared by every actor.
//!
//! Positions are continuous pixel coordinates in unscaled logic space; a tile
//! spans `TILE_SIZE` pixels on each axis. Direction changes may only commit
//! while an actor is within `SNAP_THRESHOLD` of its tile centre, so an actor
//! must never travel further than `SNAP_THRESHOLD` in a single step or it can
//! pass a centre without ever registering there. `max_step_dt` turns that
//! relationship into a time bound for a given speed.

use serde::{Deserialize, Serialize};

use crate::direction::Dir4;
use crate::position::Position;

pub(crate) const TILE_SIZE: f32 = 16.0;
pub(crate) const SNAP_THRESHOLD: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Pixel {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Pixel {
    pub(crate) const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub(crate) fn distance(self, other: Pixel) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Moves `distance` pixels along `dir`.
    pub(crate) fn stepped(self, dir: Dir4, distance: f32) -> Pixel {
        let (ux, uy) = dir.unit();
        Pixel::new(self.x + ux * distance, self.y + uy * distance)
    }

    pub(crate) fn tile(self) -> Position {
        Position::new(
            (self.x / TILE_SIZE).floor() as i32,
            (self.y / TILE_SIZE).floor() as i32,
        )
    }
}

/// Top-left pixel of a tile.
pub(crate) fn tile_origin(tile: Position) -> Pixel {
    Pixel::new(tile.x as f32 * TILE_SIZE, tile.y as f32 * TILE_SIZE)
}

pub(crate) fn tile_center(tile: Position) -> Pixel {
    let origin = tile_origin(tile);
    Pixel::new(origin.x + TILE_SIZE / 2.0, origin.y + TILE_SIZE / 2.0)
}

/// True when `pos` is within the snap window of the centre of the tile it
/// lies in.
pub(crate) fn near_center(pos: Pixel) -> bool {
    pos.distance(tile_center(pos.tile())) <= SNAP_THRESHOLD
}

/// Horizontal tunnel wrap for tile coordinates. Rows are never wrapped.
pub(crate) fn wrap_tile(tile: Position, width: usize) -> Position {
    let width = width as i32;
    if tile.x < 0 {
        Position::new(width - 1, tile.y)
    } else if tile.x >= width {
        Position::new(0, tile.y)
    } else {
        tile
    }
}

/// Teleports a pixel position that left the grid horizontally to the centre
/// of the entry tile on the opposite edge.
pub(crate) fn wrap_pixel(pos: Pixel, width: usize) -> Pixel {
    let span = width as f32 * TILE_SIZE;
    if pos.x < 0.0 {
        Pixel::new((width as f32 - 1.0) * TILE_SIZE + TILE_SIZE / 2.0, pos.y)
    } else if pos.x >= span {
        Pixel::new(TILE_SIZE / 2.0, pos.y)
    } else {
        pos
    }
}

/// Longest time step an actor moving at `speed` px/s can take without
/// skipping over a tile centre.
pub(crate) fn max_step_dt(speed: f32) -> f32 {
    if speed <= 0.0 {
        f32::INFINITY
    } else {
        SNAP_THRESHOLD / speed
    }
}
