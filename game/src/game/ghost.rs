use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::{GlobalMode, Tuning};
use crate::direction::Dir4;
use crate::grid::Grid;
use crate::motion::{Pixel, near_center, tile_center, wrap_pixel};
use crate::pathfinding::{flee_direction, next_step};
use crate::position::Position;

use super::targeting::{Personality, TargetFn, TargetView};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum GhostMode {
    Scatter,
    Chase,
    Frightened,
    Eaten,
}

impl GhostMode {
    pub(crate) fn from_global(mode: GlobalMode) -> Self {
        match mode {
            GlobalMode::Scatter => GhostMode::Scatter,
            GlobalMode::Chase => GhostMode::Chase,
        }
    }

    /// The schedule-driven mode this ghost mode follows, if any.
    pub(crate) fn as_global(self) -> Option<GlobalMode> {
        match self {
            GhostMode::Scatter => Some(GlobalMode::Scatter),
            GhostMode::Chase => Some(GlobalMode::Chase),
            GhostMode::Frightened | GhostMode::Eaten => None,
        }
    }
}

/// Everything a ghost reads about the rest of the world for one tick.
pub(crate) struct GhostContext<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) tuning: &'a Tuning,
    pub(crate) global_mode: GlobalMode,
    pub(crate) player_tile: Position,
    pub(crate) player_dir: Option<Dir4>,
}

#[derive(Clone, Debug)]
pub(crate) struct Ghost {
    pub(crate) pos: Pixel,
    pub(crate) direction: Dir4,
    pub(crate) mode: GhostMode,
    pub(crate) personality: Personality,
    target: TargetFn,
    pub(crate) frightened_timer: f32,
    pub(crate) eaten_timer: f32,
    /// Blocks another turn until it runs out, so a ghost lingering in the
    /// snap window commits at most one turn per tile.
    turn_cooldown: f32,
    pub(crate) speed_multiplier: f32,
    /// Render hint only.
    pub(crate) color_index: usize,
    pub(crate) spawn: Position,
}

impl Ghost {
    pub(crate) fn new(
        spawn: Position,
        color_index: usize,
        personality: Personality,
        initial_mode: GlobalMode,
        speed_multiplier: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut ghost = Self {
            pos: tile_center(spawn),
            direction: Dir4::Up,
            mode: GhostMode::from_global(initial_mode),
            personality,
            target: personality.targeting(),
            frightened_timer: 0.0,
            eaten_timer: 0.0,
            turn_cooldown: 0.0,
            speed_multiplier,
            color_index,
            spawn,
        };
        ghost.reset(initial_mode, rng);
        ghost
    }

    pub(crate) fn tile(&self) -> Position {
        self.pos.tile()
    }

    pub(crate) fn speed(&self, tuning: &Tuning) -> f32 {
        let base = match self.mode {
            GhostMode::Scatter => tuning.ghost_speed_scatter,
            GhostMode::Chase => tuning.ghost_speed_chase,
            GhostMode::Frightened => tuning.ghost_speed_frightened,
            GhostMode::Eaten => tuning.ghost_speed_eaten,
        };
        base * self.speed_multiplier
    }

    pub(crate) fn update(&mut self, dt: f32, ctx: &GhostContext, rng: &mut impl Rng) {
        self.turn_cooldown -= dt;
        self.tick_timers(dt, ctx.global_mode);

        let tile = self.tile();
        if near_center(self.pos) && self.turn_cooldown <= 0.0 {
            let dir = self.choose_direction(tile, ctx, rng);
            if dir != self.direction {
                self.pos = tile_center(tile);
                self.direction = dir;
                self.turn_cooldown = ctx.tuning.ghost_turn_cooldown;
            }
        }

        let moved = self.pos.stepped(self.direction, self.speed(ctx.tuning) * dt);
        if ctx.grid.is_passable(moved.tile()) {
            self.pos = wrap_pixel(moved, ctx.grid.width());
        } else {
            self.pos = tile_center(tile);
            self.turn_cooldown = 0.0;
        }
    }

    fn tick_timers(&mut self, dt: f32, global_mode: GlobalMode) {
        match self.mode {
            GhostMode::Frightened => {
                self.frightened_timer -= dt;
                if self.frightened_timer <= 0.0 {
                    self.frightened_timer = 0.0;
                    self.mode = GhostMode::from_global(global_mode);
                }
            }
            GhostMode::Eaten => {
                self.eaten_timer -= dt;
                if self.eaten_timer <= 0.0 {
                    self.eaten_timer = 0.0;
                    self.mode = GhostMode::from_global(global_mode);
                }
            }
            GhostMode::Scatter | GhostMode::Chase => {}
        }
    }

    /// Next heading from `tile`. Only scatter and chase forbid reversing
    /// into the previous tile; a failed search falls back to a random move.
    pub(crate) fn choose_direction(
        &self,
        tile: Position,
        ctx: &GhostContext,
        rng: &mut impl Rng,
    ) -> Dir4 {
        let step = match self.mode {
            GhostMode::Frightened => flee_direction(ctx.grid, tile, ctx.player_tile),
            GhostMode::Eaten => next_step(ctx.grid, tile, ctx.grid.ghost_home_tile(), None),
            GhostMode::Scatter | GhostMode::Chase => {
                let view = TargetView {
                    grid: ctx.grid,
                    mode: self.mode.as_global().unwrap_or(ctx.global_mode),
                    player_tile: ctx.player_tile,
                    player_dir: ctx.player_dir,
                };
                let goal = (self.target)(&view);
                next_step(ctx.grid, tile, goal, Some(self.direction.opposite()))
            }
        };
        step.unwrap_or_else(|| self.random_direction(ctx.grid, tile, rng))
    }

    /// Uniform choice among open non-reversing moves; reversing only when
    /// nothing else is open, and keeping the heading when boxed in.
    pub(crate) fn random_direction(&self, grid: &Grid, tile: Position, rng: &mut impl Rng) -> Dir4 {
        let back = self.direction.opposite();
        let mut options: Vec<Dir4> = Dir4::PRIORITY
            .into_iter()
            .filter(|&dir| dir != back && grid.is_passable(tile + dir.delta()))
            .collect();
        if options.is_empty() && grid.is_passable(tile + back.delta()) {
            options.push(back);
        }
        options.choose(rng).copied().unwrap_or(self.direction)
    }

    /// Eaten ghosts ignore the trigger. Returns whether the ghost turned
    /// frightened.
    pub(crate) fn set_frightened(&mut self, duration: f32) -> bool {
        if self.mode == GhostMode::Eaten {
            return false;
        }
        self.mode = GhostMode::Frightened;
        self.frightened_timer = duration;
        self.direction = self.direction.opposite();
        self.turn_cooldown = 0.0;
        true
    }

    pub(crate) fn set_eaten(&mut self, duration: f32) {
        self.mode = GhostMode::Eaten;
        self.eaten_timer = duration;
        self.frightened_timer = 0.0;
    }

    /// Follows a scatter/chase flip of the schedule, reversing on the spot.
    /// Frightened and eaten ghosts pick the new mode up when they recover.
    pub(crate) fn apply_global_mode(&mut self, mode: GlobalMode) {
        let Some(current) = self.mode.as_global() else {
            return;
        };
        if current != mode {
            self.mode = GhostMode::from_global(mode);
            self.direction = self.direction.opposite();
            self.turn_cooldown = 0.0;
        }
    }

    /// Back to the spawn tile with a fresh random heading and no timers.
    pub(crate) fn reset(&mut self, initial_mode: GlobalMode, rng: &mut impl Rng) {
        self.pos = tile_center(self.spawn);
        self.direction = Dir4::PRIORITY.choose(rng).copied().unwrap_or(Dir4::Up);
        self.mode = GhostMode::from_global(initial_mode);
        self.frightened_timer = 0.0;
        self.eaten_timer = 0.0;
        self.turn_cooldown = 0.0;
    }
}
