use std::mem;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::{GlobalMode, Tuning};
use crate::grid::{Grid, PelletKind};
use crate::input::Input;
use crate::levels::LevelSet;
use crate::motion::max_step_dt;

mod events;
mod ghost;
mod player;
mod schedule;
mod targeting;
#[cfg(test)]
mod tests;

pub(crate) use events::{GameEvent, TickOutcome};
pub(crate) use ghost::{Ghost, GhostContext, GhostMode};
pub(crate) use player::Player;
pub(crate) use targeting::Personality;

/// Counters owned by the orchestrator. Actors read `global_mode` through
/// `GhostContext` but never write any of this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SessionStats {
    pub(crate) score: u32,
    pub(crate) lives: u32,
    pub(crate) current_level: u32,
    pub(crate) global_mode: GlobalMode,
    pub(crate) mode_schedule_index: usize,
    pub(crate) mode_timer: f32,
    /// Ghosts eaten since the last power pellet; indexes the chain bonus.
    pub(crate) ghost_chain_count: usize,
    pub(crate) paused: bool,
}

impl SessionStats {
    pub(crate) fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            current_level: 1,
            global_mode: GlobalMode::Scatter,
            mode_schedule_index: 0,
            mode_timer: 0.0,
            ghost_chain_count: 0,
            paused: false,
        }
    }
}

/// One run of the game: the live maze, the actors and the session counters.
#[derive(Clone)]
pub(crate) struct Game {
    pub(crate) stats: SessionStats,
    pub(crate) grid: Grid,
    pub(crate) player: Player,
    pub(crate) ghosts: Vec<Ghost>,
    levels: Rc<LevelSet>,
    tuning: Rc<Tuning>,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl Game {
    pub(crate) fn new(levels: Rc<LevelSet>, tuning: Rc<Tuning>, seed: u64) -> Self {
        let grid = levels.get(1).grid.clone();
        let player = Player::new(grid.player_spawn(), tuning.player_speed);
        let mut game = Self {
            stats: SessionStats::new(tuning.initial_lives),
            grid,
            player,
            ghosts: Vec::new(),
            levels,
            tuning,
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
        };
        game.load_level();
        game
    }

    pub(crate) fn speed_multiplier(&self) -> f32 {
        self.tuning.speed_multiplier(self.stats.current_level)
    }

    /// Replaces grid, player and ghosts with a fresh copy of
    /// `stats.current_level` and restarts the mode schedule.
    pub(crate) fn load_level(&mut self) {
        let level = self.stats.current_level;
        let multiplier = self.speed_multiplier();
        let schedule = self.tuning.schedule(level);
        self.stats.reset_mode_clock(schedule);
        self.stats.ghost_chain_count = 0;

        let source = self.levels.get(level);
        let mut grid = source.grid.clone();
        let ghost_count = (level as usize).min(grid.ghost_spawns().len());
        grid.set_active_ghosts(ghost_count);

        self.player = Player::new(grid.player_spawn(), self.tuning.player_speed * multiplier);
        let initial_mode = self.stats.global_mode;
        self.ghosts.clear();
        for (i, &spawn) in grid.ghost_spawns().iter().take(ghost_count).enumerate() {
            let personality = Personality::ROSTER[i % Personality::ROSTER.len()];
            let ghost = Ghost::new(spawn, i, personality, initial_mode, multiplier, &mut self.rng);
            self.ghosts.push(ghost);
        }
        self.grid = grid;
        log::info!(
            "Level {level} ({}): {} ghosts, speed x{multiplier:.2}, {} pellets",
            source.name,
            self.ghosts.len(),
            self.grid.pellets_remaining()
        );
    }

    /// Runs one frame. Space toggles pause; a frame too long for the fastest
    /// actor's snap window is split into equal sub-steps.
    pub(crate) fn update(&mut self, dt: f32, input: &Input) -> TickOutcome {
        if input.pause {
            self.stats.paused = !self.stats.paused;
            log::debug!("paused: {}", self.stats.paused);
        }
        if self.stats.paused || dt.is_nan() || dt <= 0.0 {
            return TickOutcome::Continue;
        }
        self.player.steer(&input.keys);

        let max_dt = max_step_dt(self.tuning.fastest_speed() * self.speed_multiplier());
        let steps = (dt / max_dt).ceil().max(1.0) as u32;
        let step_dt = dt / steps as f32;
        for _ in 0..steps {
            let outcome = self.step(step_dt);
            if outcome != TickOutcome::Continue {
                return outcome;
            }
        }
        TickOutcome::Continue
    }

    /// One ordered tick: mode clock, player, ghosts, collisions, level clear.
    fn step(&mut self, dt: f32) -> TickOutcome {
        let schedule = self.tuning.schedule(self.stats.current_level);
        if let Some(mode) = self.stats.advance_mode_clock(schedule, dt) {
            log::debug!("global mode -> {mode:?}");
            for ghost in &mut self.ghosts {
                ghost.apply_global_mode(mode);
            }
            self.events.push(GameEvent::ModeChanged { mode });
        }

        if let Some(kind) = self.player.update(dt, &mut self.grid) {
            self.stats.score += match kind {
                PelletKind::Normal => self.tuning.pellet_points,
                PelletKind::Power => self.tuning.power_pellet_points,
            };
            self.events.push(GameEvent::PelletEaten { kind });
            if kind == PelletKind::Power {
                self.trigger_frightened();
            }
        }

        let ctx = GhostContext {
            grid: &self.grid,
            tuning: &self.tuning,
            global_mode: self.stats.global_mode,
            player_tile: self.player.tile(),
            player_dir: self.player.direction,
        };
        for ghost in &mut self.ghosts {
            ghost.update(dt, &ctx, &mut self.rng);
        }

        if let Some(outcome) = self.resolve_collisions() {
            return outcome;
        }
        if self.grid.pellets_remaining() == 0 {
            return self.clear_level();
        }
        TickOutcome::Continue
    }

    pub(crate) fn trigger_frightened(&mut self) {
        let duration = self.tuning.frightened_duration;
        let frightened = self
            .ghosts
            .iter_mut()
            .map(|ghost| ghost.set_frightened(duration))
            .filter(|&turned| turned)
            .count();
        self.stats.ghost_chain_count = 0;
        log::debug!("power pellet: {frightened} ghosts frightened");
        self.events.push(GameEvent::FrightenedStarted);
    }

    /// Settles every ghost touching the player. A death respawns everyone,
    /// so the remaining ghosts are not checked against the new positions.
    fn resolve_collisions(&mut self) -> Option<TickOutcome> {
        let radius = self.tuning.collision_distance;
        for i in 0..self.ghosts.len() {
            if self.ghosts[i].pos.distance(self.player.pos) >= radius {
                continue;
            }
            match self.ghosts[i].mode {
                GhostMode::Frightened => self.eat_ghost(i),
                GhostMode::Eaten => {}
                GhostMode::Scatter | GhostMode::Chase => {
                    return Some(self.player_died());
                }
            }
        }
        None
    }

    fn eat_ghost(&mut self, index: usize) {
        let chain_index = self.stats.ghost_chain_count;
        let points = self.tuning.chain_points(chain_index);
        let ghost = &mut self.ghosts[index];
        ghost.set_eaten(self.tuning.eaten_return_duration);
        let tile = ghost.tile();
        let personality = ghost.personality;
        self.stats.score += points;
        self.stats.ghost_chain_count += 1;
        log::debug!("{personality:?} (ghost {index}) eaten for {points} (chain {chain_index})");
        self.events.push(GameEvent::GhostEaten {
            chain_index,
            points,
            tile,
        });
    }

    fn player_died(&mut self) -> TickOutcome {
        self.stats.lives = self.stats.lives.saturating_sub(1);
        let lives_left = self.stats.lives;
        log::debug!("player died, {lives_left} lives left");
        self.events.push(GameEvent::PlayerDied { lives_left });
        if lives_left == 0 {
            let score = self.stats.score;
            log::info!("Game over with {score} points");
            self.events.push(GameEvent::GameOver { score });
            return TickOutcome::GameOver;
        }

        let schedule = self.tuning.schedule(self.stats.current_level);
        self.stats.reset_mode_clock(schedule);
        self.stats.ghost_chain_count = 0;
        self.player.reset(self.grid.player_spawn());
        let initial_mode = self.stats.global_mode;
        for ghost in &mut self.ghosts {
            ghost.reset(initial_mode, &mut self.rng);
        }
        TickOutcome::Continue
    }

    fn clear_level(&mut self) -> TickOutcome {
        let level = self.stats.current_level;
        self.events.push(GameEvent::LevelCleared { level });
        if level >= self.tuning.max_level {
            let score = self.stats.score;
            log::info!("Cleared the final level {level} with {score} points");
            self.events.push(GameEvent::GameComplete { score });
            return TickOutcome::CompleteVictory;
        }
        self.stats.current_level += 1;
        self.load_level();
        self.events.push(GameEvent::LevelAdvanced {
            level: self.stats.current_level,
        });
        TickOutcome::Victory
    }

    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }
}
