use serde::{Deserialize, Serialize};

use crate::motion::TILE_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum GlobalMode {
    Scatter,
    Chase,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ModePhase {
    pub(crate) mode: GlobalMode,
    pub(crate) duration: f32,
}

impl ModePhase {
    const fn new(mode: GlobalMode, duration: f32) -> Self {
        Self { mode, duration }
    }
}

const LEVEL_1_SCHEDULE: [ModePhase; 8] = [
    ModePhase::new(GlobalMode::Scatter, 7.0),
    ModePhase::new(GlobalMode::Chase, 20.0),
    ModePhase::new(GlobalMode::Scatter, 7.0),
    ModePhase::new(GlobalMode::Chase, 20.0),
    ModePhase::new(GlobalMode::Scatter, 5.0),
    ModePhase::new(GlobalMode::Chase, 20.0),
    ModePhase::new(GlobalMode::Scatter, 5.0),
    ModePhase::new(GlobalMode::Chase, 9999.0),
];

/// Gameplay constants. Speeds are pixels per second before the per-level
/// multiplier, durations are seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Tuning {
    pub(crate) player_speed: f32,
    pub(crate) ghost_speed_chase: f32,
    pub(crate) ghost_speed_scatter: f32,
    pub(crate) ghost_speed_frightened: f32,
    pub(crate) ghost_speed_eaten: f32,
    pub(crate) speed_increase_per_level: f32,
    pub(crate) frightened_duration: f32,
    pub(crate) frightened_blink_last: f32,
    pub(crate) eaten_return_duration: f32,
    pub(crate) ghost_turn_cooldown: f32,
    pub(crate) initial_lives: u32,
    pub(crate) max_level: u32,
    pub(crate) pellet_points: u32,
    pub(crate) power_pellet_points: u32,
    pub(crate) ghost_chain_points: Vec<u32>,
    pub(crate) collision_distance: f32,
    pub(crate) victory_min_display: f32,
    pub(crate) victory_timeout: f32,
    /// One schedule per level; levels past the end reuse the last one.
    pub(crate) mode_schedules: Vec<Vec<ModePhase>>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 60.0,
            ghost_speed_chase: 55.0,
            ghost_speed_scatter: 55.0,
            ghost_speed_frightened: 40.0,
            ghost_speed_eaten: 100.0,
            speed_increase_per_level: 0.05,
            frightened_duration: 6.0,
            frightened_blink_last: 2.0,
            eaten_return_duration: 3.0,
            ghost_turn_cooldown: 0.1,
            initial_lives: 3,
            max_level: 6,
            pellet_points: 10,
            power_pellet_points: 50,
            ghost_chain_points: vec![200, 400, 800, 1600],
            collision_distance: TILE_SIZE * 0.6,
            victory_min_display: 2.0,
            victory_timeout: 5.0,
            mode_schedules: vec![LEVEL_1_SCHEDULE.to_vec()],
        }
    }
}

impl Tuning {
    pub(crate) fn speed_multiplier(&self, level: u32) -> f32 {
        1.0 + level.saturating_sub(1) as f32 * self.speed_increase_per_level
    }

    pub(crate) fn schedule(&self, level: u32) -> &[ModePhase] {
        let index = (level.max(1) as usize - 1).min(self.mode_schedules.len().saturating_sub(1));
        self.mode_schedules
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&LEVEL_1_SCHEDULE)
    }

    /// Chain bonus for the `chain_index`-th ghost eaten in one frightened
    /// window, saturating at the last table entry.
    pub(crate) fn chain_points(&self, chain_index: usize) -> u32 {
        let last = self.ghost_chain_points.len().saturating_sub(1);
        self.ghost_chain_points
            .get(chain_index.min(last))
            .copied()
            .unwrap_or(0)
    }

    /// Fastest base speed any actor can reach.
    pub(crate) fn fastest_speed(&self) -> f32 {
        [
            self.player_speed,
            self.ghost_speed_chase,
            self.ghost_speed_scatter,
            self.ghost_speed_frightened,
            self.ghost_speed_eaten,
        ]
        .into_iter()
        .fold(0.0, f32::max)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let speeds = [
            ("player_speed", self.player_speed),
            ("ghost_speed_chase", self.ghost_speed_chase),
            ("ghost_speed_scatter", self.ghost_speed_scatter),
            ("ghost_speed_frightened", self.ghost_speed_frightened),
            ("ghost_speed_eaten", self.ghost_speed_eaten),
        ];
        if let Some((name, _)) = speeds.iter().find(|(_, speed)| !(*speed > 0.0)) {
            return Err(format!("{name} must be positive"));
        }
        if self.speed_increase_per_level < 0.0 {
            return Err("speed_increase_per_level must not be negative".to_string());
        }
        if self.initial_lives == 0 {
            return Err("initial_lives must be at least 1".to_string());
        }
        if self.max_level == 0 {
            return Err("max_level must be at least 1".to_string());
        }
        if self.ghost_chain_points.is_empty() {
            return Err("ghost_chain_points must not be empty".to_string());
        }
        if self.mode_schedules.is_empty() || self.mode_schedules.iter().any(Vec::is_empty) {
            return Err("mode_schedules must contain non-empty schedules".to_string());
        }
        if self
            .mode_schedules
            .iter()
            .flatten()
            .any(|phase| !(phase.duration > 0.0))
        {
            return Err("mode phase durations must be positive".to_string());
        }
        Ok(())
    }

    pub(crate) fn load() -> Self {
        backend::try_load_tuning().unwrap_or_default()
    }

    fn parse(json: &str) -> Result<Self, String> {
        let tuning: Tuning = serde_json::from_str(json).map_err(|e| e.to_string())?;
        tuning.validate()?;
        Ok(tuning)
    }
}

macro_rules! warn_err {
    ($expr:expr, $($arg:tt)+) => {
        $expr.map_err(|e| log::warn!($($arg)+, e)).ok()
    };
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::*;

    pub(super) fn try_load_tuning() -> Option<Tuning> {
        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::*;
    use std::fs::read_to_string;
    use std::path::PathBuf;

    pub(super) fn try_load_tuning() -> Option<Tuning> {
        let path = tuning_path()?;
        if !path.exists() {
            return None;
        }
        let s = warn_err!(
            read_to_string(&path),
            "Failed to read {}: {}",
            path.display()
        )?;
        let tuning = warn_err!(
            Tuning::parse(&s),
            "Ignoring {}: {}",
            path.display()
        )?;
        log::info!("Loaded tuning overrides from {}", path.display());
        Some(tuning)
    }

    fn tuning_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "MazeChomp")?;
        Some(dirs.config_dir().join("tuning.json"))
    }
}
