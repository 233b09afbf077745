use crate::config::{GlobalMode, ModePhase};

use super::SessionStats;

impl SessionStats {
    /// Advances the scatter/chase clock. Returns the new global mode when a
    /// phase boundary flips it. Once the schedule is exhausted the last
    /// phase's mode holds forever.
    pub(crate) fn advance_mode_clock(
        &mut self,
        schedule: &[ModePhase],
        dt: f32,
    ) -> Option<GlobalMode> {
        let phase = schedule.get(self.mode_schedule_index)?;
        self.mode_timer += dt;
        if self.mode_timer < phase.duration {
            return None;
        }
        self.mode_timer -= phase.duration;
        self.mode_schedule_index += 1;
        let next = schedule.get(self.mode_schedule_index)?;
        if next.mode == self.global_mode {
            return None;
        }
        self.global_mode = next.mode;
        Some(next.mode)
    }

    pub(crate) fn reset_mode_clock(&mut self, schedule: &[ModePhase]) {
        self.mode_schedule_index = 0;
        self.mode_timer = 0.0;
        self.global_mode = schedule
            .first()
            .map_or(GlobalMode::Scatter, |phase| phase.mode);
    }
}
