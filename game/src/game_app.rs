use std::path::PathBuf;

use macroquad::time::get_frame_time;

use crate::config::Tuning;
use crate::game::GameEvent;
use crate::input::Input;
use crate::levels::LevelSet;
use crate::motion::tile_center;
use crate::render::{Popup, render};
use crate::session::Session;

/// Frames longer than this (window drags, breakpoints) are clamped.
const MAX_FRAME_TIME: f32 = 0.1;

pub struct App {
    session: Session,
    popups: Vec<Popup>,
}

impl App {
    /// `level_dir` replaces the embedded levels with every `.txt` file in it.
    pub fn new(level_dir: Option<PathBuf>, seed: u64) -> Self {
        let levels = match &level_dir {
            Some(dir) => {
                log::info!("Loading levels from {}", dir.display());
                LevelSet::from_dir(dir)
            }
            None => LevelSet::embedded(),
        };
        Self {
            session: Session::new(levels, Tuning::load(), seed),
            popups: Vec::new(),
        }
    }

    /// Run one frame of the game loop. Returns false if the game should exit.
    pub fn tick(&mut self) -> bool {
        let dt = get_frame_time().min(MAX_FRAME_TIME);
        let input = Input::poll();
        if !self.session.update(dt, &input) {
            return false;
        }

        for popup in &mut self.popups {
            popup.age += dt;
        }
        self.popups.retain(|popup| !popup.expired());
        for event in self.session.drain_events() {
            self.handle_event(event);
        }

        render(&self.session, &self.popups);
        true
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GhostEaten { points, tile, .. } => {
                self.popups.push(Popup::new(points.to_string(), tile_center(tile)));
            }
            GameEvent::LevelAdvanced { .. } | GameEvent::PlayerDied { .. } => {
                self.popups.clear();
            }
            GameEvent::PelletEaten { .. } => {}
            _ => log::debug!("{event:?}"),
        }
    }
}
