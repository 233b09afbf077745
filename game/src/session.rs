use std::mem;
use std::rc::Rc;

use crate::config::Tuning;
use crate::error::LevelError;
use crate::game::{Game, GameEvent, TickOutcome};
use crate::input::Input;
use crate::levels::LevelSet;

/// What the player is looking at. Each screen carries only its own data.
pub(crate) enum Screen {
    Menu {
        load_error: Option<String>,
    },
    Playing(Box<Game>),
    GameOver {
        final_score: u32,
    },
    /// The next level is already loaded in `game`.
    Victory {
        game: Box<Game>,
        display_time: f32,
        cleared_level: u32,
    },
    CompleteVictory {
        final_score: u32,
    },
    Quit,
}

impl Screen {
    fn name(&self) -> &'static str {
        match self {
            Screen::Menu { .. } => "menu",
            Screen::Playing(_) => "playing",
            Screen::GameOver { .. } => "game over",
            Screen::Victory { .. } => "victory",
            Screen::CompleteVictory { .. } => "complete victory",
            Screen::Quit => "quit",
        }
    }
}

pub(crate) struct Session {
    pub(crate) screen: Screen,
    levels: Result<Rc<LevelSet>, LevelError>,
    tuning: Rc<Tuning>,
    next_seed: u64,
    events: Vec<GameEvent>,
}

impl Session {
    pub(crate) fn new(levels: Result<LevelSet, LevelError>, tuning: Tuning, seed: u64) -> Self {
        let load_error = match &levels {
            Ok(_) => None,
            Err(e) => {
                log::error!("Failed to load levels: {e}");
                Some(e.to_string())
            }
        };
        Self {
            screen: Screen::Menu { load_error },
            levels: levels.map(Rc::new),
            tuning: Rc::new(tuning),
            next_seed: seed,
            events: Vec::new(),
        }
    }

    pub(crate) fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Advances the current screen. Returns false once the player quits.
    pub(crate) fn update(&mut self, dt: f32, input: &Input) -> bool {
        let screen = mem::replace(&mut self.screen, Screen::Quit);
        let before = screen.name();
        self.screen = self.transition(screen, dt, input);
        let after = self.screen.name();
        if before != after {
            log::info!("{before} -> {after}");
        }
        !matches!(self.screen, Screen::Quit)
    }

    fn transition(&mut self, screen: Screen, dt: f32, input: &Input) -> Screen {
        match screen {
            Screen::Menu { load_error } => {
                if input.cancel {
                    Screen::Quit
                } else if input.confirm {
                    self.start_game()
                } else {
                    Screen::Menu { load_error }
                }
            }
            Screen::Playing(mut game) => {
                if input.cancel {
                    return Screen::Menu { load_error: None };
                }
                let outcome = game.update(dt, input);
                self.events.extend(game.drain_events());
                match outcome {
                    TickOutcome::Continue => Screen::Playing(game),
                    TickOutcome::GameOver => Screen::GameOver {
                        final_score: game.stats.score,
                    },
                    TickOutcome::Victory => Screen::Victory {
                        cleared_level: game.stats.current_level.saturating_sub(1),
                        game,
                        display_time: 0.0,
                    },
                    TickOutcome::CompleteVictory => Screen::CompleteVictory {
                        final_score: game.stats.score,
                    },
                }
            }
            Screen::Victory {
                game,
                display_time,
                cleared_level,
            } => {
                let display_time = display_time + dt;
                let confirmed = input.confirm && display_time >= self.tuning.victory_min_display;
                if confirmed || display_time >= self.tuning.victory_timeout {
                    Screen::Playing(game)
                } else {
                    Screen::Victory {
                        game,
                        display_time,
                        cleared_level,
                    }
                }
            }
            Screen::GameOver { final_score } => {
                if input.confirm {
                    self.start_game()
                } else if input.cancel {
                    Screen::Menu { load_error: None }
                } else {
                    Screen::GameOver { final_score }
                }
            }
            Screen::CompleteVictory { final_score } => {
                if input.confirm {
                    self.start_game()
                } else if input.cancel {
                    Screen::Menu { load_error: None }
                } else {
                    Screen::CompleteVictory { final_score }
                }
            }
            Screen::Quit => Screen::Quit,
        }
    }

    /// A fresh game at level 1, or the menu again if the levels never loaded.
    fn start_game(&mut self) -> Screen {
        match &self.levels {
            Ok(levels) => {
                let seed = self.next_seed;
                self.next_seed = self.next_seed.wrapping_add(1);
                let game = Game::new(Rc::clone(levels), Rc::clone(&self.tuning), seed);
                Screen::Playing(Box::new(game))
            }
            Err(e) => Screen::Menu {
                load_error: Some(e.to_string()),
            },
        }
    }

    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }
}
