use crate::config::GlobalMode;
use crate::grid::PelletKind;
use crate::position::Position;

/// Notifications for the render/audio/HUD sinks, queued in the order they
/// happen within a tick and drained with `Game::drain_events`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GameEvent {
    PelletEaten { kind: PelletKind },
    FrightenedStarted,
    GhostEaten {
        chain_index: usize,
        points: u32,
        tile: Position,
    },
    PlayerDied { lives_left: u32 },
    ModeChanged { mode: GlobalMode },
    LevelCleared { level: u32 },
    LevelAdvanced { level: u32 },
    GameOver { score: u32 },
    GameComplete { score: u32 },
}

/// What a call to `Game::update` means for the surrounding session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Continue,
    GameOver,
    /// The level was cleared and the next one is already loaded.
    Victory,
    CompleteVictory,
}
