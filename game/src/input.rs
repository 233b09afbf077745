use macroquad::input::{KeyCode, is_key_down, is_key_pressed};

use crate::direction::Dir4;

/// Which of the eight movement keys are held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct MoveKeys {
    pub(crate) up: bool,
    pub(crate) down: bool,
    pub(crate) left: bool,
    pub(crate) right: bool,
    pub(crate) w: bool,
    pub(crate) a: bool,
    pub(crate) s: bool,
    pub(crate) d: bool,
}

impl MoveKeys {
    #[cfg(test)]
    pub(crate) fn holding(dir: Dir4) -> Self {
        let mut keys = Self::default();
        match dir {
            Dir4::Up => keys.up = true,
            Dir4::Down => keys.down = true,
            Dir4::Left => keys.left = true,
            Dir4::Right => keys.right = true,
        }
        keys
    }

    /// The requested direction, checked in the fixed order up, down, left,
    /// right when several keys are held.
    pub(crate) fn desired(&self) -> Option<Dir4> {
        if self.up || self.w {
            Some(Dir4::Up)
        } else if self.down || self.s {
            Some(Dir4::Down)
        } else if self.left || self.a {
            Some(Dir4::Left)
        } else if self.right || self.d {
            Some(Dir4::Right)
        } else {
            None
        }
    }
}

/// Per-frame input snapshot consumed by the session and the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Input {
    pub(crate) keys: MoveKeys,
    pub(crate) pause: bool,
    pub(crate) confirm: bool,
    pub(crate) cancel: bool,
}

impl Input {
    pub(crate) fn poll() -> Self {
        Self {
            keys: MoveKeys {
                up: is_key_down(KeyCode::Up),
                down: is_key_down(KeyCode::Down),
                left: is_key_down(KeyCode::Left),
                right: is_key_down(KeyCode::Right),
                w: is_key_down(KeyCode::W),
                a: is_key_down(KeyCode::A),
                s: is_key_down(KeyCode::S),
                d: is_key_down(KeyCode::D),
            },
            pause: is_key_pressed(KeyCode::Space),
            confirm: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            cancel: is_key_pressed(KeyCode::Escape),
        }
    }
}
